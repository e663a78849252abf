//! # Label Renderer
//!
//! Turns a first and last name into the grayscale image that gets printed on
//! a 29mm x 90mm die-cut label.
//!
//! ```text
//! ┌───────────────────────────── 991 px ─────────────────────────────┐
//! │                                                                  │
//! │                         Jane Doe                          306 px │
//! │                                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The image is landscape; the converter rotates it to the printer's feed
//! direction.

use image::{GrayImage, ImageFormat, Luma};
use std::io::Cursor;
use std::sync::Arc;

use super::fit::{self, FitBox};
use super::font::{FontSource, Typeface};
use crate::error::RenderError;

/// Label width in pixels (90mm at 300 DPI, printable area).
pub const LABEL_WIDTH: u32 = 991;

/// Label height in pixels (29mm at 300 DPI, printable area).
pub const LABEL_HEIGHT: u32 = 306;

/// A finished label image. Read-only once built.
#[derive(Debug, Clone)]
pub struct RenderedLabel {
    image: GrayImage,
    text: String,
    font_size: u32,
}

impl RenderedLabel {
    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    /// The line of text that was drawn.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Font size the fitting search settled on.
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Encode as PNG, for previews.
    pub fn to_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut buf = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| RenderError::Image(format!("Failed to encode PNG: {}", e)))?;
        Ok(buf.into_inner())
    }
}

/// Renders name labels with a font loaded from a [`FontSource`].
#[derive(Clone)]
pub struct LabelRenderer {
    fonts: Arc<dyn FontSource>,
    width: u32,
    height: u32,
}

impl LabelRenderer {
    /// Renderer for the standard 991x306 label.
    pub fn new(fonts: Arc<dyn FontSource>) -> Self {
        Self::with_size(fonts, LABEL_WIDTH, LABEL_HEIGHT)
    }

    pub fn with_size(fonts: Arc<dyn FontSource>, width: u32, height: u32) -> Self {
        Self {
            fonts,
            width,
            height,
        }
    }

    /// Render `"{first_name} {last_name}"` centered and fitted on a label.
    ///
    /// ## Errors
    ///
    /// Fails only when the font cannot be loaded.
    pub fn render(&self, first_name: &str, last_name: &str) -> Result<RenderedLabel, RenderError> {
        let face = self.fonts.load()?;
        let text = format!("{} {}", first_name, last_name);
        Ok(render_text(face.as_ref(), &text, self.width, self.height))
    }
}

/// Draw one line of text, fitted and centered, onto a fresh white canvas.
pub fn render_text(face: &dyn Typeface, text: &str, width: u32, height: u32) -> RenderedLabel {
    let fit_box = FitBox::for_label(width, height);
    let font_size = fit::choose_font_size(face, text, fit_box);

    let bounds = face.measure(text, font_size);
    let origin = fit::center_origin(width, height, &bounds, face.line_metrics(font_size));

    let mut image = GrayImage::from_pixel(width, height, Luma([255]));
    face.draw(&mut image, text, font_size, origin);

    log::info!("Using font size: {}pt for '{}'", font_size, text);

    RenderedLabel {
        image,
        text: text.to_string(),
        font_size,
    }
}
