//! Stand-in fonts for renderer tests.

use image::{GrayImage, Luma};
use std::sync::Arc;

use super::fit::{LineMetrics, TextBounds, TextMeasure};
use super::font::{FontSource, Typeface};
use crate::error::RenderError;

/// Every glyph is a solid block 0.5em wide, inked from 0.2em to 0.9em below
/// the ascender line.
pub struct BlockFont;

impl TextMeasure for BlockFont {
    fn measure(&self, text: &str, size: u32) -> TextBounds {
        let size = size as i32;
        TextBounds {
            left: 0,
            top: size / 5,
            right: text.chars().count() as i32 * size / 2,
            bottom: size * 9 / 10,
        }
    }
}

impl Typeface for BlockFont {
    fn line_metrics(&self, size: u32) -> LineMetrics {
        LineMetrics {
            ascent: size as i32 * 9 / 10,
            descent: size as i32 / 5,
        }
    }

    fn draw(&self, canvas: &mut GrayImage, text: &str, size: u32, origin: (i32, i32)) {
        let b = self.measure(text, size);
        for y in (origin.1 + b.top)..(origin.1 + b.bottom) {
            for x in (origin.0 + b.left)..(origin.0 + b.right) {
                if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
                    canvas.put_pixel(x as u32, y as u32, Luma([0]));
                }
            }
        }
    }
}

impl FontSource for BlockFont {
    fn load(&self) -> Result<Arc<dyn Typeface>, RenderError> {
        Ok(Arc::new(BlockFont))
    }
}

/// A font source whose file is never there.
pub struct MissingFont;

impl FontSource for MissingFont {
    fn load(&self) -> Result<Arc<dyn Typeface>, RenderError> {
        Err(RenderError::Font("font 'arial.ttf' not found".to_string()))
    }
}
