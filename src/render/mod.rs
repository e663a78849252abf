//! # Rendering Module
//!
//! Produces the grayscale label image for a name.
//!
//! ## Modules
//!
//! - [`fit`]: Font size search and centering math (no pixels involved)
//! - [`font`]: TrueType loading, measuring and drawing via ab_glyph
//! - [`label`]: The label renderer itself
//! - [`dither`]: Black/white conversion used by the raster converter
//!
//! ## Usage Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use nametag::render::{FontFile, LabelRenderer};
//!
//! let renderer = LabelRenderer::new(Arc::new(FontFile::new("arial.ttf")));
//! let label = renderer.render("Jane", "Doe")?;
//! std::fs::write("jane.png", label.to_png()?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod dither;
pub mod fit;
pub mod font;
pub mod label;

#[cfg(test)]
pub(crate) mod testing;

pub use font::{FontFile, FontSource, TrueTypeFont, Typeface};
pub use label::{LABEL_HEIGHT, LABEL_WIDTH, LabelRenderer, RenderedLabel};
