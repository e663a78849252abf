//! TrueType font loading and text rasterization using ab_glyph. Fonts given
//! by name are found through the system font database (fontdb).
//!
//! Font sizes are em sizes in pixels: at size 120 the font's em square is
//! 120px tall, which is how most imaging libraries interpret a point size.

use ab_glyph::{Font, FontArc, FontVec, Glyph, PxScale, ScaleFont, point};
use image::GrayImage;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use super::fit::{LineMetrics, TextBounds, TextMeasure};
use crate::error::RenderError;

/// A font that can measure, report metrics for, and draw a line of text.
pub trait Typeface: TextMeasure + Send + Sync {
    /// Ascent and descent at `size`.
    fn line_metrics(&self, size: u32) -> LineMetrics;

    /// Draw `text` in black with its origin (left edge, ascender line) at `origin`.
    fn draw(&self, canvas: &mut GrayImage, text: &str, size: u32, origin: (i32, i32));
}

/// Where the renderer gets its typeface from.
///
/// Loading happens per render so a font that goes missing at runtime is
/// reported on the next request instead of at startup.
pub trait FontSource: Send + Sync {
    fn load(&self) -> Result<Arc<dyn Typeface>, RenderError>;
}

/// A parsed TrueType/OpenType font.
#[derive(Clone)]
pub struct TrueTypeFont {
    font: FontArc,
}

impl TrueTypeFont {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, RenderError> {
        let font = FontArc::try_from_vec(data)
            .map_err(|e| RenderError::Font(format!("invalid font data: {}", e)))?;
        Ok(Self { font })
    }

    /// Parse face `index` of a font file or collection.
    pub fn from_bytes_and_index(data: Vec<u8>, index: u32) -> Result<Self, RenderError> {
        let font = FontVec::try_from_vec_and_index(data, index)
            .map_err(|e| RenderError::Font(format!("invalid font data: {}", e)))?;
        Ok(Self {
            font: FontArc::new(font),
        })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| RenderError::Font(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_bytes(data)
    }

    /// Pixel scale that makes the em square `size` pixels tall.
    fn scale(&self, size: u32) -> PxScale {
        let units_per_em = self.font.units_per_em().unwrap_or(1000.0);
        PxScale::from(size as f32 * self.font.height_unscaled() / units_per_em)
    }

    /// Position glyphs along a line whose ascender sits at y = 0.
    fn layout(&self, text: &str, size: u32) -> Vec<Glyph> {
        let scale = self.scale(size);
        let scaled = self.font.as_scaled(scale);
        let ascent = scaled.ascent();

        let mut glyphs = Vec::with_capacity(text.len());
        let mut caret_x = 0.0f32;
        let mut previous = None;

        for ch in text.chars() {
            let glyph_id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret_x += scaled.kern(prev, glyph_id);
            }
            glyphs.push(glyph_id.with_scale_and_position(scale, point(caret_x, ascent)));
            caret_x += scaled.h_advance(glyph_id);
            previous = Some(glyph_id);
        }

        glyphs
    }
}

impl TextMeasure for TrueTypeFont {
    fn measure(&self, text: &str, size: u32) -> TextBounds {
        let mut bounds: Option<TextBounds> = None;

        for glyph in self.layout(text, size) {
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let px = outlined.px_bounds();
            let glyph_bounds = TextBounds {
                left: px.min.x as i32,
                top: px.min.y as i32,
                right: px.max.x as i32,
                bottom: px.max.y as i32,
            };
            bounds = Some(match bounds {
                None => glyph_bounds,
                Some(b) => TextBounds {
                    left: b.left.min(glyph_bounds.left),
                    top: b.top.min(glyph_bounds.top),
                    right: b.right.max(glyph_bounds.right),
                    bottom: b.bottom.max(glyph_bounds.bottom),
                },
            });
        }

        bounds.unwrap_or_default()
    }
}

impl Typeface for TrueTypeFont {
    fn line_metrics(&self, size: u32) -> LineMetrics {
        let scaled = self.font.as_scaled(self.scale(size));
        LineMetrics {
            ascent: scaled.ascent().round() as i32,
            descent: (-scaled.descent()).round() as i32,
        }
    }

    fn draw(&self, canvas: &mut GrayImage, text: &str, size: u32, origin: (i32, i32)) {
        let (width, height) = canvas.dimensions();
        let offset = point(origin.0 as f32, origin.1 as f32);

        for mut glyph in self.layout(text, size) {
            glyph.position = glyph.position + offset;
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;
                if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                    return;
                }
                let ink = 255 - (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                let pixel = canvas.get_pixel_mut(x as u32, y as u32);
                // Overlapping glyph edges keep the darker value.
                pixel.0[0] = pixel.0[0].min(ink);
            });
        }
    }
}

/// A font given by path or by name, resolved and parsed on every load.
///
/// An existing path is read directly. Anything else is looked up in the
/// system font database, first by file name (`arial.ttf`, case-insensitive),
/// then by family name (`Arial`, regular style).
#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
}

impl FontFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl FontSource for FontFile {
    fn load(&self) -> Result<Arc<dyn Typeface>, RenderError> {
        if self.path.is_file() {
            log::debug!("Loading font from {}", self.path.display());
            return Ok(Arc::new(TrueTypeFont::open(&self.path)?));
        }

        let db = system_fonts();
        let not_found = || {
            RenderError::Font(format!(
                "font '{}' not found. Install it or pass --font with the path to a .ttf file",
                self.path.display()
            ))
        };
        let name = self.path.to_str().ok_or_else(not_found)?;
        let id = find_face(db, name).ok_or_else(not_found)?;
        log::debug!("Loading system font '{}'", name);

        let font = db
            .with_face_data(id, |data, index| {
                TrueTypeFont::from_bytes_and_index(data.to_vec(), index)
            })
            .ok_or_else(not_found)??;
        Ok(Arc::new(font))
    }
}

/// The host's font database, scanned once.
fn system_fonts() -> &'static fontdb::Database {
    static ONCE: OnceLock<fontdb::Database> = OnceLock::new();
    ONCE.get_or_init(|| {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("Found {} system font faces", db.len());
        db
    })
}

fn face_file_name(face: &fontdb::FaceInfo) -> Option<&str> {
    let path = match &face.source {
        fontdb::Source::File(path) => path,
        fontdb::Source::SharedFile(path, _) => path,
        _ => return None,
    };
    path.file_name()?.to_str()
}

/// Find a face by font file name, or by family name.
pub fn find_face(db: &fontdb::Database, name: &str) -> Option<fontdb::ID> {
    let by_file = db.faces().find(|face| {
        face_file_name(face).is_some_and(|file| file.eq_ignore_ascii_case(name))
    });
    if let Some(face) = by_file {
        return Some(face.id);
    }

    let family = Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name);
    let family = db
        .faces()
        .flat_map(|face| face.families.iter())
        .find(|(family_name, _)| family_name.eq_ignore_ascii_case(family))
        .map(|(family_name, _)| family_name.as_str())?;

    db.query(&fontdb::Query {
        families: &[fontdb::Family::Name(family)],
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    })
}
