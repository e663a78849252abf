//! # Brother QL Model Table
//!
//! Hardware characteristics that change what the raster stream looks like.
//!
//! | Model | Raster width | Bytes/row | Notes |
//! |-------|--------------|-----------|-------|
//! | QL-5xx, QL-6xx, QL-7xx | 720 dots | 90 | older units lack mode switching |
//! | QL-800 series | 720 dots | 90 | 400-byte invalidate |
//! | QL-10xx, QL-11xx | 1296 dots | 162 | wide format |
//! | PT-P750W | 128 dots | 16 | tape printer |
//! | PT-P900W, PT-P950NW | 560 dots | 70 | tape printer |

/// A printer model and the commands it understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Model {
    /// Identifier as used on the command line, e.g. "QL-800".
    pub name: &'static str,

    /// Bytes per raster line (pixel width / 8).
    pub bytes_per_row: u16,

    /// Number of NUL bytes sent to flush a half-received job.
    pub invalidate_bytes: usize,

    /// Supports `ESC i a` (switch to raster mode).
    pub mode_setting: bool,

    /// Has an automatic cutter (`ESC i M`, `ESC i A`).
    pub cutting: bool,

    /// Supports `ESC i K` (expanded mode).
    pub expanded_mode: bool,

    /// Supports TIFF/PackBits raster compression.
    pub compression: bool,
}

impl Model {
    /// Full raster line width in dots.
    #[inline]
    pub fn pixel_width(&self) -> u32 {
        self.bytes_per_row as u32 * 8
    }

    const fn ql(name: &'static str) -> Self {
        Self {
            name,
            bytes_per_row: 90,
            invalidate_bytes: 200,
            mode_setting: true,
            cutting: true,
            expanded_mode: true,
            compression: true,
        }
    }

    const fn legacy(mut self) -> Self {
        self.mode_setting = false;
        self.compression = false;
        self
    }

    const fn wide(mut self) -> Self {
        self.bytes_per_row = 162;
        self
    }

    const fn ql800_series(mut self) -> Self {
        self.invalidate_bytes = 400;
        self
    }

    const fn width(mut self, bytes_per_row: u16) -> Self {
        self.bytes_per_row = bytes_per_row;
        self
    }
}

/// All models known to the driver, in listing order.
pub const MODELS: &[Model] = &[
    Model {
        cutting: false,
        expanded_mode: false,
        ..Model::ql("QL-500").legacy()
    },
    Model::ql("QL-550").legacy(),
    Model::ql("QL-560").legacy(),
    Model::ql("QL-570").legacy(),
    Model::ql("QL-580N"),
    Model::ql("QL-650TD"),
    Model::ql("QL-700").legacy(),
    Model::ql("QL-710W"),
    Model::ql("QL-720NW"),
    Model {
        compression: false,
        ..Model::ql("QL-800").ql800_series()
    },
    Model::ql("QL-810W").ql800_series(),
    Model::ql("QL-820NWB").ql800_series(),
    Model::ql("QL-1050").wide(),
    Model::ql("QL-1060N").wide(),
    Model::ql("QL-1100").wide(),
    Model::ql("QL-1110NWB").wide(),
    Model::ql("QL-1115NWB").wide(),
    Model::ql("PT-P750W").width(16),
    Model::ql("PT-P900W").width(70),
    Model::ql("PT-P950NW").width(70),
];

/// Look up a model by exact name.
pub fn by_name(name: &str) -> Option<&'static Model> {
    MODELS.iter().find(|m| m.name == name)
}

/// The model listing in the same shape as `brother_ql info models`.
///
/// ```text
/// Supported models:
///  QL-500
///  QL-550
///  ...
/// ```
pub fn listing() -> String {
    let mut out = String::from("Supported models:\n");
    for model in MODELS {
        out.push(' ');
        out.push_str(model.name);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ql800_characteristics() {
        let model = by_name("QL-800").unwrap();
        assert_eq!(model.pixel_width(), 720);
        assert_eq!(model.invalidate_bytes, 400);
        assert!(model.cutting);
        assert!(!model.compression);
    }

    #[test]
    fn test_wide_models() {
        assert_eq!(by_name("QL-1060N").unwrap().pixel_width(), 1296);
        assert_eq!(by_name("QL-720NW").unwrap().pixel_width(), 720);
    }

    #[test]
    fn test_ql500_has_no_cutter() {
        let model = by_name("QL-500").unwrap();
        assert!(!model.cutting);
        assert!(!model.mode_setting);
    }

    #[test]
    fn test_lookup_is_exact() {
        assert!(by_name("QL-8").is_none());
        assert!(by_name("ql-800").is_none());
    }

    #[test]
    fn test_listing_contains_every_model() {
        let listing = listing();
        assert!(listing.starts_with("Supported models:\n"));
        for model in MODELS {
            assert!(listing.contains(&format!(" {}\n", model.name)));
        }
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in MODELS.iter().enumerate() {
            for b in &MODELS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
