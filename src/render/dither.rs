//! # Black/White Conversion
//!
//! Label printers print dots, not gray levels. This module decides which
//! pixels of a grayscale label become dots, either with a fixed threshold
//! (crisp text, the default) or with Bayer 8x8 ordered dithering (photos,
//! logos).
//!
//! ## Threshold
//!
//! The threshold is given as a percentage of darkness. A pixel prints when
//! its inverted gray level reaches the cut-off:
//!
//! ```text
//! level   = clamp(int((100 - threshold) / 100 * 255), 0, 255)
//! prints  = (255 - gray) >= level
//!
//! threshold 70.0  →  level 76  →  gray 0..=179 prints, 180..=255 does not
//! ```
//!
//! ## Ordered Dithering
//!
//! ```text
//!     0   1   2   3   4   5   6   7   (x mod 8)
//!   ┌───┬───┬───┬───┬───┬───┬───┬───┐
//! 0 │ 0 │32 │ 8 │40 │ 2 │34 │10 │42 │
//! 1 │48 │16 │56 │24 │50 │18 │58 │26 │
//! 2 │12 │44 │ 4 │36 │14 │46 │ 6 │38 │
//! 3 │60 │28 │52 │20 │62 │30 │54 │22 │
//! 4 │ 3 │35 │11 │43 │ 1 │33 │ 9 │41 │
//! 5 │51 │19 │59 │27 │49 │17 │57 │25 │
//! 6 │15 │47 │ 7 │39 │13 │45 │ 5 │37 │
//! 7 │63 │31 │55 │23 │61 │29 │53 │21 │
//!   └───┴───┴───┴───┴───┴───┴───┴───┘
//! ```
//!
//! `threshold = (value + 0.5) / 64.0`, so pure black always prints and pure
//! white never does.
//!
//! ```
//! use nametag::render::dither::pack_row;
//!
//! let row = vec![true, true, false, false, true, false, true, false];
//! assert_eq!(pack_row(&row), vec![0b11001010]);
//! ```

/// Bayer 8x8 dithering matrix
pub const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// How gray pixels are turned into dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binarization {
    /// Print where the inverted gray level is at least this value.
    Threshold(u8),
    /// Bayer 8x8 ordered dithering.
    Ordered,
}

impl Binarization {
    /// Whether the pixel at `(x, y)` with gray level `gray` (0 = black) prints.
    #[inline]
    pub fn prints(&self, x: usize, y: usize, gray: u8) -> bool {
        let darkness = 255 - gray;
        match *self {
            Self::Threshold(level) => darkness >= level,
            Self::Ordered => should_print(x, y, darkness as f32 / 255.0),
        }
    }
}

/// Convert a darkness percentage (0-100) into an inverted gray cut-off.
///
/// ```
/// use nametag::render::dither::threshold_level;
///
/// assert_eq!(threshold_level(70.0), 76);
/// assert_eq!(threshold_level(0.0), 255);
/// assert_eq!(threshold_level(100.0), 0);
/// ```
pub fn threshold_level(percent: f32) -> u8 {
    let level = ((100.0 - percent) / 100.0 * 255.0) as i32;
    level.clamp(0, 255) as u8
}

/// Get the dithering threshold for a pixel position, in (0, 1).
#[inline]
pub fn threshold(x: usize, y: usize) -> f32 {
    let matrix_value = BAYER8[y & 7][x & 7];
    (matrix_value as f32 + 0.5) / 64.0
}

/// Ordered-dither decision for an intensity where 0.0 = white, 1.0 = black.
#[inline]
pub fn should_print(x: usize, y: usize, intensity: f32) -> bool {
    intensity > threshold(x, y)
}

/// Pack a row of dots into bytes.
///
/// - Bit 7 (MSB) = leftmost pixel
/// - 1 = print, 0 = blank
/// - The last byte is padded with blanks on the right.
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let num_bytes = pixels.len().div_ceil(8);
    let mut bytes = vec![0u8; num_bytes];

    for (i, &pixel) in pixels.iter().enumerate() {
        if pixel {
            let byte_idx = i / 8;
            let bit_idx = 7 - (i % 8); // MSB first
            bytes[byte_idx] |= 1 << bit_idx;
        }
    }

    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bayer_matrix_values() {
        let mut seen = [false; 64];
        for row in &BAYER8 {
            for &val in row {
                assert!(val < 64, "Matrix value {} out of range", val);
                assert!(!seen[val as usize], "Duplicate value {}", val);
                seen[val as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s), "Not all values 0-63 present");
    }

    #[test]
    fn test_threshold_70_splits_at_gray_180() {
        let mode = Binarization::Threshold(threshold_level(70.0));
        assert!(mode.prints(0, 0, 0));
        assert!(mode.prints(0, 0, 179));
        assert!(!mode.prints(0, 0, 180));
        assert!(!mode.prints(0, 0, 255));
    }

    #[test]
    fn test_threshold_level_clamps() {
        assert_eq!(threshold_level(-10.0), 255);
        assert_eq!(threshold_level(150.0), 0);
    }

    #[test]
    fn test_ordered_extremes() {
        for y in 0..16 {
            for x in 0..16 {
                assert!(Binarization::Ordered.prints(x, y, 0));
                assert!(!Binarization::Ordered.prints(x, y, 255));
            }
        }
    }

    #[test]
    fn test_ordered_mid_gray_prints_about_half() {
        let count = (0..8)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .filter(|&(x, y)| Binarization::Ordered.prints(x, y, 128))
            .count();
        assert!((28..=36).contains(&count), "got {}", count);
    }

    #[test]
    fn test_pack_row_8_pixels() {
        assert_eq!(pack_row(&[true; 8]), vec![0xFF]);
        assert_eq!(pack_row(&[false; 8]), vec![0x00]);
        assert_eq!(
            pack_row(&[true, false, true, false, true, false, true, false]),
            vec![0xAA]
        );
    }

    #[test]
    fn test_pack_row_padding() {
        let packed = pack_row(&[true; 9]);
        assert_eq!(packed, vec![0xFF, 0x80]);
        assert_eq!(pack_row(&[]), Vec::<u8>::new());
    }
}
