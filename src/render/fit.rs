//! # Font Size Fitting
//!
//! Picks the largest font size at which a line of text fits inside the label,
//! and computes where to put it so it looks centered.
//!
//! Nothing in here touches pixels. Glyph measurement goes through the
//! [`TextMeasure`] trait, so the search can be exercised with a fake font.
//!
//! ## Search
//!
//! ```text
//! 120 → 115 → 110 → ... → 25   first size whose ink box fits wins
//!                            20   used when nothing above it fits
//! ```

/// Largest candidate font size (em size in pixels).
pub const MAX_FONT_SIZE: u32 = 120;

/// Smallest font size ever used. Text at this size may overflow the label.
pub const MIN_FONT_SIZE: u32 = 20;

/// Distance between candidate sizes.
pub const FONT_SIZE_STEP: u32 = 5;

/// Ink bounding box of a line of text, relative to the text origin.
///
/// The origin is the left edge of the line at the ascender, so `top` is
/// usually positive (the gap between the ascender line and the tallest
/// glyph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBounds {
    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Vertical line metrics of a font at a given size, both as positive pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMetrics {
    /// Distance from the ascender line to the baseline.
    pub ascent: i32,
    /// Distance from the baseline to the descender line.
    pub descent: i32,
}

/// Anything that can report the ink box of a string at a font size.
pub trait TextMeasure {
    fn measure(&self, text: &str, size: u32) -> TextBounds;
}

/// The area text is allowed to occupy on a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitBox {
    pub width: u32,
    pub height: u32,
}

impl FitBox {
    /// 95% of the label width by 90% of its height, truncated.
    ///
    /// ```
    /// use nametag::render::fit::FitBox;
    ///
    /// let fit = FitBox::for_label(991, 306);
    /// assert_eq!((fit.width, fit.height), (941, 275));
    /// ```
    pub fn for_label(width: u32, height: u32) -> Self {
        Self {
            width: width * 95 / 100,
            height: height * 90 / 100,
        }
    }

    /// Whether a measured box fits in both dimensions.
    pub fn contains(&self, bounds: &TextBounds) -> bool {
        bounds.width() <= self.width as i32 && bounds.height() <= self.height as i32
    }
}

/// Candidate sizes above the floor, largest first.
pub fn candidate_sizes() -> impl Iterator<Item = u32> {
    (MIN_FONT_SIZE + FONT_SIZE_STEP..=MAX_FONT_SIZE)
        .rev()
        .step_by(FONT_SIZE_STEP as usize)
}

/// Choose the font size for `text`.
///
/// Returns the largest candidate in `candidate_sizes()` whose measured box
/// fits `fit`, or [`MIN_FONT_SIZE`] when none does.
pub fn choose_font_size<M: TextMeasure + ?Sized>(measure: &M, text: &str, fit: FitBox) -> u32 {
    candidate_sizes()
        .find(|&size| fit.contains(&measure.measure(text, size)))
        .unwrap_or(MIN_FONT_SIZE)
}

/// Compute the drawing origin that centers text on a canvas.
///
/// Horizontally the ink width is centered. Vertically the font's
/// `ascent - descent` height is centered and then shifted up by the ink box's
/// top offset. Both divisions floor, so overflowing text gets a negative
/// origin rather than a rounded one.
pub fn center_origin(
    canvas_width: u32,
    canvas_height: u32,
    bounds: &TextBounds,
    metrics: LineMetrics,
) -> (i32, i32) {
    let x = (canvas_width as i32 - bounds.width()).div_euclid(2);
    let visual_height = metrics.ascent - metrics.descent;
    let y = (canvas_height as i32 - visual_height).div_euclid(2) - bounds.top;
    (x, y)
}
