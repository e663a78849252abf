//! # Label Catalog
//!
//! Brother DK media sizes. Dot counts are at 300 DPI across the tape
//! (`printable.0`) and along the feed direction (`printable.1`, 0 for
//! endless rolls).
//!
//! ```text
//!  29x90 die-cut, as fed through the printer:
//!
//!  ├ right margin 6 ┼──── 306 printable ────┼──── unused ────┤
//!  │                │                        │                │ ▲
//!  │                │         991 rows       │                │ │ feed
//! ```

/// Shape of the media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFactor {
    /// Continuous roll, length set by the image.
    Endless,
    /// Pre-cut labels on a backing sheet.
    DieCut,
}

/// One label size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    /// Identifier, e.g. "29x90" or "62".
    pub name: &'static str,
    /// Tape width and label length in mm (length 0 for endless).
    pub tape_size: (u8, u8),
    pub form_factor: FormFactor,
    /// Printable dots across and along the tape.
    pub printable: (u32, u32),
    /// Blank dots between the printable area and the right edge of the raster line.
    pub right_margin: u32,
    /// Feed margin in dots, sent with `ESC i d`.
    pub feed_margin: u16,
}

impl Label {
    const fn endless(name: &'static str, width_mm: u8, dots: u32, right_margin: u32) -> Self {
        Self {
            name,
            tape_size: (width_mm, 0),
            form_factor: FormFactor::Endless,
            printable: (dots, 0),
            right_margin,
            feed_margin: 35,
        }
    }

    const fn die_cut(
        name: &'static str,
        tape_size: (u8, u8),
        printable: (u32, u32),
        right_margin: u32,
    ) -> Self {
        Self {
            name,
            tape_size,
            form_factor: FormFactor::DieCut,
            printable,
            right_margin,
            feed_margin: 0,
        }
    }

    /// Landscape canvas size for text laid out along the label's length.
    ///
    /// ```
    /// use nametag::printer::labels;
    ///
    /// let label = labels::by_name("29x90").unwrap();
    /// assert_eq!(label.landscape_size(), Some((991, 306)));
    /// ```
    pub fn landscape_size(&self) -> Option<(u32, u32)> {
        match self.form_factor {
            FormFactor::DieCut => Some((self.printable.1, self.printable.0)),
            FormFactor::Endless => None,
        }
    }
}

pub const LABELS: &[Label] = &[
    Label::endless("12", 12, 106, 29),
    Label::endless("29", 29, 306, 6),
    Label::endless("38", 38, 413, 12),
    Label::endless("50", 50, 554, 12),
    Label::endless("54", 54, 590, 0),
    Label::endless("62", 62, 696, 12),
    Label::die_cut("17x54", (17, 54), (165, 566), 0),
    Label::die_cut("17x87", (17, 87), (165, 956), 0),
    Label::die_cut("23x23", (23, 23), (202, 202), 42),
    Label::die_cut("29x42", (29, 42), (306, 425), 6),
    Label::die_cut("29x90", (29, 90), (306, 991), 6),
    Label::die_cut("39x90", (38, 90), (413, 991), 12),
    Label::die_cut("39x48", (39, 48), (425, 495), 6),
    Label::die_cut("52x29", (52, 29), (578, 271), 0),
    Label::die_cut("62x29", (62, 29), (696, 271), 12),
    Label::die_cut("62x100", (62, 100), (696, 1109), 12),
];

pub fn by_name(name: &str) -> Option<&'static Label> {
    LABELS.iter().find(|l| l.name == name)
}
