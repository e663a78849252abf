//! # Brother QL Raster Commands
//!
//! Command builders for the raster protocol spoken by Brother QL label
//! printers. Every function returns the exact bytes for one command.
//!
//! ## Job Layout
//!
//! ```text
//! 00 00 ... 00        invalidate (200 or 400 NULs)
//! ESC @               initialize
//! ESC i S             status information request
//! ESC i a 01          switch to raster mode
//! ESC i z ...         print information (media, quality, raster line count)
//! ESC i M 40          auto cut on
//! ESC i A 01          cut every label
//! ESC i K 08          expanded mode: cut at end
//! ESC i d 00 00       feed margin
//! M 00|02             compression mode
//! g 00 n d1..dn       one raster line (repeated)
//! 1A                  print, last page
//! ```
//!
//! ## Byte Order
//!
//! Multi-byte integers are **little-endian**.
//!
//! ## Reference
//!
//! Brother "Raster Command Reference" for the QL-800/810W/820NWB series.

use super::packbits;

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// Media type byte for continuous-length tape.
pub const MEDIA_ENDLESS: u8 = 0x0A;

/// Media type byte for die-cut labels.
pub const MEDIA_DIE_CUT: u8 = 0x0B;

/// Valid-flag bits of the print information command.
pub mod print_info_flags {
    pub const KIND: u8 = 0x02;
    pub const WIDTH: u8 = 0x04;
    pub const LENGTH: u8 = 0x08;
    pub const QUALITY: u8 = 0x40;
    pub const RECOVER: u8 = 0x80;
}

/// Encode a u16 as little-endian bytes.
#[inline]
pub fn u16_le(n: u16) -> [u8; 2] {
    n.to_le_bytes()
}

/// # Invalidate
///
/// A run of NUL bytes that flushes any partially received command so the
/// printer starts from a clean state.
pub fn invalidate(count: usize) -> Vec<u8> {
    vec![0x00; count]
}

/// # Initialize (ESC @)
///
/// | Format | Bytes |
/// |--------|-------|
/// | ASCII  | ESC @ |
/// | Hex    | 1B 40 |
pub fn initialize() -> Vec<u8> {
    vec![ESC, b'@']
}

/// # Status Information Request (ESC i S)
///
/// The printer answers with a 32-byte status reply.
pub fn status_request() -> Vec<u8> {
    vec![ESC, b'i', b'S']
}

/// # Switch Dynamic Command Mode (ESC i a 01)
///
/// Selects raster mode. Older models only speak raster and reject this.
pub fn switch_to_raster() -> Vec<u8> {
    vec![ESC, b'i', b'a', 0x01]
}

/// Parameters of the print information command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintInfo {
    pub media_type: Option<u8>,
    /// Tape width in mm.
    pub media_width: Option<u8>,
    /// Label length in mm, 0 for endless.
    pub media_length: Option<u8>,
    /// Number of raster lines that follow.
    pub raster_lines: u32,
    pub high_quality: bool,
    /// Whether this is the first page of the job.
    pub first_page: bool,
}

/// # Print Information (ESC i z n1..n10)
///
/// | Byte | Meaning |
/// |------|---------|
/// | n1 | valid flags (recover, kind, width, length, quality) |
/// | n2 | media type |
/// | n3 | media width (mm) |
/// | n4 | media length (mm) |
/// | n5..n8 | raster line count, u32 LE |
/// | n9 | 0 = first page, 1 = other pages |
/// | n10 | fixed 0 |
pub fn print_information(info: &PrintInfo) -> Vec<u8> {
    use print_info_flags::*;

    let mut flags = RECOVER;
    if info.media_type.is_some() {
        flags |= KIND;
    }
    if info.media_width.is_some() {
        flags |= WIDTH;
    }
    if info.media_length.is_some() {
        flags |= LENGTH;
    }
    if info.high_quality {
        flags |= QUALITY;
    }

    let mut cmd = Vec::with_capacity(13);
    cmd.extend_from_slice(&[ESC, b'i', b'z', flags]);
    cmd.push(info.media_type.unwrap_or(0));
    cmd.push(info.media_width.unwrap_or(0));
    cmd.push(info.media_length.unwrap_or(0));
    cmd.extend_from_slice(&info.raster_lines.to_le_bytes());
    cmd.push(if info.first_page { 0 } else { 1 });
    cmd.push(0);
    cmd
}

/// # Various Mode Settings (ESC i M n)
///
/// Bit 6 enables the automatic cutter.
pub fn auto_cut(enabled: bool) -> Vec<u8> {
    vec![ESC, b'i', b'M', if enabled { 0x40 } else { 0x00 }]
}

/// # Cut Every N Labels (ESC i A n)
pub fn cut_every(labels: u8) -> Vec<u8> {
    vec![ESC, b'i', b'A', labels]
}

/// # Expanded Mode (ESC i K n)
///
/// | Bit | Meaning |
/// |-----|---------|
/// | 3 | cut at end |
/// | 6 | 600 dpi (high resolution) |
pub fn expanded_mode(cut_at_end: bool, dpi_600: bool) -> Vec<u8> {
    let mut flags = 0u8;
    if cut_at_end {
        flags |= 0x08;
    }
    if dpi_600 {
        flags |= 0x40;
    }
    vec![ESC, b'i', b'K', flags]
}

/// # Specify Margin Amount (ESC i d n1 n2)
///
/// Feed amount in dots, u16 LE.
pub fn margins(dots: u16) -> Vec<u8> {
    let [lo, hi] = u16_le(dots);
    vec![ESC, b'i', b'd', lo, hi]
}

/// # Select Compression Mode (M n)
///
/// 0x00 = none, 0x02 = TIFF (PackBits).
pub fn compression(enabled: bool) -> Vec<u8> {
    vec![b'M', if enabled { 0x02 } else { 0x00 }]
}

/// # Raster Graphics Transfer (g 00 n d1..dn)
///
/// One line of packed dots, optionally PackBits-compressed.
///
/// ```
/// use nametag::protocol::commands::raster_line;
///
/// let line = raster_line(&[0xFF; 90], false);
/// assert_eq!(&line[..3], &[b'g', 0x00, 90]);
/// assert_eq!(line.len(), 93);
///
/// let packed = raster_line(&[0x00; 90], true);
/// assert_eq!(packed, vec![b'g', 0x00, 2, 0xA7, 0x00]);
/// ```
pub fn raster_line(row: &[u8], compressed: bool) -> Vec<u8> {
    let payload = if compressed {
        packbits::encode(row)
    } else {
        row.to_vec()
    };
    debug_assert!(payload.len() <= u8::MAX as usize, "raster line too long");

    let mut cmd = Vec::with_capacity(3 + payload.len());
    cmd.push(b'g');
    cmd.push(0x00);
    cmd.push(payload.len() as u8);
    cmd.extend(payload);
    cmd
}

/// # Print (FF / Ctrl-Z)
///
/// `0x1A` prints and feeds the last page; `0x0C` prints an intermediate page.
pub fn print_page(last_page: bool) -> Vec<u8> {
    vec![if last_page { 0x1A } else { 0x0C }]
}
