//! # Brother QL Raster Protocol
//!
//! Low-level command builders and reply parsing for Brother QL label
//! printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Raster-mode commands (initialize, print info, cut, raster lines)
//! - [`packbits`]: Raster line compression
//! - [`status`]: 32-byte status replies
//!
//! ## Usage Example
//!
//! ```
//! use nametag::protocol::commands;
//!
//! let mut data = Vec::new();
//! data.extend(commands::invalidate(200));
//! data.extend(commands::initialize());
//! data.extend(commands::switch_to_raster());
//! data.extend(commands::raster_line(&[0x00; 90], false));
//! data.extend(commands::print_page(true));
//!
//! assert_eq!(data.len(), 200 + 2 + 4 + 93 + 1);
//! ```

pub mod commands;
pub mod packbits;
pub mod status;
