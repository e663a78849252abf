//! # nametag - Name Label Printing for Brother QL Printers
//!
//! nametag renders a first and last name onto a 29mm x 90mm label and prints
//! it on a Brother QL label printer. It provides:
//!
//! - **Rendering**: auto-fitted, centered text on a 991x306 grayscale image
//! - **Raster conversion**: Brother QL raster jobs from grayscale images
//! - **Transport**: USB (`usblp`), device file and raw TCP backends
//! - **HTTP**: a `POST /print-label` endpoint for browser front ends
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use nametag::{
//!     dispatch::{Dispatch, PrintDispatcher, PrinterSettings},
//!     printer::BuiltinModelQuery,
//!     render::{FontFile, LabelRenderer},
//! };
//!
//! let renderer = LabelRenderer::new(Arc::new(FontFile::new("arial.ttf")));
//! let label = renderer.render("Jane", "Doe")?;
//!
//! let dispatcher = PrintDispatcher::new(PrinterSettings::default(), Arc::new(BuiltinModelQuery));
//! dispatcher.dispatch(&label)?;
//! # Ok::<(), nametag::NametagError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`render`] | Font fitting and label images |
//! | [`dispatch`] | Model check, conversion and sending |
//! | [`convert`] | Image to raster job conversion |
//! | [`protocol`] | Brother QL raster command builders and status replies |
//! | [`transport`] | Communication backends |
//! | [`printer`] | Model and label tables |
//! | [`server`] | HTTP endpoint |
//! | [`error`] | Error types |

pub mod convert;
pub mod dispatch;
pub mod error;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod server;
pub mod transport;

// Re-exports for convenience
pub use dispatch::{Dispatch, PrintDispatcher, PrinterSettings};
pub use error::NametagError;
pub use render::{LabelRenderer, RenderedLabel};
