//! # Printer Module
//!
//! What the driver knows about the hardware.
//!
//! ## Modules
//!
//! - [`models`]: Brother QL / PT model table
//! - [`labels`]: DK label sizes
//! - [`query`]: Supported-model listing and the model check

pub mod labels;
pub mod models;
pub mod query;

pub use labels::Label;
pub use models::Model;
pub use query::{BuiltinModelQuery, CommandModelQuery, ModelQuery, ModelSource};
