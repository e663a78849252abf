//! # Error Types
//!
//! Each stage of the print pipeline has its own error enum so the HTTP layer
//! can tell a bad font apart from a missing printer. [`NametagError`] wraps
//! them all for the command-line front end.

use thiserror::Error;

/// Errors from the label renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The font resource could not be found or parsed.
    #[error("Failed to create label image: {0}")]
    Font(String),

    /// PNG encoding of a rendered label failed.
    #[error("Image error: {0}")]
    Image(String),
}

/// Errors raised while turning an image into raster instructions.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The label identifier is not in the label catalog.
    #[error("Unknown label '{0}'")]
    UnknownLabel(String),

    /// The model identifier is not in the model table.
    #[error("Unknown model '{0}'")]
    UnknownModel(String),

    /// The image does not match the printable area of the label.
    #[error("Bad image dimensions: {width}x{height}. Image must be {expected}.")]
    Dimensions {
        width: u32,
        height: u32,
        expected: String,
    },

    /// The printer cannot honour a requested option.
    #[error("Unsupported option for {model}: {option}")]
    Unsupported { model: String, option: String },

    /// Any other invalid conversion parameter.
    #[error("Invalid parameter: {0}")]
    Invalid(String),
}

/// Transport-level errors (device lookup, connection, I/O).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The printer identifier could not be parsed.
    #[error("Invalid printer identifier '{0}'")]
    Identifier(String),

    /// No device matched the identifier.
    #[error("Device not found: {0}")]
    NotFound(String),

    /// The printer reported an error in a status reply.
    #[error("Printer reported: {0}")]
    Printer(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the print dispatcher.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The model string is absent from the driver's model listing.
    #[error("Error: Model '{model}' not recognized. Supported models:\n{supported}")]
    UnsupportedModel { model: String, supported: String },

    /// The model listing itself could not be obtained.
    #[error("Error checking models: {0}")]
    ModelQuery(String),

    #[error("Error printing label: {0}")]
    Convert(#[from] ConvertError),

    #[error("Error printing label: {0}")]
    Transport(#[from] TransportError),
}

/// Top-level error type for the binary and the library's composite operations.
#[derive(Debug, Error)]
pub enum NametagError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Server startup or runtime failure.
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
