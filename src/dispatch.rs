//! # Print Dispatcher
//!
//! Takes a rendered label to paper:
//!
//! ```text
//! model check → convert to raster job → open backend → send, wait for printer
//! ```
//!
//! Every step fails with a [`DispatchError`]. Nothing is retried.

use image::GrayImage;
use std::sync::Arc;

use crate::convert::{self, ConvertOptions};
use crate::error::{ConvertError, DispatchError, TransportError};
use crate::printer::models;
use crate::printer::query::{self, ModelQuery};
use crate::render::RenderedLabel;
use crate::transport::{self, Backend, PrinterIdentifier, SendOutcome};

/// Default printer: a QL-800 on USB.
pub const DEFAULT_PRINTER: &str = "usb://0x04f9:0x209b";
pub const DEFAULT_MODEL: &str = "QL-800";

/// Where and how labels are printed.
#[derive(Debug, Clone)]
pub struct PrinterSettings {
    /// Printer identifier, e.g. `usb://0x04f9:0x209b` or `/dev/usb/lp0`.
    pub identifier: String,
    /// Model name as the driver lists it, e.g. `QL-800`.
    pub model: String,
    pub options: ConvertOptions,
}

impl Default for PrinterSettings {
    fn default() -> Self {
        Self {
            identifier: DEFAULT_PRINTER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            options: ConvertOptions::default(),
        }
    }
}

/// Sends rendered labels to a printer.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, label: &RenderedLabel) -> Result<(), DispatchError>;
}

type OpenBackend =
    dyn Fn(&PrinterIdentifier) -> Result<Box<dyn Backend>, TransportError> + Send + Sync;

/// The real dispatcher: model check, conversion and a blocking send.
pub struct PrintDispatcher {
    settings: PrinterSettings,
    models: Arc<dyn ModelQuery>,
    open: Box<OpenBackend>,
}

impl PrintDispatcher {
    pub fn new(settings: PrinterSettings, models: Arc<dyn ModelQuery>) -> Self {
        Self::with_backend(settings, models, transport::open)
    }

    /// Use `open` instead of the identifier-based backends.
    pub fn with_backend<F>(settings: PrinterSettings, models: Arc<dyn ModelQuery>, open: F) -> Self
    where
        F: Fn(&PrinterIdentifier) -> Result<Box<dyn Backend>, TransportError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            settings,
            models,
            open: Box::new(open),
        }
    }

    pub fn settings(&self) -> &PrinterSettings {
        &self.settings
    }

    /// Print one image on the printer at `identifier`, which must be a `model`.
    pub fn dispatch_image(
        &self,
        image: &GrayImage,
        identifier: &str,
        model: &str,
    ) -> Result<(), DispatchError> {
        query::check_model(self.models.as_ref(), model)?;
        let printer_model = models::by_name(model)
            .ok_or_else(|| ConvertError::UnknownModel(model.to_string()))?;

        let job = convert::convert(printer_model, std::slice::from_ref(image), &self.settings.options)?;
        log::debug!("Built {} byte raster job for {}", job.len(), printer_model.name);

        let identifier: PrinterIdentifier = identifier.parse()?;
        let mut backend = (self.open)(&identifier)?;

        match transport::send(backend.as_mut(), &job, true)? {
            SendOutcome::Printed => log::info!("Label printed on {}", identifier),
            SendOutcome::Sent | SendOutcome::Unconfirmed => {
                log::info!("Label sent to {}", identifier)
            }
        }
        Ok(())
    }
}

impl Dispatch for PrintDispatcher {
    fn dispatch(&self, label: &RenderedLabel) -> Result<(), DispatchError> {
        self.dispatch_image(label.image(), &self.settings.identifier, &self.settings.model)
    }
}
