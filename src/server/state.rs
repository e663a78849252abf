//! Server state and configuration.

use std::path::PathBuf;
use std::sync::Arc;

use crate::dispatch::{Dispatch, PrintDispatcher, PrinterSettings};
use crate::printer::query::DEFAULT_MODELS_COMMAND;
use crate::printer::{ModelQuery, ModelSource};
use crate::render::{FontFile, LabelRenderer};

/// Font used when none is configured.
pub const DEFAULT_FONT: &str = "arial.ttf";

/// Address the server listens on by default.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";

/// Server configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:5000")
    pub listen_addr: String,
    /// Origins allowed to call the API. Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub printer: PrinterSettings,
    /// Path or bare file name of the TrueType font.
    pub font_path: PathBuf,
    /// Command printing the supported-model listing, or `"builtin"` for the
    /// built-in model table.
    pub models_command: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            allowed_origins: Vec::new(),
            printer: PrinterSettings::default(),
            font_path: PathBuf::from(DEFAULT_FONT),
            models_command: DEFAULT_MODELS_COMMAND.to_string(),
        }
    }
}

impl ServerConfig {
    /// The model listing source this configuration asks for.
    pub fn model_source(&self) -> ModelSource {
        ModelSource::parse(&self.models_command)
    }

    pub fn model_query(&self) -> Arc<dyn ModelQuery> {
        self.model_source().into_query()
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub renderer: LabelRenderer,
    pub dispatcher: Arc<dyn Dispatch>,
}

impl AppState {
    pub fn new(config: ServerConfig, renderer: LabelRenderer, dispatcher: Arc<dyn Dispatch>) -> Self {
        Self {
            config,
            renderer,
            dispatcher,
        }
    }

    /// State wired to the configured font file and printer.
    pub fn from_config(config: ServerConfig) -> Self {
        let renderer = LabelRenderer::new(Arc::new(FontFile::new(config.font_path.clone())));
        let dispatcher = Arc::new(PrintDispatcher::new(
            config.printer.clone(),
            config.model_query(),
        ));
        Self::new(config, renderer, dispatcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::CommandModelQuery;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:5000");
        assert_eq!(config.printer.identifier, "usb://0x04f9:0x209b");
        assert_eq!(config.printer.model, "QL-800");
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn test_default_model_check_runs_driver_command() {
        assert_eq!(
            ServerConfig::default().model_source(),
            ModelSource::Command(CommandModelQuery::default())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_configured_command_supplies_listing() {
        let config = ServerConfig {
            models_command: "echo Supported models: QL-9000".to_string(),
            ..Default::default()
        };
        let listing = config.model_query().supported_models().unwrap();
        assert_eq!(listing.trim(), "Supported models: QL-9000");
    }

    #[test]
    fn test_builtin_models_are_opt_in() {
        let config = ServerConfig {
            models_command: "builtin".to_string(),
            ..Default::default()
        };
        assert_eq!(config.model_source(), ModelSource::Builtin);
        let listing = config.model_query().supported_models().unwrap();
        assert!(listing.starts_with("Supported models:"));
        assert!(listing.contains("QL-800"));
    }
}
