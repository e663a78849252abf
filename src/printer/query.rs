//! # Supported Model Check
//!
//! Before printing, the dispatcher asks the driver which models it supports
//! and refuses to continue when the configured model is not mentioned.
//!
//! The check is plain substring containment on the listing text, so a
//! partial name such as `"QL-8"` passes here and is rejected later when the
//! converter looks the model up exactly.

use std::process::Command;
use std::sync::Arc;

use super::models;
use crate::error::DispatchError;

/// Default command that prints the driver's model listing.
pub const DEFAULT_MODELS_COMMAND: &str = "brother_ql info models";

/// Setting value that selects the built-in model table instead of a command.
pub const BUILTIN_MODELS: &str = "builtin";

/// Source of the supported-model listing.
pub trait ModelQuery: Send + Sync {
    /// Raw listing text.
    fn supported_models(&self) -> Result<String, DispatchError>;
}

/// Runs an external program and returns its standard output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandModelQuery {
    program: String,
    args: Vec<String>,
}

impl CommandModelQuery {
    pub fn new<S: Into<String>>(program: S, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Split a whitespace-separated command line. Returns `None` for an empty line.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for CommandModelQuery {
    fn default() -> Self {
        Self::new("brother_ql", vec!["info".to_string(), "models".to_string()])
    }
}

impl ModelQuery for CommandModelQuery {
    fn supported_models(&self) -> Result<String, DispatchError> {
        log::debug!("Querying supported models with '{}'", self.command_line());

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| {
                DispatchError::ModelQuery(format!("failed to run '{}': {}", self.command_line(), e))
            })?;

        if !output.status.success() {
            return Err(DispatchError::ModelQuery(format!(
                "'{}' exited with {}: {}",
                self.command_line(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Lists the built-in model table without spawning anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinModelQuery;

impl ModelQuery for BuiltinModelQuery {
    fn supported_models(&self) -> Result<String, DispatchError> {
        Ok(models::listing())
    }
}

/// Where the model listing comes from, as chosen by the `models_command` setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Command(CommandModelQuery),
    Builtin,
}

impl ModelSource {
    /// `"builtin"` selects the built-in table, a blank setting the default
    /// command, and anything else is run as a command line.
    pub fn parse(setting: &str) -> Self {
        if setting.trim() == BUILTIN_MODELS {
            return Self::Builtin;
        }
        Self::Command(CommandModelQuery::parse(setting).unwrap_or_default())
    }

    pub fn into_query(self) -> Arc<dyn ModelQuery> {
        match self {
            Self::Command(command) => Arc::new(command),
            Self::Builtin => Arc::new(BuiltinModelQuery),
        }
    }
}

/// Fail with [`DispatchError::UnsupportedModel`] unless `model` appears in the listing.
pub fn check_model(query: &dyn ModelQuery, model: &str) -> Result<(), DispatchError> {
    let supported = query.supported_models()?;
    if supported.contains(model) {
        Ok(())
    } else {
        Err(DispatchError::UnsupportedModel {
            model: model.to_string(),
            supported,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedListing(&'static str);

    impl ModelQuery for FixedListing {
        fn supported_models(&self) -> Result<String, DispatchError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_listed_model_passes() {
        assert!(check_model(&BuiltinModelQuery, "QL-800").is_ok());
    }

    #[test]
    fn test_unlisted_model_carries_full_listing() {
        let listing = "Supported models:\n QL-700\n QL-800\n";
        match check_model(&FixedListing(listing), "QL-9000") {
            Err(err @ DispatchError::UnsupportedModel { .. }) => {
                let msg = err.to_string();
                assert!(msg.contains("not recognized"));
                assert!(msg.contains(listing));
            }
            other => panic!("expected unsupported model, got {:?}", other),
        }
    }

    #[test]
    fn test_check_is_substring_containment() {
        let listing = FixedListing("Supported models:\n QL-800\n");
        assert!(check_model(&listing, "QL-8").is_ok());
        assert!(check_model(&listing, "800").is_ok());
        assert!(check_model(&listing, "ql-800").is_err());
    }

    #[test]
    fn test_model_source_setting() {
        assert_eq!(
            ModelSource::parse(DEFAULT_MODELS_COMMAND),
            ModelSource::Command(CommandModelQuery::default())
        );
        assert_eq!(
            ModelSource::parse("  "),
            ModelSource::Command(CommandModelQuery::default())
        );
        assert_eq!(ModelSource::parse(" builtin "), ModelSource::Builtin);
        assert_eq!(
            ModelSource::parse("/opt/ql/bin/list-models --plain"),
            ModelSource::Command(CommandModelQuery::new(
                "/opt/ql/bin/list-models",
                vec!["--plain".to_string()]
            ))
        );
    }

    #[test]
    fn test_parse_command_line() {
        let query = CommandModelQuery::parse("  brother_ql   info models ").unwrap();
        assert_eq!(query.command_line(), DEFAULT_MODELS_COMMAND);
        assert!(CommandModelQuery::parse("   ").is_none());
    }

    #[test]
    fn test_missing_program_is_query_error() {
        let query = CommandModelQuery::new("nametag-no-such-program-for-tests", vec![]);
        assert!(matches!(
            query.supported_models(),
            Err(DispatchError::ModelQuery(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_stdout_is_returned() {
        let query = CommandModelQuery::new(
            "sh",
            vec!["-c".to_string(), "printf 'Supported models:\\n QL-800\\n'".to_string()],
        );
        assert_eq!(query.supported_models().unwrap(), "Supported models:\n QL-800\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_is_query_error() {
        let query = CommandModelQuery::new("sh", vec!["-c".to_string(), "exit 3".to_string()]);
        match query.supported_models() {
            Err(DispatchError::ModelQuery(msg)) => assert!(msg.contains("exited with")),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
