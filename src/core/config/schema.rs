//! core::config::schema
//!
//! Configuration schema types.
//!
//! The same schema is used for the global file and the project file
//! (`bowl.toml`); project values override global ones field by field.
//!
//! # Validation
//!
//! Config values are validated after parsing: strings that name a program
//! or a directory cannot be empty.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// How the parsed invocation is rendered before dispatch.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PrinterKind {
    /// Do not render anything.
    #[default]
    None,
    /// Human-readable lines on stderr.
    Plain,
    /// One JSON object on stderr.
    Json,
}

/// Configuration file contents.
///
/// # Example
///
/// ```toml
/// python = "python3"
/// venv_dir = "venv"
/// printer = "plain"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Interpreter used to create and run the development environment
    pub python: Option<String>,

    /// Development environment directory, relative to the working directory
    /// unless absolute
    pub venv_dir: Option<PathBuf>,

    /// Debug printer for the parsed invocation
    pub printer: Option<PrinterKind>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(python) = &self.python {
            if python.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "python cannot be empty".to_string(),
                ));
            }
        }

        if let Some(dir) = &self.venv_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "venv_dir cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn merged(self, other: FileConfig) -> FileConfig {
        FileConfig {
            python: other.python.or(self.python),
            venv_dir: other.venv_dir.or(self.venv_dir),
            printer: other.printer.or(self.printer),
        }
    }
}
