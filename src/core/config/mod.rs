//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file (`bowl.toml` in the working directory)
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. The `--config <path>` flag, if given (must exist)
//! 2. `$BOWL_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/bowl/config.toml`
//! 4. `~/.bowl/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use bowl::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(None, Some(Path::new("."))).unwrap();
//! println!("Interpreter: {}", config.python());
//! println!("Environment: {}", config.venv_dir(Path::new(".")).display());
//! ```

pub mod schema;

pub use schema::{FileConfig, PrinterKind};

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Name of the project config file.
pub const PROJECT_CONFIG_FILE: &str = "bowl.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("config file '{0}' does not exist")]
    Missing(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Effective values after precedence is applied
    pub values: FileConfig,
    /// Files that contributed, lowest precedence first
    loaded_from: Vec<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// `explicit` replaces the global search when given. `project_dir` is
    /// searched for a `bowl.toml` overlay.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or if any config file
    /// exists but cannot be read, parsed or validated. Missing files found
    /// by searching are not an error (defaults are used).
    pub fn load(
        explicit: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<Config, ConfigError> {
        let mut values = FileConfig::default();
        let mut loaded_from = Vec::new();

        let global_path = match explicit {
            Some(path) if path.exists() => Some(path.to_path_buf()),
            Some(path) => return Err(ConfigError::Missing(path.to_path_buf())),
            None => Self::find_global(),
        };

        if let Some(path) = global_path {
            values = values.merged(Self::read_file(&path)?);
            loaded_from.push(path);
        }

        if let Some(dir) = project_dir {
            let path = dir.join(PROJECT_CONFIG_FILE);
            if path.exists() {
                values = values.merged(Self::read_file(&path)?);
                loaded_from.push(path);
            }
        }

        tracing::debug!(files = ?loaded_from, "loaded configuration");
        Ok(Config {
            values,
            loaded_from,
        })
    }

    /// Search the standard global locations.
    fn find_global() -> Option<PathBuf> {
        global_candidates(|name| std::env::var_os(name), dirs::home_dir())
            .into_iter()
            .find(|path| path.exists())
    }

    /// Read, parse and validate one config file.
    fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Interpreter for the development environment.
    ///
    /// Defaults to `python3` on POSIX and `python` on Windows.
    pub fn python(&self) -> &str {
        self.values
            .python
            .as_deref()
            .unwrap_or(if cfg!(windows) { "python" } else { "python3" })
    }

    /// Development environment directory resolved against `cwd`.
    ///
    /// Defaults to `<cwd>/venv`.
    pub fn venv_dir(&self, cwd: &Path) -> PathBuf {
        match &self.values.venv_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.join("venv"),
        }
    }

    /// Debug printer. Defaults to none.
    pub fn printer(&self) -> PrinterKind {
        self.values.printer.unwrap_or_default()
    }

    /// Files that contributed to this configuration.
    pub fn loaded_from(&self) -> &[PathBuf] {
        &self.loaded_from
    }
}

/// Global config locations in search order.
///
/// Empty variables are treated as unset, and a relative `XDG_CONFIG_HOME`
/// is ignored.
fn global_candidates<F>(lookup: F, home: Option<PathBuf>) -> Vec<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    let var = |name: &str| lookup(name).filter(|value: &OsString| !value.is_empty());
    [
        var("BOWL_CONFIG").map(PathBuf::from),
        var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|dir| dir.is_absolute())
            .map(|dir| dir.join("bowl").join("config.toml")),
        home.map(|home| home.join(".bowl").join("config.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}
