//! env
//!
//! Isolated development environment support.
//!
//! # Responsibilities
//!
//! - Detect whether the process runs inside a Python virtual environment
//! - Create a new environment with pip installed and dependencies upgraded
//! - Render activation instructions for the host's shells
//!
//! These are collaborators of the `dev` commands; the command builder does
//! not depend on them.

mod bootstrap;
mod inspect;

pub use bootstrap::{activation_instructions, bootstrap, interpreter, Platform};
pub use inspect::{
    active_venv, active_venv_with, is_in_venv, is_in_venv_with, MARKER_FILE, VIRTUAL_ENV_VAR,
};

use std::path::PathBuf;

use thiserror::Error;

/// Errors from environment operations.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status} while creating '{path}'")]
    Failed {
        program: String,
        path: PathBuf,
        status: std::process::ExitStatus,
    },
}
