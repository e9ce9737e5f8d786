//! env::inspect
//!
//! Virtual environment detection.

use std::ffi::OsString;
use std::path::PathBuf;

/// Variable set by an activated virtual environment.
pub const VIRTUAL_ENV_VAR: &str = "VIRTUAL_ENV";

/// File that marks a directory as a virtual environment.
pub const MARKER_FILE: &str = "pyvenv.cfg";

/// Check the process environment for an active virtual environment.
pub fn is_in_venv() -> bool {
    is_in_venv_with(|name| std::env::var_os(name))
}

/// Check for an active virtual environment using `lookup` to read variables.
///
/// True only when `VIRTUAL_ENV` is set, non-empty, and points at a directory
/// containing `pyvenv.cfg`.
///
/// # Example
///
/// ```
/// use bowl::env::is_in_venv_with;
///
/// assert!(!is_in_venv_with(|_| None));
/// assert!(!is_in_venv_with(|_| Some("".into())));
/// ```
pub fn is_in_venv_with<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<OsString>,
{
    active_venv_with(lookup).is_some()
}

/// Location of the active virtual environment in the process environment.
pub fn active_venv() -> Option<PathBuf> {
    active_venv_with(|name| std::env::var_os(name))
}

/// Location of the active virtual environment, under the same conditions
/// as [`is_in_venv_with`].
pub fn active_venv_with<F>(lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    lookup(VIRTUAL_ENV_VAR)
        .filter(|location| !location.is_empty())
        .map(PathBuf::from)
        .filter(|location| location.join(MARKER_FILE).exists())
}
