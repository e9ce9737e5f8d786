//! env::bootstrap
//!
//! Create a virtual environment and explain how to activate it.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::EnvError;

/// Host family, which decides the activation scripts to suggest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Posix,
    Windows,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// `(shell, command)` rows; `{path}` is replaced by the environment path.
    fn activation_rows(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Platform::Posix => &[
                ("bash/zsh", "source {path}/bin/activate"),
                ("fish", "source {path}/bin/activate.fish"),
                ("csh/tcsh", "source {path}/bin/activate.csh"),
                ("PowerShell Core", "{path}/bin/Activate.ps1"),
            ],
            Platform::Windows => &[
                ("cmd.exe", r"{path}\Scripts\activate.bat"),
                ("PowerShell", r"{path}\Scripts\Activate.ps1"),
            ],
        }
    }
}

/// Create a virtual environment at `path` using `python`.
///
/// Runs `<python> -m venv --upgrade-deps <path>`, which installs pip and
/// upgrades it to the latest release.
///
/// # Errors
///
/// Returns `EnvError::Spawn` if the interpreter cannot be started and
/// `EnvError::Failed` if it exits unsuccessfully.
pub fn bootstrap(path: &Path, python: &str) -> Result<(), EnvError> {
    tracing::info!(path = %path.display(), python, "creating virtual environment");
    let status = Command::new(python)
        .args(["-m", "venv", "--upgrade-deps"])
        .arg(path)
        .status()
        .map_err(|source| EnvError::Spawn {
            program: python.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(EnvError::Failed {
            program: python.to_string(),
            path: path.to_path_buf(),
            status,
        });
    }
    Ok(())
}

/// Interpreter inside the environment at `path`.
pub fn interpreter(path: &Path, platform: Platform) -> PathBuf {
    match platform {
        Platform::Posix => path.join("bin").join("python"),
        Platform::Windows => path.join("Scripts").join("python.exe"),
    }
}

/// Render activation instructions for an environment at `path`.
///
/// # Example
///
/// ```
/// use bowl::env::{activation_instructions, Platform};
/// use std::path::Path;
///
/// let text = activation_instructions(Path::new("/work/venv"), Platform::Posix);
/// assert!(text.starts_with("Activate the virtual environment"));
/// assert!(text.contains("source /work/venv/bin/activate.fish"));
/// ```
pub fn activation_instructions(path: &Path, platform: Platform) -> String {
    let path = path.display().to_string();
    let rows = platform.activation_rows();
    let width = rows.iter().map(|(shell, _)| shell.len()).max().unwrap_or(0);

    let mut lines = vec![
        "Activate the virtual environment using the appropriate command for your".to_string(),
        "shell, then try again:".to_string(),
        String::new(),
    ];
    lines.extend(rows.iter().map(|(shell, command)| {
        format!("  {shell:<width$}  |  {}", command.replace("{path}", &path))
    }));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_instructions_list_all_shells() {
        let text = activation_instructions(Path::new("/srv/alley/venv"), Platform::Posix);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "shell, then try again:");
        assert_eq!(lines[2], "");
        assert_eq!(lines.len(), 7);
        assert!(text.contains("bash/zsh         |  source /srv/alley/venv/bin/activate"));
        assert!(text.contains("fish             |  source /srv/alley/venv/bin/activate.fish"));
        assert!(text.contains("csh/tcsh         |  source /srv/alley/venv/bin/activate.csh"));
        assert!(text.contains("PowerShell Core  |  /srv/alley/venv/bin/Activate.ps1"));
        assert!(!text.contains("Scripts"));
    }

    #[test]
    fn windows_instructions_use_scripts_dir() {
        let text = activation_instructions(Path::new("C:/alley/venv"), Platform::Windows);
        assert!(text.contains(r"cmd.exe     |  C:/alley/venv\Scripts\activate.bat"));
        assert!(text.contains(r"PowerShell  |  C:/alley/venv\Scripts\Activate.ps1"));
        assert!(!text.contains("bin/activate"));
    }

    #[test]
    fn interpreter_location() {
        let venv = Path::new("/srv/venv");
        assert_eq!(interpreter(venv, Platform::Posix), venv.join("bin").join("python"));
        assert_eq!(
            interpreter(venv, Platform::Windows),
            venv.join("Scripts").join("python.exe")
        );
    }

    #[test]
    fn missing_interpreter_is_spawn_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = bootstrap(
            &temp.path().join("venv"),
            "bowl-test-no-such-interpreter",
        )
        .unwrap_err();
        assert!(matches!(err, EnvError::Spawn { .. }));
    }
}
