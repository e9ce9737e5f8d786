//! dev commands - Development environment and test runner
//!
//! `dev init` makes sure a virtual environment exists and tells the user
//! how to activate it. `dev pytest` runs the test suite with the
//! environment's interpreter.

use std::path::Path;
use std::process::Command;

use crate::cli::handler::{Arguments, Context};
use crate::env::{self, Platform};
use crate::ui::output;
use anyhow::{bail, Context as _, Result};

pub const INIT_DOCUMENTATION: &str = "Prepare for development";

pub const PYTEST_DOCUMENTATION: &str = "Run tests";

/// Prepare for development.
///
/// Inside an active environment this is a no-op. Otherwise the configured
/// environment directory is created unless it already holds one, and
/// activation instructions are printed to stderr.
pub fn init(ctx: &Context, _args: &Arguments) -> Result<()> {
    if env::is_in_venv() {
        output::print("Already inside a virtual environment.", ctx.verbosity);
        return Ok(());
    }

    let venv = ctx.config.venv_dir(&ctx.cwd);
    let header = if venv.join(env::MARKER_FILE).exists() {
        format!("Found an inactive virtual environment at: {}", venv.display())
    } else {
        output::note(output::rule(), ctx.verbosity);
        env::bootstrap(&venv, ctx.config.python()).with_context(|| {
            format!("Failed to create virtual environment at {}", venv.display())
        })?;
        format!("Created a new virtual environment at: {}", venv.display())
    };

    output::note(output::rule(), ctx.verbosity);
    output::note(
        format!(
            "{header}\n\n{}",
            env::activation_instructions(&venv, Platform::current())
        ),
        ctx.verbosity,
    );
    output::note(output::rule(), ctx.verbosity);
    Ok(())
}

/// Run tests.
pub fn pytest(ctx: &Context, _args: &Arguments) -> Result<()> {
    let python = test_interpreter(ctx)?;
    tracing::info!(python = %python, "running pytest");

    let status = Command::new(&python)
        .args(["-m", "pytest"])
        .current_dir(&ctx.cwd)
        .status()
        .with_context(|| format!("Failed to run '{python}'"))?;

    if !status.success() {
        bail!("pytest exited with {status}");
    }
    Ok(())
}

/// Interpreter for the test run: the active environment's, else the
/// configured environment's.
fn test_interpreter(ctx: &Context) -> Result<String> {
    let venv = env::active_venv().unwrap_or_else(|| ctx.config.venv_dir(&ctx.cwd));
    interpreter_in(&venv)
}

fn interpreter_in(venv: &Path) -> Result<String> {
    if !venv.join(env::MARKER_FILE).exists() {
        bail!(
            "No development environment at {}; run `bowl dev init` first",
            venv.display()
        );
    }
    Ok(env::interpreter(venv, Platform::current())
        .display()
        .to_string())
}
