//! cli
//!
//! Command-line interface layer for bowl.
//!
//! # Responsibilities
//!
//! - Turn the static handler table into a clap parser and a registry
//! - Parse the command line into a [`ParsedInvocation`]
//! - Dispatch the invocation to its handler and map the outcome to an exit code
//!
//! # Lifecycle
//!
//! Registration, parse and dispatch each happen once per process:
//!
//! ```text
//! HANDLERS -> build_tree -> assemble -> (Command, Registry)
//! argv -> parse_invocation -> ParsedInvocation -> dispatch -> handler
//! ```
//!
//! # Exit codes
//!
//! - `0` success, `--help`, `--version`
//! - `1` a command failed
//! - `2` usage error (reported by clap)
//! - `70` internal error: the handler table or the parser is inconsistent

pub mod assemble;
pub mod commands;
pub mod dispatch;
pub mod handler;
pub mod invocation;

pub use assemble::{assemble, AssembleError, Assembly, Registry};
pub use dispatch::{dispatch, DispatchError};
pub use handler::{Arguments, Context, Handler};
pub use invocation::{parse_invocation, GlobalOptions, ParsedInvocation, COMMAND_MARKER};

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, Command};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::core::config::{Config, PrinterKind};
use crate::core::tree::{build_tree, TreeError};
use crate::ui::output::{self, Verbosity};
use crate::ui::printer::printer_for;

/// Program name used in usage and help text.
pub const PROGRAM: &str = "bowl";

/// Exit code for a failed command.
pub const EXIT_FAILURE: u8 = 1;

/// Exit code for internal errors (`EX_SOFTWARE`).
pub const EXIT_INTERNAL: u8 = 70;

/// Errors from building the parser.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to build command tree: {0}")]
    Tree(#[from] TreeError),

    #[error("failed to assemble parser: {0}")]
    Assemble(#[from] AssembleError),
}

/// The root command with global options and no subcommands yet.
pub fn root_command() -> Command {
    Command::new(PROGRAM)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Bowling alley management")
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug logging and print the parsed invocation")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Read configuration from this file")
                .value_parser(value_parser!(PathBuf)),
        )
}

/// Build the parser and registry for the built-in command table.
pub fn build() -> Result<Assembly, BuildError> {
    build_with(commands::HANDLERS)
}

/// Build the parser and registry for an arbitrary handler table.
pub fn build_with(handlers: &[Handler]) -> Result<Assembly, BuildError> {
    let tree = build_tree(handlers.iter().copied(), |h| h.path())?;
    Ok(assemble(root_command(), &tree)?)
}

/// Install the tracing subscriber on stderr.
///
/// `RUST_LOG` overrides the level derived from the flags. A subscriber that
/// is already installed is kept.
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the CLI application with `args` (program name first).
///
/// This is the main entry point called from `main.rs`.
pub fn run<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    run_with(commands::HANDLERS, args)
}

/// Run with an arbitrary handler table.
///
/// The flags are unknown until the parser exists, so a construction error
/// is logged at the default level.
pub fn run_with<I, T>(handlers: &[Handler], args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let Assembly { command, registry } = match build_with(handlers) {
        Ok(assembly) => assembly,
        Err(err) => {
            init_tracing(Verbosity::Normal);
            tracing::error!(error = %err, "failed to build command parser");
            output::error(format!("internal error: {err}"));
            return ExitCode::from(EXIT_INTERNAL);
        }
    };

    let (globals, invocation) = match parse_invocation(command, args) {
        Ok(parsed) => parsed,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(2));
        }
    };

    let verbosity = Verbosity::from_flags(globals.quiet, globals.debug);
    init_tracing(verbosity);

    let ctx = match context(&globals, verbosity) {
        Ok(ctx) => ctx,
        Err(err) => {
            output::error(format!("{err:#}"));
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let printer = match ctx.config.printer() {
        PrinterKind::None if globals.debug => PrinterKind::Plain,
        kind => kind,
    };
    let handler = registry.get(&invocation.path);
    if let Err(err) = printer_for(printer).render(&invocation, handler, &mut std::io::stderr()) {
        tracing::warn!(error = %err, "failed to print invocation");
    }

    match dispatch(invocation, &registry, &ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_defect() => {
            tracing::error!(error = %err, "dispatch contract violated");
            output::error(format!("internal error: {err}"));
            ExitCode::from(EXIT_INTERNAL)
        }
        Err(err) => {
            output::error(format!("{:#}", anyhow::Error::from(err)));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Build the handler context from global options and configuration files.
fn context(globals: &GlobalOptions, verbosity: Verbosity) -> anyhow::Result<Context> {
    use anyhow::Context as _;

    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let config = Config::load(globals.config.as_deref(), Some(&cwd))?;
    Ok(Context {
        cwd,
        verbosity,
        config,
    })
}
