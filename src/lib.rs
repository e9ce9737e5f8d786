//! Bowl - a bowling alley CLI whose command tree is derived from a handler table
//!
//! Every command is a plain function registered under an identifier such as
//! `dev_init`. Identifiers are split on `_` into command paths, the paths are
//! assembled into a tree of clap subcommands, and each parsed invocation is
//! dispatched straight back to the function that declared it.
//!
//! # Architecture
//!
//! - [`core`] - Command paths, the command tree, documentation introspection, configuration
//! - [`cli`] - Parser assembly, invocation parsing, dispatch, and the built-in commands
//! - [`env`] - Python virtual environment inspection and bootstrapping
//! - [`ui`] - Console output and invocation printers
//!
//! # Invariants
//!
//! 1. Distinct identifiers never share a command path
//! 2. Every parsable path resolves to exactly one handler
//! 3. A handler receives exactly the arguments it declared

pub mod cli;
pub mod core;
pub mod env;
pub mod ui;
