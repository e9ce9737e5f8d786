//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware message printing
//! - [`printer`] - Debug rendering of a parsed invocation
//!
//! # Design
//!
//! Command results go to stdout; diagnostics, warnings and debug
//! rendering go to stderr so they never mix with machine-readable output.

pub mod output;
pub mod printer;
