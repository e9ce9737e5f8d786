//! core
//!
//! Core types and algorithms for building the command hierarchy.
//!
//! # Modules
//!
//! - [`types`] - Strong types: CommandPath
//! - [`naming`] - Identifier rules and the segment separator
//! - [`tree`] - Arena-backed command tree and collision detection
//! - [`introspect`] - Descriptions and argument help from documentation
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid paths at construction time
//! - Tree order is registration order, never sorted
//! - Nothing here knows about clap

pub mod config;
pub mod introspect;
pub mod naming;
pub mod tree;
pub mod types;
