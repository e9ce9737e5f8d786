//! cli::invocation
//!
//! Turning clap matches into a [`ParsedInvocation`].
//!
//! clap reports the selected subcommand one level at a time. The chain is
//! flattened here into a [`CommandPath`], and the leaf's argument values
//! are copied into a flat field map together with the `COMMAND` routing
//! marker.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgMatches, Command};
use serde::Serialize;

use crate::core::types::CommandPath;

/// Field naming the selected leaf segment. Routing metadata, never an argument.
pub const COMMAND_MARKER: &str = "COMMAND";

/// Options accepted by the root command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    pub debug: bool,
    pub quiet: bool,
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            debug: flag(matches, "debug"),
            quiet: flag(matches, "quiet"),
            config: matches
                .try_get_one::<PathBuf>("config")
                .ok()
                .flatten()
                .cloned(),
        }
    }
}

fn flag(matches: &ArgMatches, id: &str) -> bool {
    matches
        .try_get_one::<bool>(id)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}

/// The user's selection: a path plus every supplied field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedInvocation {
    /// Full path of the selected leaf.
    pub path: CommandPath,
    /// Argument values plus routing metadata.
    pub fields: BTreeMap<String, String>,
}

impl ParsedInvocation {
    /// Build an invocation, adding the routing marker for `path`.
    pub fn new(path: CommandPath, arguments: BTreeMap<String, String>) -> Self {
        let mut fields = arguments;
        fields.insert(COMMAND_MARKER.to_string(), path.last().to_string());
        Self { path, fields }
    }
}

/// Match `args` (program name first) against `command`.
///
/// # Errors
///
/// Returns the clap error for usage problems, `--help` and `--version`.
/// The caller decides how to print it; `exit_code()` is 0 for help and
/// version and 2 for usage errors.
pub fn parse_invocation<I, T>(
    command: Command,
    args: I,
) -> Result<(GlobalOptions, ParsedInvocation), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut command = command;
    let matches = command.try_get_matches_from_mut(args)?;
    let globals = GlobalOptions::from_matches(&matches);

    let mut segments = Vec::new();
    let mut current = &matches;
    while let Some((name, sub)) = current.subcommand() {
        segments.push(name.to_string());
        current = sub;
    }
    let path = CommandPath::new(segments)
        .map_err(|e| command.error(ErrorKind::MissingSubcommand, e.to_string()))?;

    let mut arguments = BTreeMap::new();
    for id in current.ids() {
        if let Ok(Some(value)) = current.try_get_one::<String>(id.as_str()) {
            arguments.insert(id.to_string(), value.clone());
        }
    }

    tracing::debug!(%path, fields = arguments.len(), "parsed invocation");
    Ok((globals, ParsedInvocation::new(path, arguments)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_adds_routing_marker() {
        let path = CommandPath::new(["two", "a"]).unwrap();
        let invocation = ParsedInvocation::new(
            path.clone(),
            BTreeMap::from([("a".to_string(), "1".to_string())]),
        );
        assert_eq!(invocation.path, path);
        assert_eq!(invocation.fields.get(COMMAND_MARKER).map(String::as_str), Some("a"));
        assert_eq!(invocation.fields.get("a").map(String::as_str), Some("1"));
    }

    #[test]
    fn serializes_path_as_segments() {
        let invocation =
            ParsedInvocation::new(CommandPath::new(["dev", "init"]).unwrap(), BTreeMap::new());
        let json = serde_json::to_value(&invocation).unwrap();
        assert_eq!(json["path"], serde_json::json!(["dev", "init"]));
        assert_eq!(json["fields"]["COMMAND"], "init");
    }
}
