//! core::introspect
//!
//! Derive command descriptions and argument help from handler documentation.
//!
//! # Documentation format
//!
//! The first line is the one-line description. Any later line of the form
//! `<identifier>: <text>` documents the parameter named `<identifier>`:
//!
//! ```text
//! Roll one frame
//!
//! lane: lane number to bowl on
//! pins: pins left standing
//! ```
//!
//! Missing or malformed documentation never fails; it only yields commands
//! and arguments without help text.

use std::collections::HashMap;

use super::naming::is_identifier;

/// One positional argument of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    /// Parameter identifier, also the argument id.
    pub name: String,
    /// Help text from the documentation, if any.
    pub help: Option<String>,
}

impl ArgumentSpec {
    /// An argument without help text.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: None,
        }
    }
}

/// Description and ordered arguments of one handler.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    /// First documentation line, empty when undocumented.
    pub description: String,
    /// One entry per parameter, in declaration order.
    pub arguments: Vec<ArgumentSpec>,
}

/// Split a documentation line into a parameter name and its help text.
///
/// The line is split at the first colon; both sides are trimmed and the left
/// side must be an identifier.
///
/// # Example
///
/// ```
/// use bowl::core::introspect::parse_help_line;
///
/// assert_eq!(parse_help_line("  lane: lane number "), Some(("lane", "lane number")));
/// assert_eq!(parse_help_line("no marker"), None);
/// assert_eq!(parse_help_line("two words: nope"), None);
/// ```
pub fn parse_help_line(line: &str) -> Option<(&str, &str)> {
    let (left, right) = line.split_once(':')?;
    let left = left.trim();
    is_identifier(left).then(|| (left, right.trim()))
}

/// Build the signature of a handler from its documentation and parameters.
///
/// # Example
///
/// ```
/// use bowl::core::introspect::introspect;
///
/// let sig = introspect("Prepare for development\n\nlane: which lane", &["lane", "pins"]);
/// assert_eq!(sig.description, "Prepare for development");
/// assert_eq!(sig.arguments[0].help.as_deref(), Some("which lane"));
/// assert_eq!(sig.arguments[1].help, None);
/// ```
pub fn introspect(documentation: &str, parameters: &[&str]) -> Signature {
    let mut lines = documentation.lines();
    let description = lines.next().map(str::trim).unwrap_or_default().to_string();

    // Last occurrence wins.
    let mut help: HashMap<&str, &str> = HashMap::new();
    for line in lines {
        if let Some((name, text)) = parse_help_line(line) {
            help.insert(name, text);
        }
    }

    let arguments = parameters
        .iter()
        .map(|name| ArgumentSpec {
            name: (*name).to_string(),
            help: help.get(name).map(|text| (*text).to_string()),
        })
        .collect();

    Signature {
        description,
        arguments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_parameters() {
        let sig = introspect("This function has no parameters", &[]);
        assert_eq!(sig.description, "This function has no parameters");
        assert!(sig.arguments.is_empty());
    }

    #[test]
    fn parameters_without_details() {
        let sig = introspect(
            "This function has parameters but does not explain them",
            &["a", "b", "c"],
        );
        assert_eq!(
            sig.description,
            "This function has parameters but does not explain them"
        );
        assert_eq!(
            sig.arguments,
            vec![
                ArgumentSpec::bare("a"),
                ArgumentSpec::bare("b"),
                ArgumentSpec::bare("c")
            ]
        );
    }

    #[test]
    fn parameters_with_details() {
        let doc = "This function has parameters with details in docstring

        a: help message for a
        b: help message for b
        c: help message for c";
        let sig = introspect(doc, &["a", "b", "c"]);
        assert_eq!(
            sig.description,
            "This function has parameters with details in docstring"
        );
        let expected: Vec<ArgumentSpec> = ["a", "b", "c"]
            .iter()
            .map(|name| ArgumentSpec {
                name: name.to_string(),
                help: Some(format!("help message for {name}")),
            })
            .collect();
        assert_eq!(sig.arguments, expected);
    }

    #[test]
    fn description_is_first_line() {
        let sig = introspect("Prepare for development", &[]);
        assert_eq!(sig.description, "Prepare for development");
    }

    #[test]
    fn missing_documentation_degrades() {
        let sig = introspect("", &["a"]);
        assert_eq!(sig.description, "");
        assert_eq!(sig.arguments, vec![ArgumentSpec::bare("a")]);
    }

    #[test]
    fn last_help_line_wins() {
        let sig = introspect("desc\na: first\na: second", &["a"]);
        assert_eq!(sig.arguments[0].help.as_deref(), Some("second"));
    }

    #[test]
    fn unknown_names_are_ignored() {
        let sig = introspect("desc\nz: not a parameter\nb: for b", &["a", "b"]);
        assert_eq!(
            sig.arguments,
            vec![
                ArgumentSpec::bare("a"),
                ArgumentSpec {
                    name: "b".into(),
                    help: Some("for b".into()),
                },
            ]
        );
    }

    #[test]
    fn first_line_is_not_scanned_for_help() {
        let sig = introspect("a: looks like help", &["a"]);
        assert_eq!(sig.description, "a: looks like help");
        assert_eq!(sig.arguments, vec![ArgumentSpec::bare("a")]);
    }

    #[test]
    fn help_line_parsing() {
        for line in ["", "no marker", ": empty left", "1x: digit first"] {
            assert_eq!(parse_help_line(line), None, "{line:?}");
        }
        assert_eq!(
            parse_help_line("example: a description"),
            Some(("example", "a description"))
        );
        assert_eq!(
            parse_help_line("url: http://example.com"),
            Some(("url", "http://example.com"))
        );
        assert_eq!(parse_help_line("empty:"), Some(("empty", "")));
    }
}
