//! cli::dispatch
//!
//! Route a parsed invocation to its handler.
//!
//! # Contract
//!
//! The assembler guarantees that every parsable path is registered and that
//! a leaf's arguments are exactly its handler's parameters. A failure of
//! either guarantee is a defect in the assembler, reported as an error that
//! [`DispatchError::is_defect`] flags, never as a user error.

use std::collections::BTreeMap;

use thiserror::Error;

use super::assemble::Registry;
use super::handler::{Arguments, Context, Handler};
use super::invocation::{ParsedInvocation, COMMAND_MARKER};
use crate::core::types::CommandPath;

/// Errors from dispatching an invocation.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no handler registered for '{0}'")]
    UnresolvedPath(CommandPath),

    #[error(
        "arguments for '{path}' do not match its parameters: expected [{}], got [{}]",
        .expected.join(", "),
        .actual.join(", ")
    )]
    ArgumentMismatch {
        path: CommandPath,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("command '{path}' failed")]
    Handler {
        path: CommandPath,
        #[source]
        source: anyhow::Error,
    },
}

impl DispatchError {
    /// True when the error reveals an inconsistency between parser and
    /// registry rather than a failing command.
    pub fn is_defect(&self) -> bool {
        !matches!(self, DispatchError::Handler { .. })
    }
}

/// Remove routing metadata from an invocation's fields.
pub fn strip_routing(fields: &mut BTreeMap<String, String>) {
    fields.remove(COMMAND_MARKER);
}

/// Order `fields` by the handler's parameters, requiring an exact key match.
fn bind(
    path: &CommandPath,
    handler: &Handler,
    mut fields: BTreeMap<String, String>,
) -> Result<Arguments, DispatchError> {
    let matches = fields.len() == handler.parameters.len()
        && handler.parameters.iter().all(|p| fields.contains_key(*p));
    if !matches {
        return Err(DispatchError::ArgumentMismatch {
            path: path.clone(),
            expected: handler.parameters.iter().map(|p| p.to_string()).collect(),
            actual: fields.into_keys().collect(),
        });
    }

    let pairs = handler
        .parameters
        .iter()
        .filter_map(|p| fields.remove_entry(*p))
        .collect();
    Ok(Arguments::new(pairs))
}

/// Call the handler selected by `invocation`.
///
/// # Errors
///
/// - `UnresolvedPath` if the path is not registered (defect)
/// - `ArgumentMismatch` if the fields are not exactly the handler's
///   parameters after routing metadata is removed (defect)
/// - `Handler` if the handler itself fails
pub fn dispatch(
    invocation: ParsedInvocation,
    registry: &Registry,
    ctx: &Context,
) -> Result<(), DispatchError> {
    let ParsedInvocation { path, mut fields } = invocation;
    let handler = registry
        .get(&path)
        .ok_or_else(|| DispatchError::UnresolvedPath(path.clone()))?;

    strip_routing(&mut fields);
    let arguments = bind(&path, handler, fields)?;

    tracing::debug!(%path, handler = handler.identifier, "dispatching");
    handler
        .call(ctx, &arguments)
        .map_err(|source| DispatchError::Handler { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::assemble::assemble;
    use crate::core::tree::build_tree;
    use anyhow::{bail, Result};
    use clap::Command;
    use std::cell::RefCell;

    thread_local! {
        static CALLS: RefCell<Vec<(&'static str, Vec<(String, String)>)>> =
            const { RefCell::new(Vec::new()) };
    }

    fn record(name: &'static str, args: &Arguments) {
        let pairs = args
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CALLS.with(|calls| calls.borrow_mut().push((name, pairs)));
    }

    fn take_calls() -> Vec<(&'static str, Vec<(String, String)>)> {
        CALLS.with(|calls| calls.borrow_mut().drain(..).collect())
    }

    fn dev_init(_: &Context, args: &Arguments) -> Result<()> {
        record("dev_init", args);
        Ok(())
    }

    fn dev_pytest(_: &Context, args: &Arguments) -> Result<()> {
        record("dev_pytest", args);
        Ok(())
    }

    fn f(_: &Context, args: &Arguments) -> Result<()> {
        record("f", args);
        Ok(())
    }

    fn broken(_: &Context, _: &Arguments) -> Result<()> {
        bail!("pins jammed")
    }

    fn registry(handlers: &[Handler]) -> Registry {
        let tree = build_tree(handlers.iter().copied(), |h| h.path()).unwrap();
        assemble(Command::new("prog"), &tree).unwrap().registry
    }

    fn invocation(path: &[&str], fields: &[(&str, &str)]) -> ParsedInvocation {
        ParsedInvocation::new(
            CommandPath::new(path.iter().copied()).unwrap(),
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn dispatches_grouped_handler_without_arguments() {
        take_calls();
        let registry = registry(&[
            Handler::new("dev_init", "Prepare for development", &[], dev_init),
            Handler::new("dev_pytest", "Run tests", &[], dev_pytest),
        ]);

        dispatch(invocation(&["dev", "init"], &[]), &registry, &Context::default()).unwrap();

        assert_eq!(take_calls(), [("dev_init", Vec::new())]);
    }

    #[test]
    fn passes_exactly_declared_arguments() {
        take_calls();
        let registry = registry(&[Handler::new("f", "", &["a", "b"], f)]);

        let inv = invocation(&["f"], &[("a", "1"), ("b", "2")]);
        assert!(inv.fields.contains_key(COMMAND_MARKER));
        dispatch(inv, &registry, &Context::default()).unwrap();

        assert_eq!(take_calls(), [("f", pairs(&[("a", "1"), ("b", "2")]))]);
    }

    #[test]
    fn arguments_follow_declaration_order() {
        take_calls();
        let registry = registry(&[Handler::new("f", "", &["b", "a"], f)]);

        dispatch(
            invocation(&["f"], &[("a", "1"), ("b", "2")]),
            &registry,
            &Context::default(),
        )
        .unwrap();

        assert_eq!(take_calls(), [("f", pairs(&[("b", "2"), ("a", "1")]))]);
    }

    #[test]
    fn unresolved_path_is_defect() {
        let registry = registry(&[Handler::new("f", "", &[], f)]);
        let err = dispatch(invocation(&["g"], &[]), &registry, &Context::default()).unwrap_err();
        assert!(matches!(err, DispatchError::UnresolvedPath(_)));
        assert!(err.is_defect());
    }

    #[test]
    fn extra_argument_is_defect() {
        take_calls();
        let registry = registry(&[Handler::new("f", "", &["a"], f)]);
        let err = dispatch(
            invocation(&["f"], &[("a", "1"), ("b", "2")]),
            &registry,
            &Context::default(),
        )
        .unwrap_err();

        match &err {
            DispatchError::ArgumentMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, &["a"]);
                assert_eq!(actual, &["a", "b"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.is_defect());
        assert!(take_calls().is_empty());
    }

    #[test]
    fn missing_argument_is_defect() {
        let registry = registry(&[Handler::new("f", "", &["a", "b"], f)]);
        let err = dispatch(
            invocation(&["f"], &[("a", "1")]),
            &registry,
            &Context::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DispatchError::ArgumentMismatch { .. }));
    }

    #[test]
    fn handler_failure_is_not_defect() {
        let registry = registry(&[Handler::new("jam", "", &[], broken)]);
        let err = dispatch(invocation(&["jam"], &[]), &registry, &Context::default()).unwrap_err();
        assert!(!err.is_defect());
        assert_eq!(err.to_string(), "command 'jam' failed");
        assert_eq!(
            format!("{:#}", anyhow::Error::from(err)),
            "command 'jam' failed: pins jammed"
        );
    }

    #[test]
    fn strip_routing_removes_only_marker() {
        let mut fields = invocation(&["f"], &[("a", "1")]).fields;
        strip_routing(&mut fields);
        assert_eq!(fields.into_iter().collect::<Vec<_>>(), pairs(&[("a", "1")]));
    }
}
