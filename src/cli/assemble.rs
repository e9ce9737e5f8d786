//! cli::assemble
//!
//! Build a clap parser and a dispatch registry from a command tree.
//!
//! # Architecture
//!
//! The tree is walked recursively. Every group becomes a clap subcommand that
//! requires one of its children; every leaf becomes a subcommand with one
//! required positional argument per handler parameter. Children are added in
//! tree order, so help output lists commands in registration order.
//!
//! The [`Registry`] is filled during the same walk, which keeps the set of
//! parsable paths and the set of dispatchable paths identical.

use std::collections::{HashMap, HashSet};

use clap::{value_parser, Arg, ArgAction, Command};
use thiserror::Error;

use super::handler::Handler;
use super::invocation::COMMAND_MARKER;
use crate::core::naming::is_identifier;
use crate::core::tree::{CommandNode, CommandTree, Node, NodeId};
use crate::core::types::CommandPath;

/// Parameter names clap or the dispatcher already use.
pub const RESERVED_PARAMETERS: &[&str] = &["help", COMMAND_MARKER];

/// Errors from assembling the parser.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssembleError {
    #[error("handler '{identifier}' has invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        identifier: String,
        parameter: String,
        reason: &'static str,
    },
}

/// Read-only mapping from full command path to handler.
///
/// Entries keep the order of the tree walk, which is registration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<(CommandPath, Handler)>,
    index: HashMap<CommandPath, usize>,
}

impl Registry {
    /// Resolve a path.
    pub fn get(&self, path: &CommandPath) -> Option<&Handler> {
        self.index.get(path).map(|&i| &self.entries[i].1)
    }

    /// All registered paths in registration order.
    pub fn paths(&self) -> impl Iterator<Item = &CommandPath> + '_ {
        self.entries.iter().map(|(path, _)| path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn register(&mut self, path: CommandPath, handler: Handler) {
        self.index.insert(path.clone(), self.entries.len());
        self.entries.push((path, handler));
    }
}

/// A parser and the registry that matches it.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub command: Command,
    pub registry: Registry,
}

/// Attach every node of `tree` below `root`.
///
/// # Errors
///
/// Returns `AssembleError::InvalidParameter` for a parameter that is not an
/// identifier, is declared twice, or is reserved.
pub fn assemble(root: Command, tree: &CommandTree<Handler>) -> Result<Assembly, AssembleError> {
    let mut registry = Registry::default();
    let command = add_group(root, tree, NodeId::ROOT, &mut registry)?;
    tracing::debug!(commands = registry.len(), "assembled parser");
    Ok(Assembly { command, registry })
}

fn add_group(
    group: Command,
    tree: &CommandTree<Handler>,
    id: NodeId,
    registry: &mut Registry,
) -> Result<Command, AssembleError> {
    let mut group = group
        .subcommand_required(true)
        .disable_help_subcommand(true)
        .subcommand_help_heading("Subcommands");

    for &child_id in tree.child_ids(id) {
        let child = tree.node(child_id);
        let subcommand = match child.kind() {
            CommandNode::Group(_) => add_group(
                Command::new(child.name().to_string()),
                tree,
                child_id,
                registry,
            )?,
            CommandNode::Leaf(handler) => add_leaf(child, handler, registry)?,
        };
        group = group.subcommand(subcommand);
    }
    Ok(group)
}

fn add_leaf(
    node: &Node<Handler>,
    handler: &Handler,
    registry: &mut Registry,
) -> Result<Command, AssembleError> {
    check_parameters(handler)?;
    let signature = handler.signature();

    let mut leaf = Command::new(node.name().to_string());
    if !signature.description.is_empty() {
        leaf = leaf.about(signature.description);
    }
    for spec in signature.arguments {
        let mut arg = Arg::new(spec.name)
            .required(true)
            .action(ArgAction::Set)
            .value_parser(value_parser!(String));
        if let Some(help) = spec.help {
            arg = arg.help(help);
        }
        leaf = leaf.arg(arg);
    }

    if let Some(path) = node.path() {
        registry.register(path.clone(), *handler);
    }
    Ok(leaf)
}

fn check_parameters(handler: &Handler) -> Result<(), AssembleError> {
    let mut seen = HashSet::new();
    for &parameter in handler.parameters {
        let reason = if !is_identifier(parameter) {
            Some("not an identifier")
        } else if RESERVED_PARAMETERS.contains(&parameter) {
            Some("reserved name")
        } else if !seen.insert(parameter) {
            Some("declared more than once")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(AssembleError::InvalidParameter {
                identifier: handler.identifier.to_string(),
                parameter: parameter.to_string(),
                reason,
            });
        }
    }
    Ok(())
}
