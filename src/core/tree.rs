//! core::tree
//!
//! The command tree built from handler paths.
//!
//! # Architecture
//!
//! The tree is an arena of nodes addressed by [`NodeId`]. Node 0 is the
//! root group. Every other node is reachable both through its parent's
//! ordered child list and through a path index.
//!
//! # Invariants
//!
//! - A node is exactly one of `Group` or `Leaf`
//! - Children of a group keep insertion order (never sorted)
//! - No two nodes share a path
//! - A leaf never has descendants

use std::collections::HashMap;

use thiserror::Error;

use super::types::{CommandPath, TypeError};

/// Two handlers claim overlapping locations in the tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("collision at path '{path}'")]
pub struct PathCollisionError {
    /// The path prefix (or full path) that was already occupied.
    pub path: CommandPath,
}

/// Errors from building a tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("invalid command path: {0}")]
    InvalidPath(#[from] TypeError),

    #[error(transparent)]
    Collision(#[from] PathCollisionError),
}

/// Index of a node inside a [`CommandTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root group.
    pub const ROOT: NodeId = NodeId(0);
}

/// The two node variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandNode<T> {
    /// Internal node with ordered children.
    Group(Vec<NodeId>),
    /// Terminal node bound to one item.
    Leaf(T),
}

/// A named node in the arena.
#[derive(Debug, Clone)]
pub struct Node<T> {
    name: String,
    path: Option<CommandPath>,
    kind: CommandNode<T>,
}

impl<T> Node<T> {
    /// The segment naming this node under its parent. Empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path of the node, `None` for the root.
    pub fn path(&self) -> Option<&CommandPath> {
        self.path.as_ref()
    }

    /// The node variant.
    pub fn kind(&self) -> &CommandNode<T> {
        &self.kind
    }

    /// The bound item if this is a leaf.
    pub fn as_leaf(&self) -> Option<&T> {
        match &self.kind {
            CommandNode::Leaf(item) => Some(item),
            CommandNode::Group(_) => None,
        }
    }

    /// True for group nodes.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, CommandNode::Group(_))
    }
}

/// Command hierarchy with insertion-ordered groups.
///
/// # Example
///
/// ```
/// use bowl::core::tree::CommandTree;
/// use bowl::core::types::CommandPath;
///
/// let mut tree = CommandTree::new();
/// tree.insert(CommandPath::from_identifier("dev_init").unwrap(), "init").unwrap();
/// tree.insert(CommandPath::from_identifier("dev_pytest").unwrap(), "pytest").unwrap();
///
/// let dev = tree.get(&CommandPath::new(["dev"]).unwrap()).unwrap();
/// let names: Vec<&str> = tree.children(dev).map(|n| n.name()).collect();
/// assert_eq!(names, ["init", "pytest"]);
///
/// // A second handler at the same location collides.
/// assert!(tree
///     .insert(CommandPath::from_identifier("dev_init").unwrap(), "again")
///     .is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CommandTree<T> {
    nodes: Vec<Node<T>>,
    index: HashMap<CommandPath, NodeId>,
}

impl<T> Default for CommandTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CommandTree<T> {
    /// Create a tree holding only the empty root group.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                name: String::new(),
                path: None,
                kind: CommandNode::Group(Vec::new()),
            }],
            index: HashMap::new(),
        }
    }

    /// Place `item` as a leaf at `path`.
    ///
    /// Missing groups along the way are created.
    ///
    /// # Errors
    ///
    /// Returns `PathCollisionError` if a strict prefix of `path` is a leaf,
    /// or if `path` itself is already occupied by any node.
    pub fn insert(&mut self, path: CommandPath, item: T) -> Result<NodeId, PathCollisionError> {
        let mut current = NodeId::ROOT;
        for prefix in path.ancestors() {
            current = match self.index.get(&prefix) {
                Some(&id) if self.node(id).is_group() => id,
                Some(_) => return Err(PathCollisionError { path: prefix }),
                None => self.push_child(current, prefix, CommandNode::Group(Vec::new())),
            };
        }

        if self.index.contains_key(&path) {
            return Err(PathCollisionError { path });
        }
        Ok(self.push_child(current, path, CommandNode::Leaf(item)))
    }

    fn push_child(&mut self, parent: NodeId, path: CommandPath, kind: CommandNode<T>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: path.last().to_string(),
            path: Some(path.clone()),
            kind,
        });
        if let CommandNode::Group(children) = &mut self.nodes[parent.0].kind {
            children.push(id);
        }
        self.index.insert(path, id);
        id
    }

    /// The root group.
    pub fn root(&self) -> &Node<T> {
        &self.nodes[NodeId::ROOT.0]
    }

    /// Look up a node by id.
    ///
    /// Ids only come from this tree, so lookups are always in bounds.
    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    /// Look up a node id by path.
    pub fn get(&self, path: &CommandPath) -> Option<NodeId> {
        self.index.get(path).copied()
    }

    /// The item bound at `path`, if that path is a leaf.
    pub fn leaf(&self, path: &CommandPath) -> Option<&T> {
        self.get(path).and_then(|id| self.node(id).as_leaf())
    }

    /// Children of a node in insertion order. Leaves have none.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node<T>> + '_ {
        let ids: &[NodeId] = match &self.node(id).kind {
            CommandNode::Group(children) => children,
            CommandNode::Leaf(_) => &[],
        };
        ids.iter().map(move |child| self.node(*child))
    }

    /// Child ids of a node in insertion order.
    pub fn child_ids(&self, id: NodeId) -> &[NodeId] {
        match &self.node(id).kind {
            CommandNode::Group(children) => children,
            CommandNode::Leaf(_) => &[],
        }
    }

    /// Every leaf with its path, depth-first in insertion order.
    pub fn leaves(&self) -> Vec<(&CommandPath, &T)> {
        let mut out = Vec::new();
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            match (&node.kind, &node.path) {
                (CommandNode::Leaf(item), Some(path)) => out.push((path, item)),
                (CommandNode::Group(children), _) => stack.extend(children.iter().rev()),
                (CommandNode::Leaf(_), None) => {}
            }
        }
        out
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, CommandNode::Leaf(_)))
            .count()
    }

    /// True when no leaf has been inserted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fold `items` into a tree, placing each at the path `path_of` derives.
///
/// # Errors
///
/// Returns `TreeError::InvalidPath` if `path_of` fails and
/// `TreeError::Collision` if two items overlap.
///
/// # Example
///
/// ```
/// use bowl::core::tree::build_tree;
/// use bowl::core::types::CommandPath;
///
/// let tree = build_tree(["a", "b 1", "b 2", "c"], |item| {
///     CommandPath::new(item.split_whitespace())
/// })
/// .unwrap();
/// let top: Vec<&str> = tree.children(tree.get(&CommandPath::new(["b"]).unwrap()).unwrap())
///     .map(|n| n.name())
///     .collect();
/// assert_eq!(top, ["1", "2"]);
/// ```
pub fn build_tree<T, I, F>(items: I, mut path_of: F) -> Result<CommandTree<T>, TreeError>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> Result<CommandPath, TypeError>,
{
    let mut tree = CommandTree::new();
    for item in items {
        let path = path_of(&item)?;
        tracing::trace!(%path, "placing command");
        tree.insert(path, item)?;
    }
    tracing::debug!(commands = tree.len(), "built command tree");
    Ok(tree)
}
