//! core::types
//!
//! Strong types for command routing.
//!
//! # Types
//!
//! - [`CommandPath`] - Validated, non-empty sequence of command segments
//!
//! # Validation
//!
//! Paths enforce validity at construction time. An empty path or an empty
//! segment cannot be represented.
//!
//! # Examples
//!
//! ```
//! use bowl::core::types::CommandPath;
//!
//! let path = CommandPath::from_identifier("dev_init").unwrap();
//! assert_eq!(path.segments(), ["dev", "init"]);
//! assert_eq!(path.to_string(), "dev init");
//!
//! assert!(CommandPath::from_identifier("dev__init").is_err());
//! assert!(CommandPath::new(Vec::<String>::new()).is_err());
//! ```

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

use super::naming::SEGMENT_SEPARATOR;

/// Errors from type validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("command path cannot be empty")]
    EmptyPath,

    #[error("command path '{0}' contains an empty segment")]
    EmptySegment(String),
}

/// The location of a command in the hierarchy.
///
/// Equality, ordering and hashing are segment-wise. The `Display` form is the
/// CLI spelling: segments joined by a single space.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommandPath(Vec<String>);

impl CommandPath {
    /// Create a path from already split segments.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::EmptyPath` for zero segments and
    /// `TypeError::EmptySegment` if any segment is empty.
    pub fn new<I, S>(segments: I) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(TypeError::EmptyPath);
        }
        if segments.iter().any(String::is_empty) {
            return Err(TypeError::EmptySegment(
                segments.join(&SEGMENT_SEPARATOR.to_string()),
            ));
        }
        Ok(Self(segments))
    }

    /// Derive a path from a handler identifier by splitting on `_`.
    ///
    /// No normalization happens beyond the split.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::EmptySegment` when the identifier is empty or has
    /// leading, trailing or doubled separators.
    pub fn from_identifier(identifier: &str) -> Result<Self, TypeError> {
        let segments: Vec<&str> = identifier.split(SEGMENT_SEPARATOR).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(TypeError::EmptySegment(identifier.to_string()));
        }
        Self::new(segments)
    }

    /// All segments, root first.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The final segment (the leaf name).
    pub fn last(&self) -> &str {
        // Non-empty by construction.
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The path made of the first `len` segments, if `len` is in `1..=self.len()`.
    pub fn prefix(&self, len: usize) -> Option<CommandPath> {
        if len == 0 || len > self.0.len() {
            return None;
        }
        Some(Self(self.0[..len].to_vec()))
    }

    /// Every strict prefix of the path, shortest first.
    ///
    /// `a b c` yields `a` and `a b`.
    pub fn ancestors(&self) -> Vec<CommandPath> {
        (1..self.0.len())
            .map(|len| Self(self.0[..len].to_vec()))
            .collect()
    }

    /// A new path with `segment` appended.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::EmptySegment` if `segment` is empty.
    pub fn child(&self, segment: impl Into<String>) -> Result<CommandPath, TypeError> {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self::new(segments)
    }
}

impl fmt::Display for CommandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

impl Serialize for CommandPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_identifier_splits_on_underscore() {
        let path = CommandPath::from_identifier("dev_pytest").unwrap();
        assert_eq!(path.segments(), ["dev", "pytest"]);
        assert_eq!(path.last(), "pytest");
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn from_identifier_single_segment() {
        let path = CommandPath::from_identifier("bowl").unwrap();
        assert_eq!(path.segments(), ["bowl"]);
    }

    #[test]
    fn from_identifier_rejects_empty_segments() {
        for bad in ["", "_dev", "dev_", "dev__init", "_"] {
            assert_eq!(
                CommandPath::from_identifier(bad),
                Err(TypeError::EmptySegment(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn from_identifier_does_not_normalize() {
        let path = CommandPath::from_identifier("Dev_Init").unwrap();
        assert_eq!(path.segments(), ["Dev", "Init"]);
    }

    #[test]
    fn new_rejects_empty() {
        assert_eq!(
            CommandPath::new(Vec::<String>::new()),
            Err(TypeError::EmptyPath)
        );
        assert!(CommandPath::new(["a", ""]).is_err());
    }

    #[test]
    fn equality_is_segment_wise() {
        let a = CommandPath::new(["two", "a"]).unwrap();
        let b = CommandPath::from_identifier("two_a").unwrap();
        let joined = CommandPath::new(["two a"]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, joined);
    }

    #[test]
    fn prefix_and_child() {
        let path = CommandPath::new(["a", "b", "c"]).unwrap();
        assert_eq!(path.prefix(1).unwrap().segments(), ["a"]);
        assert_eq!(path.prefix(3).unwrap(), path);
        assert!(path.prefix(0).is_none());
        assert!(path.prefix(4).is_none());

        let ancestors: Vec<String> = path.ancestors().iter().map(|p| p.to_string()).collect();
        assert_eq!(ancestors, ["a", "a b"]);
        assert!(CommandPath::new(["a"]).unwrap().ancestors().is_empty());

        let child = path.prefix(2).unwrap().child("c").unwrap();
        assert_eq!(child, path);
        assert!(path.child("").is_err());
    }

    #[test]
    fn display_joins_with_spaces() {
        let path = CommandPath::new(["dev", "init"]).unwrap();
        assert_eq!(path.to_string(), "dev init");
    }
}
