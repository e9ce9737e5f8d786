//! core::naming
//!
//! Naming rules shared by the tree builder and the introspector.
//!
//! # Features
//!
//! - Segment separator used to turn handler identifiers into command paths
//! - Identifier validation for documented parameter names

use super::types::{CommandPath, TypeError};

/// Separator between path segments inside a handler identifier.
///
/// `dev_init` becomes the path `dev init`.
pub const SEGMENT_SEPARATOR: char = '_';

/// Derive the command path of a handler identifier.
///
/// # Example
///
/// ```
/// use bowl::core::naming::path_of_identifier;
///
/// let path = path_of_identifier("dev_init").unwrap();
/// assert_eq!(path.to_string(), "dev init");
/// ```
pub fn path_of_identifier(identifier: &str) -> Result<CommandPath, TypeError> {
    CommandPath::from_identifier(identifier)
}

/// Check whether `text` is a valid identifier.
///
/// An identifier starts with an alphabetic character or `_` and continues
/// with alphanumeric characters or `_`.
///
/// # Example
///
/// ```
/// use bowl::core::naming::is_identifier;
///
/// assert!(is_identifier("lane_count"));
/// assert!(is_identifier("_private"));
/// assert!(!is_identifier("2fast"));
/// assert!(!is_identifier("has space"));
/// assert!(!is_identifier(""));
/// ```
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
