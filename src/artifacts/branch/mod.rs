//! Branch naming
//!
//! Branch names are validated at the parse boundary so that hash strings,
//! paths, and ref names cannot be confused further in. A name is invalid
//! when it is empty or contains a `/` or any whitespace.

pub mod branch_name;

/// Regex matching characters that are not allowed in branch names
pub const INVALID_BRANCH_NAME_REGEX: &str = r"[/\s]";
