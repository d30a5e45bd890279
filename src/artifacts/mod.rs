//! Data structures and algorithms
//!
//! - `branch`: validated branch names
//! - `log`: commit history traversal
//! - `merge`: union tree merge and conflict blobs
//! - `objects`: object types (blob, tree, commit) and hashing
//! - `status`: working tree classification

pub mod branch;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
