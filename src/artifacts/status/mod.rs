//! Working tree status inspection
//!
//! Compares the working directory against the index and the HEAD commit,
//! classifying every path into exactly one state.
//!
//! ## Components
//!
//! - `file_change`: change kinds and their display labels
//! - `inspector`: the classification logic

pub mod file_change;
pub mod inspector;
