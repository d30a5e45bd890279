//! Merge algorithms
//!
//! - `tree_merge`: per-path union of two snapshots with textual conflict
//!   blobs for paths both sides changed

pub mod tree_merge;
