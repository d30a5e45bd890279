//! Commit history traversal
//!
//! - `rev_walk`: first-parent ancestor chains and the common-ancestor
//!   search used by merge

pub mod rev_walk;
