//! Domain errors
//!
//! Every failure mode the engine can surface on its own behalf. Plain I/O
//! errors are not wrapped here; they bubble up through `anyhow` with
//! context attached at the call site, and the top level prints a single
//! line to stderr either way.

use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoitError {
    #[error("fatal: not a goit repository (or any of the parent directories)")]
    NotARepository,

    #[error("Already a goit repository")]
    AlreadyInitialized,

    #[error("object {0} not found")]
    ObjectMissing(ObjectId),

    #[error("corrupt object {oid}: {reason}")]
    CorruptObject { oid: ObjectId, reason: String },

    #[error("branch {0} does not exist")]
    BranchMissing(String),

    #[error("Branch '{0}' already exists")]
    BranchExists(String),

    #[error("Invalid branch name: {0}")]
    InvalidName(String),

    #[error("Nothing to commit (create/copy files and use \"goit add\" to track)")]
    NothingToCommit,

    #[error(
        "error: Your local changes would be overwritten by checkout.\nPlease commit your changes before switching branches."
    )]
    DirtyWorkingTree,

    #[error("{0}")]
    InvalidMergeTarget(String),

    #[error("no common ancestor found")]
    NoCommonAncestor,

    #[error("unresolved merge in progress (fix conflicts and run 'goit resolve')")]
    MergeConflicts,

    #[error("no merge in progress")]
    NotMerging,
}
