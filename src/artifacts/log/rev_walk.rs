//! First-parent history walker
//!
//! Walks the commit chain from a starting commit to its root, following
//! first parents only, and finds the common ancestor two chains share.
//!
//! The walker is generic over a loader function so it can run against the
//! object database or an in-memory graph in tests. The loader returns the
//! first parent of a commit, or `None` for a root.
//!
//! Following only first parents is sufficient for the merge-base question
//! this engine asks: merges always record the pre-merge HEAD as the first
//! parent, so the first-parent chain of any branch head reaches the root
//! through the commits that branch has actually been on.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;

/// Commit chain walker, generic over a first-parent loader
pub struct RevWalk<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Option<ObjectId>>,
{
    parent_loader: ParentLoaderFn,
}

impl<ParentLoaderFn> RevWalk<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Option<ObjectId>>,
{
    pub fn new(parent_loader: ParentLoaderFn) -> Self {
        Self { parent_loader }
    }

    /// The ancestor chain `[oid, parent(oid), ...]`, ending at a root
    pub fn ancestors(&self, oid: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
        let mut chain = Vec::new();
        let mut current = Some(oid.clone());

        while let Some(oid) = current {
            current = (self.parent_loader)(&oid)?;
            chain.push(oid);
        }

        Ok(chain)
    }

    /// First commit in `a`'s chain that also appears in `b`'s chain
    ///
    /// This is the merge base for linear histories and for the two-parent
    /// topologies this engine produces. It is not a lowest-common-ancestor
    /// search over arbitrary DAGs.
    pub fn common_ancestor(&self, a: &ObjectId, b: &ObjectId) -> anyhow::Result<Option<ObjectId>> {
        let ancestors_of_b = self.ancestors(b)?.into_iter().collect::<HashSet<_>>();

        Ok(self
            .ancestors(a)?
            .into_iter()
            .find(|ancestor| ancestors_of_b.contains(ancestor)))
    }
}
