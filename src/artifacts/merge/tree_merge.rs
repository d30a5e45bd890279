//! Union tree merge with conflict blobs
//!
//! Classifies the union of two snapshots' paths:
//! - a path on one side only is taken as-is
//! - the same hash on both sides is unchanged
//! - different hashes trigger a per-file merge: byte-identical contents
//!   take the current side, anything else becomes a conflict blob
//!
//! A conflict blob interleaves both versions between marker lines so the
//! user can edit the file in place:
//!
//! ```text
//! ************** <currentBranch>
//! <contentsFromCurrent>
//! =========
//! <contentsFromOther>
//! ************** <otherBranch>
//! ```
//!
//! The planner only writes objects; applying the merged snapshot to the
//! working tree and index is the caller's job.

use crate::areas::database::Database;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Opening/closing marker line prefix of a conflict blob
pub const CONFLICT_MARKER: &str = "**************";

/// Separator between the two sides of a conflict blob
pub const CONFLICT_SEPARATOR: &str = "=========";

/// Result of merging two snapshots
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// The merged snapshot; conflicted paths map to their conflict blob
    pub entries: BTreeMap<PathBuf, ObjectId>,
    /// Paths both sides changed incompatibly
    pub conflicts: BTreeSet<PathBuf>,
}

impl MergeOutcome {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Per-path merge planner between a current and a target snapshot
#[derive(new)]
pub struct TreeMerge<'r> {
    database: &'r Database,
    current_branch: &'r str,
    target_branch: &'r str,
}

impl<'r> TreeMerge<'r> {
    /// Merge the union of both trees' paths
    ///
    /// Conflict blobs are written to the database as a side effect, so
    /// every id in the outcome resolves to a stored object.
    pub fn merge(&self, current_tree: &Tree, target_tree: &Tree) -> anyhow::Result<MergeOutcome> {
        let mut outcome = MergeOutcome::default();

        let paths = current_tree
            .entries()
            .map(|(path, _)| path.clone())
            .chain(target_tree.entries().map(|(path, _)| path.clone()))
            .collect::<BTreeSet<PathBuf>>();

        for path in paths {
            let current_oid = current_tree.entry_by_path(&path);
            let target_oid = target_tree.entry_by_path(&path);

            match (current_oid, target_oid) {
                (Some(oid), None) | (None, Some(oid)) => {
                    outcome.entries.insert(path, oid.clone());
                }
                (Some(current), Some(target)) if current == target => {
                    outcome.entries.insert(path, current.clone());
                }
                (Some(current), Some(target)) => {
                    let merged = self.merge_file(current, target)?;
                    if merged.conflicted {
                        outcome.conflicts.insert(path.clone());
                    }
                    outcome.entries.insert(path, merged.oid);
                }
                (None, None) => unreachable!("path came from one of the trees"),
            }
        }

        Ok(outcome)
    }

    fn merge_file(&self, current: &ObjectId, target: &ObjectId) -> anyhow::Result<MergedFile> {
        let current_blob = self.database.parse_object_as_blob(current)?;
        let target_blob = self.database.parse_object_as_blob(target)?;

        // same bytes under different ids cannot happen with one hash
        // function, but costs nothing to honor
        if current_blob.content() == target_blob.content() {
            return Ok(MergedFile {
                oid: current.clone(),
                conflicted: false,
            });
        }

        let conflict_blob = Blob::new(self.conflict_content(
            current_blob.content(),
            target_blob.content(),
        ));
        let oid = self.database.store(&conflict_blob)?;

        Ok(MergedFile {
            oid,
            conflicted: true,
        })
    }

    fn conflict_content(&self, current_content: &str, target_content: &str) -> String {
        format!(
            "{} {}\n{}{}\n{}{} {}\n",
            CONFLICT_MARKER,
            self.current_branch,
            ensure_trailing_newline(current_content),
            CONFLICT_SEPARATOR,
            ensure_trailing_newline(target_content),
            CONFLICT_MARKER,
            self.target_branch,
        )
    }
}

struct MergedFile {
    oid: ObjectId,
    conflicted: bool,
}

fn ensure_trailing_newline(content: &str) -> String {
    if content.is_empty() || content.ends_with('\n') {
        content.to_string()
    } else {
        format!("{}\n", content)
    }
}
