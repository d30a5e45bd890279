//! Status inspection logic
//!
//! Classifies every path into exactly one of conflicted, staged-new,
//! staged-modified, unstaged-modified, untracked, or clean, in that
//! priority order:
//!
//! 1. conflicted: a merge is in progress and the working bytes still
//!    carry both conflict markers
//! 2. staged: the index differs from the HEAD tree
//! 3. unstaged: the working bytes hash differently from the expected
//!    version (index entry if present, HEAD tree entry otherwise)
//! 4. untracked: on disk but unknown to both index and HEAD tree
//!
//! A working file that cannot be read (deleted, not UTF-8) is skipped
//! rather than reported.

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::merge::tree_merge::{CONFLICT_MARKER, CONFLICT_SEPARATOR};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::{IndexChangeType, StatusReport};
use derive_new::new;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Working tree classifier
#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    /// Classify the whole working tree
    pub fn report(&self, index: &Index) -> anyhow::Result<StatusReport> {
        let mut report = StatusReport::default();

        let head_tree = self.repository.head_tree()?;
        let merging = self.repository.refs().merge_head()?.is_some();

        let tracked = index
            .entries()
            .map(|entry| entry.name.clone())
            .chain(head_tree.entries().map(|(path, _)| path.clone()))
            .collect::<BTreeSet<PathBuf>>();

        if merging {
            for path in &tracked {
                if self.has_conflict_markers(path)? {
                    report.conflicted.insert(path.clone());
                }
            }
        }

        for entry in index.entries() {
            if report.conflicted.contains(&entry.name) {
                continue;
            }

            match head_tree.entry_by_path(&entry.name) {
                None => {
                    report.staged.insert(entry.name.clone(), IndexChangeType::Added);
                }
                Some(head_oid) if head_oid != &entry.oid => {
                    report
                        .staged
                        .insert(entry.name.clone(), IndexChangeType::Modified);
                }
                Some(_) => {}
            }
        }

        for path in &tracked {
            if report.conflicted.contains(path) || report.staged.contains_key(path) {
                continue;
            }

            let expected = index
                .entry_by_path(path)
                .map(|entry| &entry.oid)
                .or_else(|| head_tree.entry_by_path(path));

            let Some(expected) = expected else { continue };

            if let Some(working_oid) = self.working_oid(path)?
                && &working_oid != expected
            {
                report.unstaged.insert(path.clone());
            }
        }

        for path in self.repository.workspace().list_files(None)? {
            if !tracked.contains(&path) {
                report.untracked.insert(path);
            }
        }

        Ok(report)
    }

    /// Hash of the working bytes at `path`, `None` when unreadable
    fn working_oid(&self, path: &Path) -> anyhow::Result<Option<ObjectId>> {
        if !self.repository.workspace().file_exists(path) {
            return Ok(None);
        }

        match self.repository.workspace().read_file(path) {
            Ok(content) => Ok(Some(Blob::new(content).object_id()?)),
            Err(_) => Ok(None),
        }
    }

    fn has_conflict_markers(&self, path: &Path) -> anyhow::Result<bool> {
        if !self.repository.workspace().file_exists(path) {
            return Ok(false);
        }

        match self.repository.workspace().read_file(path) {
            Ok(content) => {
                Ok(content.contains(CONFLICT_MARKER) && content.contains(CONFLICT_SEPARATOR))
            }
            Err(_) => Ok(false),
        }
    }
}
