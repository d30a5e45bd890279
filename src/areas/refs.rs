//! References (HEAD, branch heads, MERGE_HEAD)
//!
//! References are human-readable names pointing to commits:
//! - HEAD points at the checked-out branch (`ref: refs/heads/<name>`) or,
//!   when detached, directly at a commit hash
//! - branch heads under `refs/heads/<name>` hold a bare hash
//! - MERGE_HEAD, when present, holds the incoming commit of an in-flight
//!   merge; its existence is the one authoritative merge-in-progress flag
//!
//! Writes take an exclusive advisory lock on the ref file.

use crate::artifacts::branch::branch_name::{BranchName, REF_PREFIX};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GoitError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::collections::HashMap;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: refs/heads/(.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Name of the in-flight merge marker
pub const MERGE_HEAD_REF_NAME: &str = "MERGE_HEAD";

/// A reference value: symbolic into `refs/heads/`, or a bare commit hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadRef {
    Symbolic(BranchName),
    Direct(ObjectId),
}

/// Reference manager rooted at the metadata directory (`.goit`)
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

impl Refs {
    /// Read HEAD
    ///
    /// HEAD always exists after init; a missing file is an error.
    pub fn read_head(&self) -> anyhow::Result<HeadRef> {
        let content = std::fs::read_to_string(self.head_path())
            .context("failed to read HEAD")?;
        let content = content.trim();

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(HeadRef::Symbolic(BranchName::try_parse(
                symref_match[1].to_string(),
            )?))
        } else {
            Ok(HeadRef::Direct(ObjectId::try_parse(content.to_string())?))
        }
    }

    pub fn write_head(&self, head: &HeadRef) -> anyhow::Result<()> {
        let raw_ref = match head {
            HeadRef::Symbolic(branch_name) => {
                format!("ref: {}{}", REF_PREFIX, branch_name)
            }
            HeadRef::Direct(oid) => oid.as_ref().to_string(),
        };

        self.update_ref_file(self.head_path().into_boxed_path(), raw_ref)
    }

    /// Resolve HEAD to a commit hash
    ///
    /// Follows one level of indirection. Returns `None` when HEAD names a
    /// branch that has no commit yet.
    pub fn resolve_head(&self) -> anyhow::Result<Option<ObjectId>> {
        match self.read_head()? {
            HeadRef::Symbolic(branch_name) => self.read_branch(&branch_name),
            HeadRef::Direct(oid) => Ok(Some(oid)),
        }
    }

    /// The checked-out branch, or `None` when HEAD is detached
    pub fn current_branch(&self) -> anyhow::Result<Option<BranchName>> {
        match self.read_head()? {
            HeadRef::Symbolic(branch_name) => Ok(Some(branch_name)),
            HeadRef::Direct(_) => Ok(None),
        }
    }

    /// Head commit of a branch, `None` when the branch file is absent
    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.path.join(branch_name.as_ref_path());

        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {:?}", branch_path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        Ok(Some(ObjectId::try_parse(content.to_string())?))
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.path.join(branch_name.as_ref_path()).exists()
    }

    /// Create a branch pointing at `source_oid`
    ///
    /// Fails when a branch with the same name already exists. Name
    /// validity is enforced by `BranchName::try_parse` upstream.
    pub fn create_branch(&self, name: &BranchName, source_oid: ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(name) {
            return Err(GoitError::BranchExists(name.to_string()).into());
        }

        self.set_branch(name, source_oid)
    }

    /// Unconditionally advance a branch head (commit, merge, resolve)
    pub fn set_branch(&self, name: &BranchName, oid: ObjectId) -> anyhow::Result<()> {
        let branch_path = self.path.join(name.as_ref_path()).into_boxed_path();
        self.update_ref_file(branch_path, oid.as_ref().to_string())
    }

    /// Advance whatever HEAD points at to a new commit
    ///
    /// Through a symbolic HEAD this moves the branch head (creating the
    /// branch file for the first commit); a detached HEAD is rewritten
    /// directly.
    pub fn update_head(&self, oid: ObjectId) -> anyhow::Result<()> {
        match self.read_head()? {
            HeadRef::Symbolic(branch_name) => self.set_branch(&branch_name, oid),
            HeadRef::Direct(_) => self.write_head(&HeadRef::Direct(oid)),
        }
    }

    /// All branches with their head commits, sorted by name
    pub fn list_branches(&self) -> anyhow::Result<Vec<(BranchName, ObjectId)>> {
        let heads_path = self.heads_path();
        if !heads_path.exists() {
            return Ok(Vec::new());
        }

        let mut branches = std::fs::read_dir(&heads_path)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let name = BranchName::try_parse(entry.file_name().to_string_lossy().to_string())
                    .ok()?;
                let oid = self.read_branch(&name).ok()??;
                Some((name, oid))
            })
            .collect::<Vec<_>>();

        branches.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(branches)
    }

    /// Reverse index: commit hash -> refs that point to it
    ///
    /// Branch names plus `HEAD`, used for log decoration.
    pub fn reverse_refs(&self) -> anyhow::Result<HashMap<ObjectId, Vec<String>>> {
        let mut reverse = self.list_branches()?.into_iter().fold(
            HashMap::<ObjectId, Vec<String>>::new(),
            |mut acc, (name, oid)| {
                acc.entry(oid).or_default().push(name.to_string());
                acc
            },
        );

        if let Some(head_oid) = self.resolve_head()? {
            reverse
                .entry(head_oid)
                .or_default()
                .push(HEAD_REF_NAME.to_string());
        }

        Ok(reverse)
    }

    /// The in-flight merge marker, `None` when no merge is in progress
    pub fn merge_head(&self) -> anyhow::Result<Option<ObjectId>> {
        let merge_head_path = self.merge_head_path();

        if !merge_head_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&merge_head_path)
            .context("failed to read MERGE_HEAD")?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    pub fn write_merge_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(
            self.merge_head_path().into_boxed_path(),
            oid.as_ref().to_string(),
        )
    }

    /// Remove MERGE_HEAD; called only after the merge commit and branch
    /// advance are on disk
    pub fn clear_merge_head(&self) -> anyhow::Result<()> {
        std::fs::remove_file(self.merge_head_path()).context("failed to remove MERGE_HEAD")
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    pub fn head_path(&self) -> std::path::PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn merge_head_path(&self) -> std::path::PathBuf {
        self.path.join(MERGE_HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> std::path::PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> std::path::PathBuf {
        self.refs_path().join("heads")
    }
}
