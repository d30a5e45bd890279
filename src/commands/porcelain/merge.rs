use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::log::rev_walk::RevWalk;
use crate::artifacts::merge::tree_merge::{MergeOutcome, TreeMerge};
use crate::artifacts::objects::tree::Tree;
use crate::errors::GoitError;
use std::io::Write;

impl Repository {
    /// Merge a branch into the current branch
    ///
    /// Three outcomes: already up to date (the target is an ancestor),
    /// fast-forward (the current head is an ancestor of the target), or a
    /// true merge producing either a two-parent commit or a conflicted
    /// state that `resolve` finishes later.
    pub async fn merge(&mut self, target: &str) -> anyhow::Result<()> {
        let target = BranchName::try_parse(target.to_string())?;

        if self.refs().merge_head()?.is_some() {
            return Err(GoitError::MergeConflicts.into());
        }

        let current = self.refs().current_branch()?.ok_or_else(|| {
            GoitError::InvalidMergeTarget("cannot merge in detached HEAD state".to_string())
        })?;

        if current == target {
            return Err(GoitError::InvalidMergeTarget(
                "cannot merge branch into itself".to_string(),
            )
            .into());
        }

        if !self.refs().branch_exists(&target) {
            return Err(GoitError::BranchMissing(target.to_string()).into());
        }

        let head_oid = self
            .refs()
            .resolve_head()?
            .ok_or(GoitError::NoCommonAncestor)?;
        let target_oid = self
            .refs()
            .read_branch(&target)?
            .ok_or(GoitError::NoCommonAncestor)?;

        let walk = RevWalk::new(|oid| self.database().first_parent(oid));
        let base_oid = walk
            .common_ancestor(&head_oid, &target_oid)?
            .ok_or(GoitError::NoCommonAncestor)?;

        if base_oid == target_oid {
            writeln!(self.writer(), "Already up to date with {}", target)?;
            return Ok(());
        }

        if base_oid == head_oid {
            self.refs().set_branch(&current, target_oid.clone())?;
            self.apply_tree(&target_oid).await?;

            writeln!(self.writer(), "Fast-forward merge: {} -> {}", target, current)?;
            return Ok(());
        }

        let current_tree = self.database().tree_of_commit(&head_oid)?;
        let target_tree = self.database().tree_of_commit(&target_oid)?;

        let outcome = TreeMerge::new(self.database(), current.as_ref(), target.as_ref())
            .merge(&current_tree, &target_tree)?;

        // the merged snapshot lands in the working tree and index either
        // way; what differs is whether a commit seals it now
        self.write_merged_state(&outcome).await?;

        if outcome.has_conflicts() {
            // the marker must be on disk before control returns
            self.refs().write_merge_head(&target_oid)?;

            for path in &outcome.conflicts {
                writeln!(
                    self.writer(),
                    "CONFLICT (content): Merge conflict in {}",
                    path.display()
                )?;
            }
            writeln!(
                self.writer(),
                "Automatic merge failed; fix conflicts and commit the result with 'goit resolve'"
            )?;

            return Ok(());
        }

        let merged_tree = Tree::from_entries(outcome.entries.clone());
        let tree_oid = self.database().store(&merged_tree)?;

        let commit_oid = self.write_commit(
            vec![head_oid, target_oid],
            tree_oid,
            format!("Merged branch '{}'", target),
        )?;

        writeln!(
            self.writer(),
            "Merge commit created: {}",
            commit_oid.to_short_oid()
        )?;

        Ok(())
    }

    /// Write the merged snapshot to the working tree and the index
    ///
    /// Conflicted paths land with their marker content so the user can
    /// edit them in place; clean paths land resolved. The index mirrors
    /// the whole snapshot, so a later `resolve` always commits a complete
    /// tree.
    async fn write_merged_state(&self, outcome: &MergeOutcome) -> anyhow::Result<()> {
        for (path, oid) in &outcome.entries {
            let blob = self.database().parse_object_as_blob(oid)?;
            self.workspace().write_file(path, blob.content())?;
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;
        index.replace_with(
            outcome
                .entries
                .iter()
                .map(|(path, oid)| (path.clone(), oid.clone())),
        );
        index.write_updates()?;

        Ok(())
    }
}
