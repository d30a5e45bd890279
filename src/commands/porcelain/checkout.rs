use crate::areas::refs::HeadRef;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::status::inspector::Inspector;
use crate::errors::GoitError;
use std::io::Write;

impl Repository {
    /// Switch the working copy to another branch
    ///
    /// Refuses while anything is staged, modified, or conflicted; then
    /// retargets HEAD, sweeps the working tree, materializes the target
    /// snapshot, and clears the index, in that order, so paths absent on
    /// the target do not survive the switch.
    pub async fn checkout(&mut self, target: &str) -> anyhow::Result<()> {
        let target = BranchName::try_parse(target.to_string())?;

        // the refusal is unconditional, even for the branch already current
        {
            let index = self.index();
            let mut index = index.lock().await;
            index.rehydrate()?;

            let report = Inspector::new(self).report(&index)?;
            if !report.is_clean() {
                return Err(GoitError::DirtyWorkingTree.into());
            }
        }

        if self.refs().current_branch()?.as_ref() == Some(&target) {
            writeln!(self.writer(), "Already on '{}'", target)?;
            return Ok(());
        }

        let target_oid = self
            .refs()
            .read_branch(&target)?
            .ok_or_else(|| GoitError::BranchMissing(target.to_string()))?;

        self.refs().write_head(&HeadRef::Symbolic(target.clone()))?;
        self.apply_tree(&target_oid).await?;

        writeln!(self.writer(), "Switched to branch {}", target)?;

        Ok(())
    }
}
