use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::GoitError;
use std::io::Write;

impl Repository {
    /// Finalize a conflicted merge
    ///
    /// Builds the tree from the current index (resolutions were recorded
    /// there by `add`), commits it with the pre-merge head and MERGE_HEAD
    /// as parents, advances the branch, and only then removes MERGE_HEAD.
    pub async fn resolve(&mut self) -> anyhow::Result<()> {
        let merge_oid = self
            .refs()
            .merge_head()?
            .ok_or(GoitError::NotMerging)?;

        let head_oid = self
            .refs()
            .resolve_head()?
            .ok_or(GoitError::NotMerging)?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        if index.is_empty() {
            return Err(GoitError::NothingToCommit.into());
        }

        let tree = Tree::from_entries(
            index
                .entries()
                .map(|entry| (entry.name.clone(), entry.oid.clone())),
        );
        let tree_oid = self.database().store(&tree)?;

        let message = format!("Merged branch '{}'", self.merge_source_label(&merge_oid)?);
        let commit_oid = self.write_commit(vec![head_oid, merge_oid], tree_oid, message)?;

        // the merge is sealed; the marker may now disappear
        self.refs().clear_merge_head()?;

        let commit = self.database().parse_object_as_commit(&commit_oid)?;
        writeln!(
            self.writer(),
            "[{}] {}",
            commit_oid.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }

    /// A human name for the merged-in commit
    ///
    /// MERGE_HEAD stores only a hash; a branch still pointing at it gives
    /// the message its name, otherwise the short id stands in.
    fn merge_source_label(&self, merge_oid: &ObjectId) -> anyhow::Result<String> {
        let label = self
            .refs()
            .list_branches()?
            .into_iter()
            .find(|(_, oid)| oid == merge_oid)
            .map(|(name, _)| name.to_string())
            .unwrap_or_else(|| merge_oid.to_short_oid());

        Ok(label)
    }
}
