use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::GoitError;
use std::io::Write;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        // a conflicted merge has exactly one exit: resolve
        if self.refs().merge_head()?.is_some() {
            return Err(GoitError::MergeConflicts.into());
        }

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

        let parent = self.refs().resolve_head()?;
        let is_root = match parent {
            Some(_) => "",
            None => "(root-commit) ",
        };

        let commit_oid = self.write_commit(
            parent.into_iter().collect(),
            tree_oid,
            message.trim().to_string(),
        )?;

        index.clear();
        index.write_updates()?;

        let commit = self.database().parse_object_as_commit(&commit_oid)?;
        writeln!(
            self.writer(),
            "[{}{}] {}",
            is_root,
            commit_oid.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }

    /// Store a commit and advance whatever HEAD points at
    ///
    /// The object write happens strictly before the ref write; for a
    /// merge commit the caller passes both parents with the pre-merge
    /// HEAD first.
    pub(crate) fn write_commit(
        &self,
        parents: Vec<ObjectId>,
        tree_oid: ObjectId,
        message: String,
    ) -> anyhow::Result<ObjectId> {
        let commit = Commit::new(parents, tree_oid, chrono::Utc::now(), message);
        let commit_oid = self.database().store(&commit)?;

        self.refs().update_head(commit_oid.clone())?;

        Ok(commit_oid)
    }
}
