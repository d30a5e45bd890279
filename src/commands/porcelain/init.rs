use crate::areas::refs::HeadRef;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::GoitError;
use anyhow::Context;
use std::fs;
use std::io::Write;

/// Name of the branch HEAD points at after init
pub const DEFAULT_BRANCH: &str = "main";

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.goit_path().exists() {
            return Err(GoitError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .goit/objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .goit/refs/heads directory")?;

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs().write_head(&HeadRef::Symbolic(default_branch))?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;
        index.write_updates()?;

        writeln!(self.writer(), "Initialized empty goit repository")?;

        Ok(())
    }
}
