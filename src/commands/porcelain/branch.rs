use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use std::io::Write;

impl Repository {
    /// Create a branch at the current commit
    pub fn create_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        let source_oid = self
            .refs()
            .resolve_head()?
            .ok_or_else(|| anyhow::anyhow!("Cannot create branch: no commits yet"))?;

        self.refs().create_branch(&branch_name, source_oid)?;

        writeln!(self.writer(), "Branch '{}' created", branch_name)?;

        Ok(())
    }

    /// List branches, marking the checked-out one
    pub fn list_branches(&mut self) -> anyhow::Result<()> {
        let current = self.refs().current_branch()?;

        for (name, _) in self.refs().list_branches()? {
            let prefix = if Some(&name) == current.as_ref() {
                "* "
            } else {
                "  "
            };
            writeln!(self.writer(), "{}{}", prefix, name)?;
        }

        Ok(())
    }
}
