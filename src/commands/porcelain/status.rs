use crate::areas::repository::Repository;
use crate::artifacts::status::inspector::Inspector;
use std::io::Write;

impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        let branch_label = self
            .refs()
            .current_branch()?
            .map(|name| name.to_string())
            .unwrap_or_else(|| "HEAD".to_string());

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let report = Inspector::new(self).report(&index)?;
        drop(index);

        writeln!(self.writer(), "On branch {}\n", branch_label)?;

        if !report.staged.is_empty() {
            writeln!(self.writer(), "Changes to be committed:")?;
            for (path, change) in &report.staged {
                writeln!(self.writer(), "  {}{}", change.label(), path.display())?;
            }
            writeln!(self.writer())?;
        }

        if !report.conflicted.is_empty() {
            writeln!(self.writer(), "Unmerged paths:")?;
            for path in &report.conflicted {
                writeln!(self.writer(), "  both modified:   {}", path.display())?;
            }
            writeln!(self.writer())?;
        }

        if !report.unstaged.is_empty() {
            writeln!(self.writer(), "Changes not staged for commit:")?;
            for path in &report.unstaged {
                writeln!(self.writer(), "  modified:   {}", path.display())?;
            }
            writeln!(self.writer())?;
        }

        if !report.untracked.is_empty() {
            writeln!(self.writer(), "Untracked files:")?;
            for path in &report.untracked {
                writeln!(self.writer(), "  {}", path.display())?;
            }
            writeln!(self.writer())?;
            writeln!(
                self.writer(),
                "Use 'goit add <file>' to include in what will be committed"
            )?;
        }

        if report.is_empty() {
            writeln!(self.writer(), "nothing to commit, working tree clean")?;
        }

        Ok(())
    }
}
