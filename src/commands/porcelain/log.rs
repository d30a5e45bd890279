use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::collections::HashMap;
use std::io::Write;

/// Output shape of the history listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Detailed,
    Compact,
}

impl Repository {
    /// Walk the first-parent chain from HEAD, newest first
    pub fn log(&mut self, format: LogFormat) -> anyhow::Result<()> {
        let Some(head_oid) = self.refs().resolve_head()? else {
            writeln!(self.writer(), "Unable to read HEAD")?;
            return Ok(());
        };

        let reverse_refs = self.refs().reverse_refs()?;
        let current_branch = self
            .refs()
            .current_branch()?
            .map(|name| name.to_string());

        let mut next = Some(head_oid);
        while let Some(oid) = next {
            let commit = self.database().parse_object_as_commit(&oid)?;
            let decorations = self.format_refs(&oid, &reverse_refs, current_branch.as_deref());

            match format {
                LogFormat::Detailed => self.print_detailed(&oid, &commit, &decorations)?,
                LogFormat::Compact => self.print_compact(&oid, &commit, &decorations)?,
            }

            next = commit.parent().cloned();
        }

        Ok(())
    }

    /// Refs pointing at a commit, colored: HEAD and the current branch in
    /// bold blue, other branches in magenta
    fn format_refs(
        &self,
        oid: &ObjectId,
        reverse_refs: &HashMap<ObjectId, Vec<String>>,
        current_branch: Option<&str>,
    ) -> Option<String> {
        let refs = reverse_refs.get(oid)?;

        let mut head_refs = Vec::new();
        let mut local_refs = Vec::new();
        for name in refs {
            if name == "HEAD" {
                head_refs.push(name.as_str().bold().blue().to_string());
            } else if Some(name.as_str()) == current_branch {
                local_refs.push(name.as_str().bold().blue().to_string());
            } else {
                local_refs.push(name.as_str().magenta().to_string());
            }
        }

        Some(
            head_refs
                .into_iter()
                .chain(local_refs)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    fn print_detailed(
        &self,
        oid: &ObjectId,
        commit: &Commit,
        decorations: &Option<String>,
    ) -> anyhow::Result<()> {
        let bullet = "●".yellow();
        let bar = "|".yellow();

        writeln!(
            self.writer(),
            "{} Commit: {}",
            bullet,
            oid.as_ref().yellow().bold()
        )?;
        writeln!(
            self.writer(),
            "{} Date:   {}",
            bar,
            commit.timestamp().format("%d/%m/%Y %H:%M")
        )?;
        writeln!(self.writer(), "{} Title:  {}", bar, commit.short_message())?;
        if let Some(refs) = decorations {
            writeln!(self.writer(), "{} Refs:   {}", bar, refs)?;
        }
        writeln!(self.writer(), "{}", bar)?;

        Ok(())
    }

    fn print_compact(
        &self,
        oid: &ObjectId,
        commit: &Commit,
        decorations: &Option<String>,
    ) -> anyhow::Result<()> {
        let bullet = "●".yellow();
        let short_oid = oid.to_short_oid().yellow().bold().to_string();

        match decorations {
            Some(refs) => writeln!(
                self.writer(),
                "{} {} {} ({})",
                bullet,
                short_oid,
                commit.short_message(),
                refs
            )?,
            None => writeln!(
                self.writer(),
                "{} {} {}",
                bullet,
                short_oid,
                commit.short_message()
            )?,
        }
        writeln!(self.writer(), "{}", "|".yellow())?;

        Ok(())
    }
}
