use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Report whether staged content differs from the working tree
    ///
    /// The engine reports *that* a file differs and by how many bytes;
    /// rendering a line-level patch is somebody else's job.
    pub async fn diff(&mut self, file_path: Option<&str>) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        match file_path {
            Some(file_path) => {
                let staged = index
                    .entry_by_path(Path::new(file_path))
                    .map(|entry| entry.oid.clone());
                drop(index);
                self.diff_file(Path::new(file_path), staged)?
            }
            None => {
                let staged_entries = index
                    .entries()
                    .map(|entry| (entry.name.clone(), entry.oid.clone()))
                    .collect::<Vec<_>>();
                drop(index);

                if staged_entries.is_empty() {
                    writeln!(self.writer(), "No staged files to diff")?;
                    return Ok(());
                }

                let mut has_changes = false;
                for (path, staged_oid) in staged_entries {
                    if self.file_differs(&path, &staged_oid)? {
                        if !has_changes {
                            writeln!(self.writer(), "Differences found:")?;
                            has_changes = true;
                        }
                        writeln!(
                            self.writer(),
                            "\ndiff --goit a/{} b/{}",
                            path.display(),
                            path.display()
                        )?;
                        self.diff_file(&path, Some(staged_oid))?;
                    }
                }

                if !has_changes {
                    writeln!(self.writer(), "No differences found")?;
                }
            }
        }

        Ok(())
    }

    fn diff_file(
        &self,
        path: &Path,
        staged_oid: Option<ObjectId>,
    ) -> anyhow::Result<()> {
        writeln!(self.writer(), "File: {}", path.display())?;

        let Some(staged_oid) = staged_oid else {
            writeln!(self.writer(), "File not staged")?;
            return Ok(());
        };

        let staged = self.database().parse_object_as_blob(&staged_oid)?;

        if !self.workspace().file_exists(path) {
            writeln!(self.writer(), "Working file deleted or inaccessible")?;
            return Ok(());
        }
        let working = self.workspace().read_file(path)?;

        if staged.content() == working {
            writeln!(self.writer(), "No differences")?;
            return Ok(());
        }

        writeln!(self.writer(), "--- staged version")?;
        writeln!(self.writer(), "+++ working version")?;
        writeln!(
            self.writer(),
            "Files differ (detailed line-by-line diff not implemented)"
        )?;
        writeln!(
            self.writer(),
            "Staged version: {} bytes",
            staged.content().len()
        )?;
        writeln!(self.writer(), "Working version: {} bytes", working.len())?;

        Ok(())
    }

    fn file_differs(
        &self,
        path: &Path,
        staged_oid: &ObjectId,
    ) -> anyhow::Result<bool> {
        if !self.workspace().file_exists(path) {
            return Ok(true);
        }

        let staged = self.database().parse_object_as_blob(staged_oid)?;
        let working = self.workspace().read_file(path)?;

        Ok(staged.content() != working)
    }
}
