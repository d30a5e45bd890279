use crate::areas::index::{Index, IndexEntry};
use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use std::io::Write;
use std::path::{Path, PathBuf};

impl Repository {
    /// Stage files: hash the working bytes, store the blob, record the
    /// `(path, hash)` pair in the index
    ///
    /// `.` stages every non-ignored regular file. While a merge is in
    /// progress every add is recorded unconditionally; re-adding a path
    /// is the mechanism by which a conflict resolution enters the index.
    /// Outside a merge, re-adding bytes that match both the index and the
    /// last commit is a no-op.
    pub async fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        let head_tree = self.head_tree()?;
        let merging = self.refs().merge_head()?.is_some();
        let mut staged_count = 0usize;

        for file_path in paths {
            let expanded = if file_path == "." {
                self.workspace().list_files(None)?
            } else {
                let path = PathBuf::from(file_path);
                if self.workspace().ignore().is_ignored(&path)
                    || !self.workspace().file_exists(&path)
                {
                    // a missing or denylisted path is skipped, not fatal
                    writeln!(self.writer(), "Ignoring {}", path.display())?;
                    continue;
                }
                vec![path]
            };

            for path in expanded {
                let Ok(content) = self.workspace().read_file(&path) else {
                    continue;
                };

                let blob = Blob::new(content);
                let blob_oid = blob.object_id()?;

                if !merging && self.is_already_staged(&index, &head_tree, &path, &blob_oid) {
                    continue;
                }

                self.database().store(&blob)?;
                index.add(IndexEntry::new(path.clone(), blob_oid));
                staged_count += 1;

                writeln!(self.writer(), "Added {}", path.display())?;
            }
        }

        if staged_count == 0 {
            writeln!(self.writer(), "no changes")?;
        }

        index.write_updates()?;

        Ok(())
    }

    fn is_already_staged(
        &self,
        index: &Index,
        head_tree: &Tree,
        path: &Path,
        blob_oid: &ObjectId,
    ) -> bool {
        let staged = index
            .entry_by_path(path)
            .is_some_and(|entry| &entry.oid == blob_oid);
        let committed = head_tree
            .entry_by_path(path)
            .is_some_and(|oid| oid == blob_oid);

        staged && committed
    }
}
