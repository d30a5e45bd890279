//! Index (staging area)
//!
//! The index tracks which file versions become the next commit's tree: an
//! ordered mapping of repository-relative paths to blob hashes.
//!
//! ## File Format
//!
//! One `<hash> <path>\n` line per entry, written sorted by path so the
//! same staged set always produces the same bytes. A missing or empty
//! file is an empty index.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// One staged path with the hash of its staged content
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    pub name: PathBuf,
    pub oid: ObjectId,
}

/// Staging area between the working tree and the next commit
///
/// Entries live in a BTreeMap, so a path can never be staged twice and
/// iteration order matches the persisted order.
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (`.goit/index`)
    path: Box<Path>,
    /// Staged entries keyed by path
    entries: BTreeMap<PathBuf, IndexEntry>,
    /// Flag indicating unpersisted modifications
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    /// Load the index from disk
    ///
    /// Replaces the in-memory state with the file's contents. A missing
    /// file is created empty so later locking has something to lock.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        if !self.path().exists() {
            self.clear();
            std::fs::File::create(self.path())?;
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        self.clear();

        let mut content = String::new();
        lock.deref_mut().read_to_string(&mut content)?;

        for line in content.lines() {
            if line.is_empty() {
                continue;
            }

            let entry = Self::parse_entry(line)?;
            self.entries.insert(entry.name.clone(), entry);
        }

        Ok(())
    }

    /// Persist the index, sorted by path
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let writer = lock.deref_mut();
        for entry in self.entries.values() {
            writeln!(writer, "{} {}", entry.oid.as_ref(), entry.name.display())?;
        }

        self.changed = false;

        Ok(())
    }

    /// Insert or overwrite an entry
    pub fn add(&mut self, entry: IndexEntry) {
        self.entries.insert(entry.name.clone(), entry);
        self.changed = true;
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.changed = false;
    }

    /// Replace the staged set with `(path, hash)` pairs
    ///
    /// Used after merge and resolve to synchronize the index to a tree.
    pub fn replace_with(&mut self, entries: impl IntoIterator<Item = (PathBuf, ObjectId)>) {
        self.entries = entries
            .into_iter()
            .map(|(name, oid)| (name.clone(), IndexEntry::new(name, oid)))
            .collect();
        self.changed = true;
    }

    fn parse_entry(line: &str) -> anyhow::Result<IndexEntry> {
        let (oid, path) = line
            .split_once(' ')
            .with_context(|| format!("Invalid index entry: {}", line))?;

        if oid.len() != OBJECT_ID_LENGTH {
            anyhow::bail!("Invalid index entry hash: {}", oid);
        }

        Ok(IndexEntry::new(
            PathBuf::from(path),
            ObjectId::try_parse(oid.to_string())?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::object::sha1_hex;
    use pretty_assertions::assert_eq;

    fn oid_of(content: &str) -> ObjectId {
        ObjectId::try_parse(sha1_hex(content.as_bytes())).unwrap()
    }

    fn index_in(dir: &assert_fs::TempDir) -> Index {
        Index::new(dir.path().join("index").into_boxed_path())
    }

    #[test]
    fn missing_file_loads_as_empty_index() {
        let dir = assert_fs::TempDir::new().unwrap();
        let mut index = index_in(&dir);

        index.rehydrate().unwrap();
        assert!(index.is_empty());
        // the file now exists for later locking
        assert!(index.path().exists());
    }

    #[test]
    fn entries_persist_sorted_by_path() {
        let dir = assert_fs::TempDir::new().unwrap();
        let mut index = index_in(&dir);
        index.rehydrate().unwrap();

        index.add(IndexEntry::new(PathBuf::from("b.txt"), oid_of("two")));
        index.add(IndexEntry::new(PathBuf::from("a.txt"), oid_of("one")));
        index.write_updates().unwrap();

        let content = std::fs::read_to_string(index.path()).unwrap();
        let expected = format!(
            "{} a.txt\n{} b.txt\n",
            oid_of("one").as_ref(),
            oid_of("two").as_ref()
        );
        assert_eq!(content, expected);
    }

    #[test]
    fn rehydrate_round_trip() {
        let dir = assert_fs::TempDir::new().unwrap();
        let mut index = index_in(&dir);
        index.rehydrate().unwrap();

        index.add(IndexEntry::new(
            PathBuf::from("nested/dir/c.txt"),
            oid_of("three"),
        ));
        index.add(IndexEntry::new(PathBuf::from("a.txt"), oid_of("one")));
        index.write_updates().unwrap();

        let mut reloaded = index_in(&dir);
        reloaded.rehydrate().unwrap();

        assert_eq!(
            reloaded.entries().cloned().collect::<Vec<_>>(),
            index.entries().cloned().collect::<Vec<_>>()
        );
    }

    #[test]
    fn adding_the_same_path_twice_overwrites() {
        let dir = assert_fs::TempDir::new().unwrap();
        let mut index = index_in(&dir);
        index.rehydrate().unwrap();

        index.add(IndexEntry::new(PathBuf::from("a.txt"), oid_of("old")));
        index.add(IndexEntry::new(PathBuf::from("a.txt"), oid_of("new")));

        assert_eq!(index.entries().count(), 1);
        assert_eq!(
            index.entry_by_path(Path::new("a.txt")).unwrap().oid,
            oid_of("new")
        );
    }

    #[test]
    fn replace_with_synchronizes_to_a_tree() {
        let dir = assert_fs::TempDir::new().unwrap();
        let mut index = index_in(&dir);
        index.rehydrate().unwrap();

        index.add(IndexEntry::new(PathBuf::from("stale.txt"), oid_of("stale")));
        index.replace_with([
            (PathBuf::from("a.txt"), oid_of("one")),
            (PathBuf::from("b.txt"), oid_of("two")),
        ]);

        assert!(index.entry_by_path(Path::new("stale.txt")).is_none());
        assert_eq!(index.entries().count(), 2);
    }
}
