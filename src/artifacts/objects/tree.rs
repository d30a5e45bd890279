//! Tree object
//!
//! A tree is a flat snapshot of tracked paths: one `(hash, path)` entry per
//! file, sorted by path. Directories are implicit in the path separators;
//! there is no nested-tree recursion.
//!
//! ## Format
//!
//! ```text
//! tree\n
//! <hash> <path>\n
//! <hash> <path>\n
//! ```

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Header line identifying a stored tree
pub const TREE_HEADER: &str = "tree";

/// Tree object mapping repository-relative paths to blob ids
///
/// Entries are kept in a BTreeMap so serialization is canonical: the same
/// set of entries always produces the same bytes, and therefore the same
/// object id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<PathBuf, ObjectId>,
}

impl Tree {
    /// Build a tree from `(path, blob id)` pairs
    pub fn from_entries(entries: impl IntoIterator<Item = (PathBuf, ObjectId)>) -> Self {
        Tree {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&PathBuf, &ObjectId)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> BTreeMap<PathBuf, ObjectId> {
        self.entries
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&ObjectId> {
        self.entries.get(path)
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut tree_bytes = Vec::new();
        writeln!(tree_bytes, "{}", TREE_HEADER)?;

        for (path, oid) in &self.entries {
            writeln!(tree_bytes, "{} {}", oid.as_ref(), path.display())?;
        }

        Ok(Bytes::from(tree_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut entries = BTreeMap::new();

        // the `tree` header line has already been consumed
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            let (oid, path) = line
                .split_once(' ')
                .with_context(|| format!("Invalid tree entry: {}", line))?;
            let oid = ObjectId::try_parse(oid.to_string())?;

            entries.insert(PathBuf::from(path), oid);
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|(path, oid)| format!("{} {}", oid.as_ref(), path.display()))
            .collect::<Vec<String>>()
            .join("\n")
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

    #[test]
    fn serializes_entries_sorted_by_path() {
        let tree = Tree::from_entries([
            (PathBuf::from("b.txt"), oid_of("two")),
            (PathBuf::from("a.txt"), oid_of("one")),
        ]);

        let bytes = tree.serialize().unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();

        let expected = format!(
            "tree\n{} a.txt\n{} b.txt\n",
            oid_of("one").as_ref(),
            oid_of("two").as_ref()
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn identical_entry_sets_share_an_object_id() {
        let left = Tree::from_entries([
            (PathBuf::from("a.txt"), oid_of("one")),
            (PathBuf::from("dir/b.txt"), oid_of("two")),
        ]);
        let right = Tree::from_entries([
            (PathBuf::from("dir/b.txt"), oid_of("two")),
            (PathBuf::from("a.txt"), oid_of("one")),
        ]);

        assert_eq!(
            left.object_id().unwrap(),
            right.object_id().unwrap()
        );
    }

    #[test]
    fn deserialization_round_trip() {
        let tree = Tree::from_entries([
            (PathBuf::from("a.txt"), oid_of("one")),
            (PathBuf::from("nested/dir/c.txt"), oid_of("three")),
        ]);

        let bytes = tree.serialize().unwrap();
        let mut reader = std::io::Cursor::new(bytes);

        // consume the header the way the database does before dispatching
        let mut header = String::new();
        reader.read_line(&mut header).unwrap();
        assert_eq!(header, "tree\n");

        let parsed = Tree::deserialize(reader).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn empty_tree_serializes_to_bare_header() {
        let tree = Tree::default();
        let bytes = tree.serialize().unwrap();
        assert_eq!(&bytes[..], b"tree\n");
    }
}
