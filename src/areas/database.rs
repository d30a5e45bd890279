//! Object database
//!
//! Stores all objects (blobs, trees, commits) content-addressed by their
//! SHA-1 hash, one flat file per object under `.goit/objects/<hash>`.
//! There is no compression, no packing, and no fan-out: at the scale this
//! engine targets a single physical file per hash is enough.
//!
//! Writes go through a temp file and an atomic rename, and an existing
//! object is never rewritten, so a store can race an interrupted run
//! without corrupting anything.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::GoitError;
use anyhow::Context;
use bytes::Bytes;
use std::io::{BufRead, Cursor, Write};
use std::path::{Path, PathBuf};

/// Object database keyed by content hash
#[derive(Debug)]
pub struct Database {
    /// Path to the objects directory (`.goit/objects`)
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store an object in the database
    ///
    /// Serializes the object and writes it under its hash. Storing an
    /// object that already exists is a no-op on content.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(object_id)
    }

    /// Load raw object bytes from the database
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            return Err(GoitError::ObjectMissing(object_id.clone()).into());
        }

        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Ok(object_content.into())
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).exists()
    }

    /// Parse an object as a Blob
    ///
    /// Blobs are headerless, so any stored bytes are a valid blob; the
    /// caller's expectation decides the kind.
    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let object_content = self.load(object_id)?;
        Blob::deserialize(Cursor::new(object_content))
    }

    /// Parse an object as a Tree, failing on a wrong header
    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Tree => Tree::deserialize(object_reader),
            other => Err(GoitError::CorruptObject {
                oid: object_id.clone(),
                reason: format!("expected tree, found {}", other),
            }
            .into()),
        }
    }

    /// Parse an object as a Commit, failing on a wrong header
    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Commit::deserialize(object_reader),
            other => Err(GoitError::CorruptObject {
                oid: object_id.clone(),
                reason: format!("expected commit, found {}", other),
            }
            .into()),
        }
    }

    /// The tree snapshot named by a commit
    pub fn tree_of_commit(&self, commit_oid: &ObjectId) -> anyhow::Result<Tree> {
        let commit = self.parse_object_as_commit(commit_oid)?;
        self.parse_object_as_tree(commit.tree_oid())
    }

    /// First parent of a commit, the loader the history walker runs on
    pub fn first_parent(&self, commit_oid: &ObjectId) -> anyhow::Result<Option<ObjectId>> {
        let commit = self.parse_object_as_commit(commit_oid)?;
        Ok(commit.parent().cloned())
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;

        Ok((object_type, object_reader))
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).context(format!(
            "Unable to create object directory {}",
            object_dir.display()
        ))?;

        // the hash is unique per content, so it doubles as the temp name
        let temp_object_path = object_dir.join(format!(
            "tmp-{}",
            object_path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default()
        ));

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }
}
