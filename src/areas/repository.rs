//! Repository handle and coordination
//!
//! The `Repository` type carries the absolute root path and hands out the
//! lower-level components (database, index, workspace, refs). Every
//! operation takes it explicitly; nothing in the engine reads the current
//! directory behind the caller's back.
//!
//! ## Thread Safety
//!
//! The index is wrapped in Arc<Mutex<>> to allow safe concurrent access,
//! while other components use interior mutability where needed.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::GoitError;
use std::cell::RefMut;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Metadata directory name
pub const GOIT_DIR: &str = ".goit";

/// Object database directory name
const DATABASE_DIR: &str = "objects";

/// Index file name
const INDEX_FILE: &str = "index";

/// Repository handle
///
/// Coordinates all repository operations and provides access to the
/// database, index, workspace, and refs subsystems.
pub struct Repository {
    /// Repository root path
    path: Box<Path>,
    /// Output writer (stdout in production, a buffer in tests)
    writer: RefCell<Box<dyn std::io::Write>>,
    /// Index (staging area) with thread-safe access
    index: Arc<Mutex<Index>>,
    /// Object database
    database: Database,
    /// Working directory
    workspace: Workspace,
    /// Reference manager
    refs: Refs,
}

impl Repository {
    pub fn new(path: PathBuf, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;

        let index = Index::new(path.join(GOIT_DIR).join(INDEX_FILE).into_boxed_path());
        let database = Database::new(path.join(GOIT_DIR).join(DATABASE_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(path.join(GOIT_DIR).into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
        })
    }

    /// Locate the repository containing `start`
    ///
    /// Walks upward until a `.goit` directory appears; fails with
    /// `NotARepository` when the walk reaches the file system root.
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let mut current = Some(start);

        while let Some(dir) = current {
            if dir.join(GOIT_DIR).is_dir() {
                return Self::new(dir.to_path_buf(), writer);
            }
            current = dir.parent();
        }

        Err(GoitError::NotARepository.into())
    }

    pub fn goit_path(&self) -> PathBuf {
        self.path.join(GOIT_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// The tree of the commit HEAD resolves to, empty before any commit
    pub fn head_tree(&self) -> anyhow::Result<Tree> {
        match self.refs.resolve_head()? {
            Some(head_oid) => self.database.tree_of_commit(&head_oid),
            None => Ok(Tree::default()),
        }
    }

    /// Materialize a commit's snapshot into the working tree
    ///
    /// Sweep first, then write every blob of the target tree, then clear
    /// the index: the shared tail of checkout and fast-forward merge.
    /// The ordering matters: paths tracked by the previous state but
    /// absent from the target must be removed before anything is written.
    pub async fn apply_tree(&self, commit_oid: &ObjectId) -> anyhow::Result<()> {
        let tree = self.database.tree_of_commit(commit_oid)?;

        self.workspace.sweep()?;

        for (path, blob_oid) in tree.entries() {
            let blob = self.database.parse_object_as_blob(blob_oid)?;
            self.workspace.write_file(path, blob.content())?;
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;
        index.clear();
        index.write_updates()?;

        Ok(())
    }
}
