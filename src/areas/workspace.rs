//! Working directory operations
//!
//! File system access for everything outside the metadata directory:
//! listing and reading working files, materializing blobs on checkout,
//! and the sweep that clears tracked state before a tree is applied.
//!
//! The `Ignore` policy is the single filter consulted by add, status,
//! checkout, and merge, so no command sees a different notion of which
//! paths belong to the repository.

use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Path components that never belong to the repository
const IGNORED_DIRS: [&str; 2] = [".goit", ".git"];

/// File names that never belong to the repository
const IGNORED_FILES: [&str; 5] = ["goit", ".gitignore", ".DS_Store", "Thumbs.db", "desktop.ini"];

/// Fixed denylist consulted uniformly by every command that walks files
#[derive(Debug, Clone, Copy, Default)]
pub struct Ignore;

impl Ignore {
    pub fn is_ignored(&self, path: &Path) -> bool {
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                let name = name.to_string_lossy();
                IGNORED_DIRS.contains(&name.as_ref())
                    || name.starts_with(".git")
                    || IGNORED_FILES.contains(&name.as_ref())
            } else {
                false
            }
        })
    }
}

/// Working directory rooted at the repository path
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
    ignore: Ignore,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace {
            path,
            ignore: Ignore,
        }
    }

    pub fn ignore(&self) -> &Ignore {
        &self.ignore
    }

    /// All non-ignored regular files under a path, repository-relative
    ///
    /// `None` walks the whole working tree. A path naming a single file
    /// yields just that file.
    pub fn list_files(&self, root_file_path: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
        let root_file_path = match root_file_path {
            Some(p) => self.path.join(p),
            None => self.path.to_path_buf(),
        };

        if !root_file_path.exists() {
            anyhow::bail!("The specified path does not exist: {:?}", root_file_path);
        }

        if root_file_path.is_dir() {
            Ok(WalkDir::new(&root_file_path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| self.relative_if_tracked_file(entry.path()))
                .collect::<Vec<_>>())
        } else {
            Ok(self
                .relative_if_tracked_file(&root_file_path)
                .into_iter()
                .collect())
        }
    }

    pub fn file_exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<String> {
        let file_path = self.path.join(file_path);

        let content = std::fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(content)
    }

    /// Write a file, creating parent directories as needed
    pub fn write_file(&self, file_path: &Path, content: &str) -> anyhow::Result<()> {
        let absolute_path = self.path.join(file_path);

        if let Some(parent) = absolute_path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&absolute_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Remove every non-ignored file from the working tree
    ///
    /// The sweep before a tree is applied: paths present on the previous
    /// branch but absent on the target must not survive the switch.
    /// Directories are left in place; materialization reuses them.
    pub fn sweep(&self) -> anyhow::Result<()> {
        for file_path in self.list_files(None)? {
            std::fs::remove_file(self.path.join(&file_path))
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        Ok(())
    }

    fn relative_if_tracked_file(&self, path: &Path) -> Option<PathBuf> {
        let relative = path.strip_prefix(self.path.as_ref()).ok()?;

        if path.is_file() && !self.ignore.is_ignored(relative) {
            Some(relative.to_path_buf())
        } else {
            None
        }
    }
}
