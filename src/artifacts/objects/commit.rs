//! Commit object
//!
//! Commits are snapshots of the repository: a tree, zero or more parents,
//! a UTC timestamp, and a single-line message.
//!
//! ## Format
//!
//! ```text
//! commit\n
//! tree <hash>\n
//! parent <hash>\n        (zero, one, or two lines)
//! date <RFC3339-UTC>\n
//! \n
//! <message>\n
//! ```
//!
//! Parents always sit between the `tree` and `date` lines. Content
//! addressing depends on this layout being the only one ever written, so
//! the serializer here is the single source of commit bytes. A merge
//! commit has exactly two parents, the first being the pre-merge HEAD; a
//! root commit has none.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use std::io::{BufRead, Write};

/// Header line identifying a stored commit
pub const COMMIT_HEADER: &str = "commit";

/// Commit object
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs (empty for the root commit, two for merges)
    parents: Vec<ObjectId>,
    /// Tree object ID naming the snapshot
    tree_oid: ObjectId,
    /// Commit timestamp (UTC)
    timestamp: DateTime<Utc>,
    /// Commit message
    message: String,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        tree_oid: ObjectId,
        timestamp: DateTime<Utc>,
        message: String,
    ) -> Self {
        Commit {
            parents,
            tree_oid,
            timestamp,
            message,
        }
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    /// First parent, the one history walks follow
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() == 2
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut commit_bytes = Vec::new();

        writeln!(commit_bytes, "{}", COMMIT_HEADER)?;
        writeln!(commit_bytes, "tree {}", self.tree_oid.as_ref())?;
        for parent in &self.parents {
            writeln!(commit_bytes, "parent {}", parent.as_ref())?;
        }
        writeln!(
            commit_bytes,
            "date {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
        writeln!(commit_bytes)?;
        writeln!(commit_bytes, "{}", self.message)?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        // the `commit` header line has already been consumed
        let mut lines = reader.lines();

        let tree_line = lines
            .next()
            .context("Invalid commit object: missing tree line")??;
        let tree_oid = tree_line
            .strip_prefix("tree ")
            .context("Invalid commit object: invalid tree line")?
            .to_string();
        let tree_oid = ObjectId::try_parse(tree_oid)?;

        let mut parents = Vec::new();
        let mut next_line = lines
            .next()
            .context("Invalid commit object: missing date line")??;

        while let Some(parent_oid) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent_oid.to_string())?);

            next_line = lines
                .next()
                .context("Invalid commit object: missing date line")??;
        }

        let date = next_line
            .strip_prefix("date ")
            .context("Invalid commit object: invalid date line")?;
        let timestamp = DateTime::parse_from_rfc3339(date)
            .context("Invalid commit object: unparseable date")?
            .with_timezone(&Utc);

        // skip the blank separator line
        lines.next();

        let message = lines
            .collect::<Result<Vec<String>, std::io::Error>>()?
            .join("\n");

        Ok(Self::new(parents, tree_oid, timestamp, message))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![];

        lines.push(format!("tree {}", self.tree_oid.as_ref()));
        for parent in &self.parents {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!(
            "date {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}
