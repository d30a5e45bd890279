//! Core object traits
//!
//! Every object kind implements:
//! - `Packable`: serialization to the canonical stored bytes
//! - `Unpackable`: deserialization from the stored bytes
//! - `Object`: common operations (ID computation, display)
//!
//! ## Object Format
//!
//! Trees and commits carry a `tree` / `commit` header line; blobs are
//! stored as their raw bytes. Content addressing hashes the exact stored
//! bytes, so serializers must be canonical.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;
use std::path::PathBuf;

/// SHA-1 over arbitrary bytes, as a 40-char lowercase hex string
pub fn sha1_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Trait for serializing objects to their stored byte form
pub trait Packable {
    /// Serialize the object to its canonical bytes
    fn serialize(&self) -> Result<Bytes>;
}

/// Trait for deserializing objects from their stored byte form
pub trait Unpackable {
    /// Deserialize the object from a reader (header already consumed)
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

/// Core object trait
///
/// Implemented by all object types (Blob, Tree, Commit).
pub trait Object: Packable {
    /// Get the object's type
    fn object_type(&self) -> ObjectType;

    /// Get a human-readable representation
    fn display(&self) -> String;

    /// Compute the object ID (SHA-1 of the serialized bytes)
    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        ObjectId::try_parse(sha1_hex(&content))
    }

    /// Get the file system path where this object would be stored
    fn object_path(&self) -> Result<PathBuf> {
        Ok(self.object_id()?.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha1_hex_is_deterministic_and_forty_chars() {
        let a = sha1_hex(b"A\n");
        let b = sha1_hex(b"A\n");
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn sha1_hex_matches_known_vector() {
        // sha1("abc")
        assert_eq!(sha1_hex(b"abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }
}
