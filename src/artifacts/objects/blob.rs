//! Blob object
//!
//! Blobs hold file content. The stored form is the content itself, with no
//! header: the blob *is* its bytes, and its identity is SHA-1(contents).

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Blob object holding raw file contents
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    /// File content
    content: String,
}

impl Blob {
    /// Get the file content as a string
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(Bytes::from(self.content.clone().into_bytes()))
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        Ok(Self::new(content))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        self.content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::object::sha1_hex;

    #[test]
    fn blob_identity_is_hash_of_raw_contents() {
        let blob = Blob::new("A\n".to_string());
        let oid = blob.object_id().unwrap();
        assert_eq!(oid.as_ref(), sha1_hex(b"A\n"));
    }

    #[test]
    fn serialization_round_trip() {
        let blob = Blob::new("hello world\n".to_string());
        let bytes = blob.serialize().unwrap();
        let parsed = Blob::deserialize(std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(parsed, blob);
    }
}
