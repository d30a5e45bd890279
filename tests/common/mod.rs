#![allow(dead_code)]

pub mod command;
pub mod file;

use sha1::{Digest, Sha1};

/// SHA-1 of some content, the way the engine addresses blobs
pub fn sha1_hex_of(content: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
