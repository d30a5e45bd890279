use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Determine the kind of a stored object from its first line
    ///
    /// Trees and commits announce themselves with a `tree` / `commit`
    /// header line, which is consumed. Blobs carry no header, so anything
    /// else is a blob and the reader is left untouched at the start.
    pub fn parse_object_type(data_reader: &mut impl BufRead) -> anyhow::Result<ObjectType> {
        let header = data_reader.fill_buf()?;

        let object_type = if header.starts_with(b"commit\n") {
            ObjectType::Commit
        } else if header.starts_with(b"tree\n") {
            ObjectType::Tree
        } else {
            return Ok(ObjectType::Blob);
        };

        // consume the header line
        let mut header_line = String::new();
        data_reader.read_line(&mut header_line)?;

        Ok(object_type)
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(anyhow::anyhow!("Invalid object type")),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn recognizes_commit_and_tree_headers() {
        let mut reader = Cursor::new(b"commit\ntree abc\n".to_vec());
        assert_eq!(
            ObjectType::parse_object_type(&mut reader).unwrap(),
            ObjectType::Commit
        );

        let mut reader = Cursor::new(b"tree\ndeadbeef a.txt\n".to_vec());
        assert_eq!(
            ObjectType::parse_object_type(&mut reader).unwrap(),
            ObjectType::Tree
        );
    }

    #[test]
    fn everything_else_is_a_blob() {
        let mut reader = Cursor::new(b"plain file contents\n".to_vec());
        assert_eq!(
            ObjectType::parse_object_type(&mut reader).unwrap(),
            ObjectType::Blob
        );

        // the reader is not advanced for blobs
        let mut rest = String::new();
        reader.read_line(&mut rest).unwrap();
        assert_eq!(rest, "plain file contents\n");
    }
}
