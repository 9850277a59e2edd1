use bytes::Bytes;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }

    /// Prefix `content` with the `<type> <size>\0` header
    pub fn frame(&self, content: &[u8]) -> Bytes {
        let mut framed = format!("{} {}\0", self.as_str(), content.len()).into_bytes();
        framed.extend_from_slice(content);

        Bytes::from(framed)
    }

    /// Read the `<type> <size>\0` header, returning the type and announced size
    pub fn parse_header(data_reader: &mut impl BufRead) -> anyhow::Result<(ObjectType, usize)> {
        let mut object_type = Vec::new();
        data_reader.read_until(b' ', &mut object_type)?;

        let object_type = String::from_utf8(object_type)?;
        let object_type = ObjectType::try_from(object_type.trim())?;

        let mut size = Vec::new();
        data_reader.read_until(b'\0', &mut size)?;
        if size.pop() != Some(b'\0') {
            anyhow::bail!("Unterminated object header");
        }
        let size = String::from_utf8(size)?.parse::<usize>()?;

        Ok((object_type, size))
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(anyhow::anyhow!("Invalid object type: {value}")),
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
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Read};

    #[test]
    fn header_is_parsed_back_from_framed_content() {
        let framed = ObjectType::Commit.frame(b"branch master");
        let mut reader = Cursor::new(framed);

        let (object_type, size) = ObjectType::parse_header(&mut reader).unwrap();
        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();

        assert_eq!(object_type, ObjectType::Commit);
        assert_eq!(size, 13);
        assert_eq!(rest, "branch master");
    }

    #[test]
    fn unknown_type_is_rejected() {
        let mut reader = Cursor::new(b"tree 0\0".to_vec());
        assert!(ObjectType::parse_header(&mut reader).is_err());
    }
}
