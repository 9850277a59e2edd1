//! Object fingerprint (SHA-1 hash)
//!
//! Fingerprints are 40-character hexadecimal strings. A blob's fingerprint is
//! salted with the file name it was staged under, so identical bytes tracked
//! under two names are two distinct objects. A commit's fingerprint is the hash
//! of its serialized form.
//!
//! ## Storage
//!
//! Blobs are stored in `.sprig/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{MIN_PREFIX_LENGTH, OBJECT_ID_LENGTH};
use sha1::{Digest, Sha1};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate a full 40-character fingerprint
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Hash `content`, optionally salted with `salt`
    ///
    /// The salt is hashed first and NUL-terminated, so no two distinct
    /// `(salt, content)` pairs hash the same input. Blob fingerprints use the
    /// file name as salt; commit fingerprints are computed without one.
    pub fn from_content(content: &[u8], salt: Option<&str>) -> Self {
        let mut hasher = Sha1::new();
        if let Some(salt) = salt {
            hasher.update(salt.as_bytes());
            hasher.update([0u8]);
        }
        hasher.update(content);

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Whether `candidate` looks like an abbreviated fingerprint
    pub fn is_prefix_like(candidate: &str) -> bool {
        (MIN_PREFIX_LENGTH..=OBJECT_ID_LENGTH).contains(&candidate.len())
            && candidate.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Write the fingerprint as 20 raw bytes
    pub fn write_h40_to<W: std::io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        for i in (0..OBJECT_ID_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&self.0[i..i + 2], 16)?;
            writer.write_all(&[byte])?;
        }

        Ok(())
    }

    /// Read a fingerprint from 20 raw bytes
    pub fn read_h40_from(bytes: &[u8]) -> anyhow::Result<Self> {
        if bytes.len() != OBJECT_ID_LENGTH / 2 {
            anyhow::bail!("Invalid binary object ID length: {}", bytes.len());
        }

        let hex40 = bytes
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect::<String>();

        Self::try_parse(hex40)
    }

    /// Splits the hash as `XX/YYYY...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn fingerprint_matches_sha1_of_name_nul_then_bytes() {
        // sha1("foo.txt" ++ "\0" ++ "A")
        let salted = ObjectId::from_content(b"A", Some("foo.txt"));
        let framed = ObjectId::from_content(b"foo.txt\0A", None);

        assert_eq!(salted, framed);
    }

    #[test]
    fn name_and_content_boundary_is_unambiguous() {
        // "Xb" ++ "a.txt" and "X" ++ "ba.txt" concatenate to the same bytes
        assert_ne!(
            ObjectId::from_content(b"Xb", Some("a.txt")),
            ObjectId::from_content(b"X", Some("ba.txt"))
        );
    }

    #[test]
    fn binary_form_round_trips() {
        let oid = ObjectId::from_content(b"hello", Some("hello.txt"));
        let mut raw = Vec::new();
        oid.write_h40_to(&mut raw).unwrap();

        assert_eq!(raw.len(), 20);
        assert_eq!(ObjectId::read_h40_from(&raw).unwrap(), oid);
    }

    #[test]
    fn invalid_ids_are_rejected() {
        assert!(ObjectId::try_parse("abc".to_string()).is_err());
        assert!(ObjectId::try_parse("z".repeat(40)).is_err());
    }

    proptest! {
        #[test]
        fn fingerprint_is_stable(content in proptest::collection::vec(any::<u8>(), 0..256), name in "[a-z]{1,12}\\.txt") {
            prop_assert_eq!(
                ObjectId::from_content(&content, Some(&name)),
                ObjectId::from_content(&content, Some(&name))
            );
        }

        #[test]
        fn fingerprint_depends_on_name(content in proptest::collection::vec(any::<u8>(), 0..256), a in "[a-z]{1,12}", b in "[a-z]{1,12}") {
            prop_assume!(a != b);
            prop_assert_ne!(
                ObjectId::from_content(&content, Some(&format!("{a}.txt"))),
                ObjectId::from_content(&content, Some(&format!("{b}.txt")))
            );
        }
    }
}
