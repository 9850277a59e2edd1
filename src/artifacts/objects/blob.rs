//! Blob object
//!
//! A blob is the content of one tracked file. Its fingerprint covers the bytes
//! *and* the file name, so the same bytes under two names are stored twice.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`

use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    /// Name the content is tracked under
    name: String,
    /// Raw file bytes
    content: Bytes,
}

impl Blob {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(self.object_type().frame(&self.content))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn object_id(&self) -> anyhow::Result<ObjectId> {
        Ok(ObjectId::from_content(&self.content, Some(&self.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn same_bytes_under_different_names_are_different_objects() {
        let a = Blob::new("a.txt".to_string(), Bytes::from_static(b"same"));
        let b = Blob::new("b.txt".to_string(), Bytes::from_static(b"same"));

        assert_ne!(a.object_id().unwrap(), b.object_id().unwrap());
    }

    #[test]
    fn serialized_form_is_framed_content() {
        let blob = Blob::new("a.txt".to_string(), Bytes::from_static(b"hello\n"));

        assert_eq!(blob.serialize().unwrap(), Bytes::from_static(b"blob 6\0hello\n"));
    }
}
