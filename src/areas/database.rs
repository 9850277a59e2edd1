//! Object store
//!
//! Blobs live under `objects/<2 hex>/<38 hex>`; commits live under
//! `commits/<branch>/<fingerprint>`. Every object is framed with its type and
//! size, zlib-compressed, written to a temp file and renamed into place.
//! Objects are write-once: storing an existing fingerprint is a no-op.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::IntegrityError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

pub const OBJECTS_DIR: &str = "objects";
pub const COMMITS_DIR: &str = "commits";

#[derive(Debug)]
pub struct Database {
    /// Path to the repository directory (`.sprig`)
    path: Box<Path>,
    /// Commits already parsed during this invocation
    commit_cache: RefCell<HashMap<ObjectId, Commit>>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database {
            path,
            commit_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn objects_path(&self) -> PathBuf {
        self.path.join(OBJECTS_DIR)
    }

    pub fn commits_path(&self) -> PathBuf {
        self.path.join(COMMITS_DIR)
    }

    pub fn blob_path(&self, oid: &ObjectId) -> PathBuf {
        self.objects_path().join(oid.to_path())
    }

    pub fn commit_path(&self, branch: &BranchName, oid: &ObjectId) -> PathBuf {
        self.commits_path().join(branch.as_ref()).join(oid.as_ref())
    }

    /// Store `blob` in the permanent store, returning its fingerprint
    pub fn store_blob(&self, blob: &Blob) -> anyhow::Result<ObjectId> {
        let oid = blob.object_id()?;
        Self::write_object(&self.blob_path(&oid), blob)?;

        Ok(oid)
    }

    /// Load the bytes of blob `oid`
    ///
    /// When the file name the blob was recorded under is known, the content is
    /// re-hashed and checked against the fingerprint.
    pub fn load_blob(&self, oid: &ObjectId, name: Option<&str>) -> anyhow::Result<Bytes> {
        let content = Self::read_blob_at(&self.blob_path(oid), oid)?;

        if let Some(name) = name {
            let actual = ObjectId::from_content(&content, Some(name));
            if &actual != oid {
                return Err(IntegrityError::HashMismatch {
                    name: name.to_string(),
                    expected: oid.clone(),
                    actual,
                }
                .into());
            }
        }

        Ok(content)
    }

    /// Persist `commit` under its branch directory, returning its fingerprint
    pub fn store_commit(&self, commit: &Commit) -> anyhow::Result<ObjectId> {
        let oid = commit.object_id()?;
        Self::write_object(&self.commit_path(commit.branch(), &oid), commit)?;
        tracing::debug!(commit = %oid, branch = %commit.branch(), "stored commit");

        self.commit_cache
            .borrow_mut()
            .insert(oid.clone(), commit.clone());

        Ok(oid)
    }

    /// Load commit `oid` stored under `branch`
    pub fn load_commit(&self, branch: &BranchName, oid: &ObjectId) -> anyhow::Result<Commit> {
        if let Some(commit) = self.commit_cache.borrow().get(oid) {
            return Ok(commit.clone());
        }

        let commit_path = self.commit_path(branch, oid);
        if !commit_path.exists() {
            return Err(IntegrityError::MissingObject(oid.clone()).into());
        }

        let corrupt = |reason: String| IntegrityError::Corrupt {
            kind: "commit",
            path: commit_path.clone(),
            reason,
        };

        let content = Self::read_object(&commit_path)?;
        let mut reader = Cursor::new(content);
        let (object_type, _) =
            ObjectType::parse_header(&mut reader).map_err(|e| corrupt(e.to_string()))?;
        if object_type != ObjectType::Commit {
            return Err(corrupt(format!("expected a commit, found a {object_type}")).into());
        }

        let commit = Commit::deserialize(reader).map_err(|e| corrupt(e.to_string()))?;
        self.commit_cache
            .borrow_mut()
            .insert(oid.clone(), commit.clone());

        Ok(commit)
    }

    /// Read a framed blob at `path` and return its content
    pub(crate) fn read_blob_at(path: &Path, oid: &ObjectId) -> anyhow::Result<Bytes> {
        if !path.exists() {
            return Err(IntegrityError::MissingObject(oid.clone()).into());
        }

        let corrupt = |reason: String| IntegrityError::Corrupt {
            kind: "blob",
            path: path.to_path_buf(),
            reason,
        };

        let content = Self::read_object(path)?;
        let mut reader = Cursor::new(content);
        let (object_type, size) =
            ObjectType::parse_header(&mut reader).map_err(|e| corrupt(e.to_string()))?;
        if object_type != ObjectType::Blob {
            return Err(corrupt(format!("expected a blob, found a {object_type}")).into());
        }

        let mut blob = Vec::with_capacity(size);
        reader.read_to_end(&mut blob)?;
        if blob.len() != size {
            return Err(corrupt(format!("announced {size} bytes, found {}", blob.len())).into());
        }

        Ok(Bytes::from(blob))
    }

    /// Write `object` to `path` unless something is already stored there
    pub(crate) fn write_object(path: &Path, object: &impl Object) -> anyhow::Result<()> {
        if path.exists() {
            return Ok(());
        }

        let object_dir = path
            .parent()
            .context(format!("Invalid object path {}", path.display()))?;
        std::fs::create_dir_all(object_dir).context(format!(
            "Unable to create object directory {}",
            object_dir.display()
        ))?;

        let temp_object_path = object_dir.join(Self::generate_temp_name());
        let object_content = Self::compress(object.serialize()?)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file so readers never observe a partial object
        std::fs::rename(&temp_object_path, path)
            .context(format!("Unable to rename object file to {}", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote object");

        Ok(())
    }

    fn read_object(path: &Path) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(path)
            .context(format!("Unable to read object file {}", path.display()))?;

        Self::decompress(object_content.into()).map_err(|e| {
            IntegrityError::Corrupt {
                kind: "object",
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
