//! Manifest file format
//!
//! A manifest is a small binary table of `(name, fingerprint)` pairs. It backs
//! both staging mappings and the commit index.
//!
//! ```text
//! Header (12 bytes):
//!   - Signature (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length):
//!   - Fingerprint (20 bytes)
//!   - Name length (2 bytes)
//!   - Name (UTF-8)
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod entry;
pub mod header;

use crate::artifacts::manifest::checksum::Checksum;
use crate::artifacts::manifest::entry::ManifestEntry;
use crate::artifacts::manifest::header::ManifestHeader;
use crate::artifacts::objects::object::Packable;
use crate::errors::IntegrityError;
use std::ops::DerefMut;
use std::path::Path;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of manifest header in bytes
pub const HEADER_SIZE: usize = 12;

/// Manifest file format version
pub const VERSION: u32 = 1;

/// Signature of staging manifests
pub const STAGING_SIGNATURE: &str = "SSTG";

/// Signature of the commit index
pub const COMMIT_INDEX_SIGNATURE: &str = "SCIX";

/// Read every entry of the manifest at `path`
///
/// A missing or empty file reads as an empty manifest. Takes a shared lock on
/// the file while reading.
pub fn read_manifest(path: &Path, signature: &str) -> anyhow::Result<Vec<ManifestEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut manifest_file = std::fs::OpenOptions::new().read(true).open(path)?;
    let mut lock = file_guard::lock(&mut manifest_file, file_guard::Lock::Shared, 0, 1)?;

    if lock.deref_mut().metadata()?.len() == 0 {
        return Ok(Vec::new());
    }

    let corrupt = |reason: String| IntegrityError::Corrupt {
        kind: "manifest",
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = Checksum::new(lock);
    let header = ManifestHeader::read_from(&mut reader).map_err(|e| corrupt(e.to_string()))?;

    if header.marker != signature {
        return Err(corrupt(format!("unexpected signature {:?}", header.marker)).into());
    }
    if header.version != VERSION {
        return Err(corrupt(format!("unsupported version {}", header.version)).into());
    }

    let entries = (0..header.entries_count)
        .map(|_| ManifestEntry::read_from(&mut reader))
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(|e| corrupt(e.to_string()))?;

    reader.verify().map_err(|e| corrupt(e.to_string()))?;

    Ok(entries)
}

/// Replace the manifest at `path` with `entries`
///
/// Takes an exclusive lock on the file while writing.
pub fn write_manifest<'e>(
    path: &Path,
    signature: &str,
    entries: impl ExactSizeIterator<Item = &'e ManifestEntry>,
) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut manifest_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    let lock = file_guard::lock(&mut manifest_file, file_guard::Lock::Exclusive, 0, 1)?;

    let mut writer = Checksum::new(lock);

    let header = ManifestHeader::new(signature.to_string(), VERSION, entries.len() as u32);
    writer.write(&header.serialize()?)?;

    for entry in entries {
        writer.write(&entry.serialize()?)?;
    }

    writer.write_checksum()
}
