//! Two-sided staging area
//!
//! The pending delta between the head commit and the next commit is split in
//! two areas:
//!
//! - the **add** side holds new or modified files, with a copy of each blob
//! - the **remove** side holds files scheduled for untracking
//!
//! Staging a file on one side always unstages it from the other.
//!
//! ## Layout
//!
//! ```text
//! staging/add/<fingerprint>      blob copies held by the add side
//! staging/add.idx                name -> fingerprint manifest
//! staging/remove/<fingerprint>
//! staging/remove.idx
//! ```
//!
//! Blob copies are written as soon as a file is staged; blobs no longer
//! referenced by the mapping are pruned when the mapping is written back.

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::manifest::entry::ManifestEntry;
use crate::artifacts::manifest::{STAGING_SIGNATURE, read_manifest, write_manifest};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, Projection};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::UserError;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};

pub const STAGING_DIR: &str = "staging";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagingSide {
    Add,
    Remove,
}

impl StagingSide {
    pub fn as_str(&self) -> &str {
        match self {
            StagingSide::Add => "add",
            StagingSide::Remove => "remove",
        }
    }
}

/// One side of the staging area
#[derive(Debug)]
pub struct StagingArea {
    side: StagingSide,
    /// Directory holding the blob copies of this side
    path: Box<Path>,
    entries: Projection,
    changed: bool,
}

impl StagingArea {
    pub fn new(staging_path: &Path, side: StagingSide) -> Self {
        StagingArea {
            side,
            path: staging_path.join(side.as_str()).into_boxed_path(),
            entries: Projection::new(),
            changed: false,
        }
    }

    pub fn side(&self) -> StagingSide {
        self.side
    }

    fn manifest_path(&self) -> PathBuf {
        self.path.with_extension("idx")
    }

    fn blob_path(&self, oid: &ObjectId) -> PathBuf {
        self.path.join(oid.as_ref())
    }

    pub fn file_oid(&self, name: &str) -> Option<&ObjectId> {
        self.entries.get(name)
    }

    pub fn is_staged(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn entries(&self) -> &Projection {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record `blob` under its name, keeping a copy in this side's store
    fn stage(&mut self, blob: &Blob) -> anyhow::Result<ObjectId> {
        let oid = blob.object_id()?;
        Database::write_object(&self.blob_path(&oid), blob)?;

        self.entries.insert(blob.name().to_string(), oid.clone());
        self.changed = true;
        tracing::debug!(side = self.side.as_str(), name = blob.name(), oid = %oid, "staged");

        Ok(oid)
    }

    /// Record a fingerprint already held by the permanent store
    fn stage_tracked(&mut self, name: &str, oid: ObjectId) {
        self.entries.insert(name.to_string(), oid);
        self.changed = true;
        tracing::debug!(side = self.side.as_str(), name, "staged tracked file");
    }

    fn unstage(&mut self, name: &str) {
        if self.entries.remove(name).is_some() {
            self.changed = true;
            tracing::debug!(side = self.side.as_str(), name, "unstaged");
        }
    }

    /// Bytes of the blob staged under `name`
    pub fn load_blob(&self, name: &str) -> anyhow::Result<Option<Bytes>> {
        match self.entries.get(name) {
            Some(oid) => Ok(Some(Database::read_blob_at(&self.blob_path(oid), oid)?)),
            None => Ok(None),
        }
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.changed = true;
        }
    }

    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries = read_manifest(&self.manifest_path(), STAGING_SIGNATURE)?
            .into_iter()
            .map(|entry| (entry.name, entry.oid))
            .collect();
        self.changed = false;

        Ok(())
    }

    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let entries = self
            .entries
            .iter()
            .map(|(name, oid)| ManifestEntry::new(name.clone(), oid.clone()))
            .collect::<Vec<_>>();
        write_manifest(&self.manifest_path(), STAGING_SIGNATURE, entries.iter())?;

        self.prune_blobs()?;
        self.changed = false;

        Ok(())
    }

    /// Delete blob copies no longer referenced by the mapping
    fn prune_blobs(&self) -> anyhow::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        for entry in std::fs::read_dir(&self.path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();

            if !self.entries.values().any(|oid| oid.as_ref() == file_name) {
                std::fs::remove_file(entry.path()).with_context(|| {
                    format!("Unable to delete staged blob {}", entry.path().display())
                })?;
            }
        }

        Ok(())
    }
}

/// The coupled add/remove pair
#[derive(Debug)]
pub struct Staging {
    additions: StagingArea,
    removals: StagingArea,
}

impl Staging {
    pub fn new(repository_path: &Path) -> Self {
        let staging_path = repository_path.join(STAGING_DIR);

        Staging {
            additions: StagingArea::new(&staging_path, StagingSide::Add),
            removals: StagingArea::new(&staging_path, StagingSide::Remove),
        }
    }

    pub fn additions(&self) -> &StagingArea {
        &self.additions
    }

    pub fn removals(&self) -> &StagingArea {
        &self.removals
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    /// Stage the working copy of `name` for addition
    ///
    /// If `head` already tracks the exact same content under that name, the
    /// file is simply unstaged.
    pub fn stage_add(
        &mut self,
        workspace: &Workspace,
        name: &str,
        head: &Commit,
    ) -> anyhow::Result<()> {
        let blob = workspace.parse_blob(name)?;
        let oid = blob.object_id()?;

        self.removals.unstage(name);

        if head.tracks_oid(&oid) {
            self.additions.unstage(name);
        } else {
            self.additions.stage(&blob)?;
        }

        Ok(())
    }

    /// Schedule `name` for removal, deleting its working copy if `head`
    /// tracks it
    pub fn stage_remove(
        &mut self,
        workspace: &Workspace,
        name: &str,
        head: &Commit,
    ) -> anyhow::Result<()> {
        let tracked = head.file_oid(name);

        if tracked.is_none() && !self.additions.is_staged(name) {
            return Err(UserError::NothingToRemove.into());
        }

        if let Some(oid) = tracked {
            self.removals.stage_tracked(name, oid.clone());
            workspace.remove_file(name)?;
        }
        self.additions.unstage(name);

        Ok(())
    }

    pub fn clear(&mut self) {
        self.additions.clear();
        self.removals.clear();
    }

    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.additions.rehydrate()?;
        self.removals.rehydrate()
    }

    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        self.additions.write_updates()?;
        self.removals.write_updates()
    }
}
