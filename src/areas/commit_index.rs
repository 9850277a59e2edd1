//! Global commit index
//!
//! Maps every commit fingerprint ever created to the branch directory it is
//! stored under, so a commit can be located from its fingerprint alone.
//! Persisted in `commit-index` with the manifest codec.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::manifest::entry::ManifestEntry;
use crate::artifacts::manifest::{COMMIT_INDEX_SIGNATURE, read_manifest, write_manifest};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::IntegrityError;
use std::collections::BTreeMap;
use std::path::Path;

pub const COMMIT_INDEX_FILE: &str = "commit-index";

#[derive(Debug)]
pub struct CommitIndex {
    path: Box<Path>,
    entries: BTreeMap<ObjectId, BranchName>,
    changed: bool,
}

impl CommitIndex {
    pub fn new(repository_path: &Path) -> Self {
        CommitIndex {
            path: repository_path.join(COMMIT_INDEX_FILE).into_boxed_path(),
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries = read_manifest(&self.path, COMMIT_INDEX_SIGNATURE)?
            .into_iter()
            .map(|entry| -> anyhow::Result<_> {
                Ok((entry.oid, BranchName::try_parse(entry.name)?))
            })
            .collect::<anyhow::Result<_>>()?;
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
            .map(|(oid, branch)| ManifestEntry::new(branch.to_string(), oid.clone()))
            .collect::<Vec<_>>();
        write_manifest(&self.path, COMMIT_INDEX_SIGNATURE, entries.iter())?;
        self.changed = false;
        tracing::debug!(commits = self.entries.len(), "wrote commit index");

        Ok(())
    }

    pub fn register(&mut self, oid: ObjectId, branch: BranchName) {
        self.entries.insert(oid, branch);
        self.changed = true;
    }

    /// Branch directory commit `oid` is stored under
    pub fn locate(&self, oid: &ObjectId) -> anyhow::Result<&BranchName> {
        self.entries
            .get(oid)
            .ok_or_else(|| IntegrityError::UnindexedCommit(oid.clone()).into())
    }

    /// Resolve a full or abbreviated fingerprint to a known commit
    ///
    /// Returns `None` when nothing matches or the prefix is ambiguous.
    pub fn resolve(&self, candidate: &str) -> Option<ObjectId> {
        if !ObjectId::is_prefix_like(candidate) {
            return None;
        }

        let candidate = candidate.to_ascii_lowercase();
        let mut matches = self
            .entries
            .keys()
            .filter(|oid| oid.as_ref().starts_with(&candidate));

        match (matches.next(), matches.next()) {
            (Some(oid), None) => Some(oid.clone()),
            _ => None,
        }
    }

    /// Every known commit, ordered by fingerprint
    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &BranchName)> {
        self.entries.iter()
    }
}
