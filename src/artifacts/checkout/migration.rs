//! Working tree migration between two commits
//!
//! Checking out a branch and resetting to a commit both replace the working
//! tree's tracked content with another commit's snapshot:
//!
//! 1. Refuse if an untracked working file would be overwritten
//! 2. Load and verify every blob of the target snapshot
//! 3. Delete the working files the target does not track
//! 4. Write every file the target tracks
//!
//! Everything is planned before the working tree is touched, so a refusal or a
//! corrupt blob leaves it unchanged.

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::errors::UserError;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Migration {
    writes: BTreeMap<String, Bytes>,
    deletions: BTreeSet<String>,
}

impl Migration {
    /// Plan the move of the working tree from `current` to `target`
    pub fn plan(
        database: &Database,
        workspace: &Workspace,
        current: &Commit,
        target: &Commit,
    ) -> anyhow::Result<Self> {
        let working_files = workspace.list_files()?;

        for name in &working_files {
            if current.tracks(name) {
                continue;
            }

            if let Some(target_oid) = target.file_oid(name)
                && &workspace.parse_blob(name)?.object_id()? != target_oid
            {
                return Err(UserError::UntrackedFileInTheWay.into());
            }
        }

        let writes = target
            .files()
            .iter()
            .map(|(name, oid)| -> anyhow::Result<_> {
                Ok((name.clone(), database.load_blob(oid, Some(name.as_str()))?))
            })
            .collect::<anyhow::Result<BTreeMap<_, _>>>()?;

        let deletions = working_files
            .into_iter()
            .filter(|name| !target.tracks(name))
            .collect();

        Ok(Migration { writes, deletions })
    }

    pub fn writes(&self) -> impl Iterator<Item = (&String, &Bytes)> {
        self.writes.iter()
    }

    pub fn deletions(&self) -> impl Iterator<Item = &String> {
        self.deletions.iter()
    }
}
