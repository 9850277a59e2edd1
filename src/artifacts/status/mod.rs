//! Working tree status
//!
//! Partitions file names by comparing the head commit, both staging sides and
//! the working tree:
//!
//! - staged: pending additions
//! - removed: pending removals
//! - modified: changes not staged for commit, either `modified` or `deleted`
//! - untracked: working files neither staged nor tracked, and files staged for
//!   removal that reappeared on disk

pub mod report;

use crate::areas::staging::Staging;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;

/// Working files the next commit knows nothing about
pub fn untracked_files(
    head: &Commit,
    staging: &Staging,
    workspace: &Workspace,
) -> anyhow::Result<Vec<String>> {
    Ok(workspace
        .list_files()?
        .into_iter()
        .filter(|name| {
            let tracked = head.tracks(name);
            (!staging.additions().is_staged(name) && !tracked)
                || (staging.removals().is_staged(name) && tracked)
        })
        .collect())
}
