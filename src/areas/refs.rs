//! Branch references and HEAD
//!
//! Every branch is a file under `refs/heads/` holding the fingerprint of its
//! head commit. `HEAD` is always symbolic: `ref: refs/heads/<branch>`.
//!
//! Ref files are written under an exclusive `file-guard` lock.

use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IntegrityError, UserError};
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (`.sprig`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn heads_path(&self) -> PathBuf {
        self.path.join("refs").join("heads")
    }

    fn branch_path(&self, branch_name: &BranchName) -> PathBuf {
        self.path.join(SymRefName::from(branch_name).as_ref_path())
    }

    /// Point HEAD at `branch_name`
    pub fn set_head(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        let sym_ref = SymRefName::from(branch_name);
        self.update_ref_file(&self.head_path(), format!("ref: {sym_ref}"))?;
        tracing::debug!(branch = %branch_name, "moved HEAD");

        Ok(())
    }

    /// Branch HEAD points at
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {}", head_path.display()))?;

        let corrupt = |reason: String| IntegrityError::Corrupt {
            kind: "ref",
            path: head_path.clone(),
            reason,
        };

        let captures = regex::Regex::new(SYMREF_REGEX)?
            .captures(content.trim())
            .ok_or_else(|| corrupt("HEAD is not a symbolic ref".to_string()))?;
        let sym_ref = SymRefName::try_parse(captures[1].to_string())
            .map_err(|e| corrupt(e.to_string()))?;

        BranchName::try_parse_sym_ref_name(&sym_ref).map_err(|e| corrupt(e.to_string()).into())
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == branch_name)
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    /// Head commit of `branch_name`, if the branch exists
    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let ref_path = self.branch_path(branch_name);
        if !ref_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&ref_path)
            .with_context(|| format!("failed to read ref file at {}", ref_path.display()))?;

        ObjectId::try_parse(content.trim().to_string())
            .map(Some)
            .map_err(|e| {
                IntegrityError::Corrupt {
                    kind: "ref",
                    path: ref_path,
                    reason: e.to_string(),
                }
                .into()
            })
    }

    /// Head commit of the current branch
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let current_branch = self.current_branch()?;

        self.read_branch(&current_branch)?.ok_or_else(|| {
            IntegrityError::Corrupt {
                kind: "ref",
                path: self.branch_path(&current_branch),
                reason: "current branch has no head commit".to_string(),
            }
            .into()
        })
    }

    /// Create or move `branch_name` to `oid`
    pub fn update_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(&self.branch_path(branch_name), oid.to_string())?;
        tracing::debug!(branch = %branch_name, commit = %oid, "updated branch");

        Ok(())
    }

    /// Create `branch_name` at `oid`
    ///
    /// A ref file can't also be a directory, so `a` and `a/b` are mutually
    /// exclusive.
    pub fn create_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(branch_name) {
            return Err(UserError::BranchExists.into());
        }
        if self.conflicts_with_existing_ref(branch_name) {
            return Err(UserError::ConflictingBranchName(branch_name.to_string()).into());
        }

        self.update_branch(branch_name, oid)
    }

    fn conflicts_with_existing_ref(&self, branch_name: &BranchName) -> bool {
        let heads_path = self.heads_path();
        let branch_path = self.branch_path(branch_name);

        branch_path.is_dir()
            || branch_path
                .ancestors()
                .skip(1)
                .take_while(|ancestor| *ancestor != heads_path)
                .any(Path::is_file)
    }

    /// Delete the ref of `branch_name`; its commits stay in the store
    pub fn delete_branch(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        let branch_path = self.branch_path(branch_name);
        if !branch_path.is_file() {
            return Err(UserError::UnknownBranch.into());
        }

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {}", branch_path.display()))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        tracing::debug!(branch = %branch_name, "deleted branch");

        Ok(())
    }

    /// Every branch, sorted by name
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .min_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| -> anyhow::Result<BranchName> {
                let relative_path = entry.path().strip_prefix(&heads_path)?;
                BranchName::try_parse(relative_path.to_string_lossy().to_string())
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        branches.sort();

        Ok(branches)
    }

    fn update_ref_file(&self, path: &Path, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!("failed to create parent directories for ref file at {}", path.display())
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {}", path.display()))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {}", parent.display())
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }
}
