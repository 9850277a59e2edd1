//! Repository handle
//!
//! One handle is built per invocation. Its lifecycle is explicit:
//!
//! 1. [`Repository::load`] rehydrates the staging pair and the commit index
//! 2. exactly one command runs against the in-memory state
//! 3. [`Repository::persist`] writes the staging pair and the commit index back
//!
//! `persist` is only called when the command succeeded, so a user error leaves
//! the persisted state untouched.

use crate::areas::commit_index::CommitIndex;
use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::staging::Staging;
use crate::areas::workspace::{REPOSITORY_DIR, Workspace};
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, current_timestamp};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IntegrityError, UserError};
use std::cell::{Ref, RefCell, RefMut};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn Write>>,
    staging: Arc<Mutex<Staging>>,
    commit_index: RefCell<CommitIndex>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &Path, writer: Box<dyn Write>) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;
        let repository_path = path.join(REPOSITORY_DIR);

        Ok(Repository {
            writer: RefCell::new(writer),
            staging: Arc::new(Mutex::new(Staging::new(&repository_path))),
            commit_index: RefCell::new(CommitIndex::new(&repository_path)),
            database: Database::new(repository_path.clone().into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            refs: Refs::new(repository_path.into_boxed_path()),
            path: path.into_boxed_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repository_path(&self) -> std::path::PathBuf {
        self.path.join(REPOSITORY_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.repository_path().is_dir()
    }

    /// Rehydrate the persisted state; fails outside an initialized repository
    pub async fn load(&self) -> anyhow::Result<()> {
        if !self.is_initialized() {
            return Err(UserError::NotInitialized.into());
        }

        self.staging.lock().await.rehydrate()?;
        self.commit_index.borrow_mut().rehydrate()?;

        Ok(())
    }

    /// Write the staging pair and the commit index back to disk
    pub async fn persist(&self) -> anyhow::Result<()> {
        self.staging.lock().await.write_updates()?;
        self.commit_index.borrow_mut().write_updates()?;
        self.writer().flush()?;

        Ok(())
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    pub fn staging(&self) -> Arc<Mutex<Staging>> {
        self.staging.clone()
    }

    pub fn commit_index(&self) -> Ref<'_, CommitIndex> {
        self.commit_index.borrow()
    }

    pub fn commit_index_mut(&self) -> RefMut<'_, CommitIndex> {
        self.commit_index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Load commit `oid` through the commit index
    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        let branch = self.commit_index().locate(oid)?.clone();
        self.database.load_commit(&branch, oid)
    }

    /// Head commit of the current branch, with its fingerprint
    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let oid = self.refs.read_head()?;
        let commit = self.load_commit(&oid)?;

        Ok((oid, commit))
    }

    /// Head commit of `branch_name`, if the branch exists
    pub fn branch_commit(
        &self,
        branch_name: &BranchName,
    ) -> anyhow::Result<Option<(ObjectId, Commit)>> {
        match self.refs.read_branch(branch_name)? {
            Some(oid) => {
                let commit = self.load_commit(&oid)?;
                Ok(Some((oid, commit)))
            }
            None => Ok(None),
        }
    }

    /// Resolve a full or abbreviated commit id given on the command line
    pub fn resolve_commit(&self, candidate: &str) -> anyhow::Result<(ObjectId, Commit)> {
        let oid = self
            .commit_index()
            .resolve(candidate)
            .ok_or(UserError::UnknownCommit)?;
        let commit = self.load_commit(&oid)?;

        Ok((oid, commit))
    }

    /// Record a commit on the current branch from the staged changes
    ///
    /// The new projection is the head's projection with staged additions
    /// overlaid and staged removals taken out. Blobs, then the commit, then
    /// the commit index and finally the branch ref are written.
    pub async fn make_commit(
        &self,
        message: &str,
        merge_parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        if message.is_empty() {
            return Err(UserError::EmptyMessage.into());
        }

        let staging = self.staging();
        let mut staging = staging.lock().await;
        if staging.is_empty() && merge_parent.is_none() {
            return Err(UserError::NoChanges.into());
        }

        let branch = self.refs.current_branch()?;
        let (head_oid, head) = self.head_commit()?;

        let mut files = head.files().clone();
        for (name, oid) in staging.additions().entries() {
            let content = staging
                .additions()
                .load_blob(name)?
                .ok_or_else(|| IntegrityError::MissingObject(oid.clone()))?;
            let stored = self
                .database
                .store_blob(&Blob::new(name.clone(), content))?;
            if &stored != oid {
                return Err(IntegrityError::HashMismatch {
                    name: name.clone(),
                    expected: oid.clone(),
                    actual: stored,
                }
                .into());
            }

            files.insert(name.clone(), stored);
        }
        for name in staging.removals().entries().keys() {
            files.remove(name);
        }

        let commit = Commit::new(
            branch.clone(),
            Some(head_oid),
            merge_parent,
            current_timestamp()?,
            files,
            message.to_string(),
        );
        let oid = self.database.store_commit(&commit)?;

        {
            let mut commit_index = self.commit_index_mut();
            commit_index.register(oid.clone(), branch.clone());
            commit_index.write_updates()?;
        }

        self.refs.update_branch(&branch, &oid)?;
        staging.clear();
        tracing::info!(commit = %oid, branch = %branch, "created commit");

        Ok(oid)
    }
}
