use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::errors::UserError;

impl Repository {
    /// Restore `name` from `commit` (the head commit by default)
    ///
    /// The working copy is overwritten; staging is left untouched.
    pub fn checkout_file(&self, commit: Option<&str>, name: &str) -> anyhow::Result<()> {
        let (commit_oid, commit) = match commit {
            Some(candidate) => self.resolve_commit(candidate)?,
            None => self.head_commit()?,
        };

        let oid = commit
            .file_oid(name)
            .ok_or(UserError::MissingFileInCommit)?;
        let content = self.database().load_blob(oid, Some(name))?;
        self.workspace().write_file(name, &content)?;
        tracing::info!(name, commit = %commit_oid, "checked out file");

        Ok(())
    }

    /// Replace the working tree with the head of `branch_name` and switch to it
    pub fn checkout_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name =
            BranchName::try_parse(branch_name.to_string()).map_err(|_| UserError::NoSuchBranch)?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(UserError::CheckoutCurrentBranch.into());
        }

        let (target_oid, target) = self
            .branch_commit(&branch_name)?
            .ok_or(UserError::NoSuchBranch)?;
        let (_, current) = self.head_commit()?;

        let migration = Migration::plan(self.database(), self.workspace(), &current, &target)?;
        self.workspace().apply_migration(&migration)?;
        self.refs().set_head(&branch_name)?;
        tracing::info!(branch = %branch_name, commit = %target_oid, "checked out branch");

        Ok(())
    }

    /// Replace the working tree with commit `candidate` and move that
    /// commit's branch to it
    pub async fn reset(&self, candidate: &str) -> anyhow::Result<()> {
        let (target_oid, target) = self.resolve_commit(candidate)?;
        let (_, current) = self.head_commit()?;

        let migration = Migration::plan(self.database(), self.workspace(), &current, &target)?;
        self.workspace().apply_migration(&migration)?;

        self.staging().lock().await.clear();
        self.refs().update_branch(target.branch(), &target_oid)?;
        tracing::info!(branch = %target.branch(), commit = %target_oid, "reset branch");

        Ok(())
    }
}
