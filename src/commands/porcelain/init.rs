use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::{Commit, Projection, root_timestamp};
use crate::errors::UserError;
use anyhow::Context;
use std::fs;

/// Message of the root commit every repository starts from
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

impl Repository {
    pub async fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(UserError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .sprig/objects directory")?;

        fs::create_dir_all(self.database().commits_path())
            .context("Failed to create .sprig/commits directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .sprig/refs/heads directory")?;

        let branch = BranchName::default_branch();
        let root = Commit::new(
            branch.clone(),
            None,
            None,
            root_timestamp(),
            Projection::new(),
            ROOT_COMMIT_MESSAGE.to_string(),
        );
        let root_oid = self.database().store_commit(&root)?;
        self.commit_index_mut()
            .register(root_oid.clone(), branch.clone());

        self.refs()
            .update_branch(&branch, &root_oid)
            .context("Failed to create the default branch")?;
        self.refs()
            .set_head(&branch)
            .context("Failed to create initial HEAD reference")?;

        self.persist().await?;
        tracing::info!(path = %self.path().display(), commit = %root_oid, "initialized repository");

        Ok(())
    }
}
