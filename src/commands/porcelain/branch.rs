use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::UserError;

impl Repository {
    /// Create `branch_name` at the current head without switching to it
    pub fn branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head_oid = self.refs().read_head()?;

        self.refs().create_branch(&branch_name, &head_oid)
    }

    /// Delete the ref of `branch_name`; its commits stay reachable by id
    pub fn rm_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name =
            BranchName::try_parse(branch_name.to_string()).map_err(|_| UserError::UnknownBranch)?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(UserError::RemoveCurrentBranch.into());
        }

        self.refs().delete_branch(&branch_name)
    }
}
