use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::diff::unified::FileDiff;
use crate::artifacts::objects::commit::Commit;
use crate::errors::UserError;
use bytes::Bytes;
use std::collections::BTreeSet;

impl Repository {
    /// Compare a branch head with the working tree, or two branch heads
    ///
    /// - no branch: the current branch against the working tree
    /// - one branch: that branch against the working tree
    /// - two branches: the first branch against the second
    pub fn diff(&self, from: Option<&str>, to: Option<&str>) -> anyhow::Result<()> {
        let from = match from {
            Some(branch_name) => self.branch_head(branch_name)?,
            None => self.head_commit()?.1,
        };

        match to {
            Some(branch_name) => {
                let to = self.branch_head(branch_name)?;
                self.diff_commits(&from, &to)
            }
            None => self.diff_working_tree(&from),
        }
    }

    fn diff_working_tree(&self, commit: &Commit) -> anyhow::Result<()> {
        for name in commit.files().keys() {
            let committed = self.committed_content(commit, name)?;
            let working = match self.workspace().file_exists(name) {
                true => Some(self.workspace().read_file(name)?),
                false => None,
            };

            FileDiff::new(name, committed.as_deref(), working.as_deref())
                .render(&mut *self.writer())?;
        }

        Ok(())
    }

    fn diff_commits(&self, from: &Commit, to: &Commit) -> anyhow::Result<()> {
        let names = from
            .files()
            .keys()
            .chain(to.files().keys())
            .collect::<BTreeSet<_>>();

        for name in names {
            let a = self.committed_content(from, name)?;
            let b = self.committed_content(to, name)?;

            FileDiff::new(name, a.as_deref(), b.as_deref()).render(&mut *self.writer())?;
        }

        Ok(())
    }

    fn branch_head(&self, branch_name: &str) -> anyhow::Result<Commit> {
        let branch_name =
            BranchName::try_parse(branch_name.to_string()).map_err(|_| UserError::UnknownBranch)?;
        let (_, commit) = self
            .branch_commit(&branch_name)?
            .ok_or(UserError::UnknownBranch)?;

        Ok(commit)
    }

    fn committed_content(&self, commit: &Commit, name: &str) -> anyhow::Result<Option<Bytes>> {
        commit
            .file_oid(name)
            .map(|oid| self.database().load_blob(oid, Some(name)))
            .transpose()
    }
}
