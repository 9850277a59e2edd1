use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::resolution::{
    MergeAction, MergePlan, conflict_content, untracked_in_the_way,
};
use crate::artifacts::merge::split_finder::SplitFinder;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::untracked_files;
use crate::errors::UserError;

impl Repository {
    pub async fn merge(&self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name =
            BranchName::try_parse(branch_name.to_string()).map_err(|_| UserError::UnknownBranch)?;
        let (given_oid, given) = self
            .branch_commit(&branch_name)?
            .ok_or(UserError::UnknownBranch)?;

        let staging = self.staging();
        if !staging.lock().await.is_empty() {
            return Err(UserError::UncommittedChanges.into());
        }

        let current_branch = self.refs().current_branch()?;
        if branch_name == current_branch {
            return Err(UserError::MergeWithSelf.into());
        }

        let (current_oid, current) = self.head_commit()?;

        let split_finder = SplitFinder::new(|oid: &ObjectId| {
            Ok(self.load_commit(oid)?.parents().cloned().collect())
        });
        let split_oid = split_finder
            .find_split(&current_oid, &given_oid)?
            .ok_or_else(|| {
                anyhow::anyhow!("no common ancestor between {current_oid} and {given_oid}")
            })?;

        if split_oid == given_oid {
            return Err(UserError::AncestorMerge.into());
        }

        if split_oid == current_oid {
            let migration = Migration::plan(self.database(), self.workspace(), &current, &given)?;
            self.workspace().apply_migration(&migration)?;
            self.refs().update_branch(&current_branch, &given_oid)?;
            tracing::info!(branch = %current_branch, commit = %given_oid, "fast-forwarded");

            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split = self.load_commit(&split_oid)?;
        let plan = MergePlan::new(split.files(), current.files(), given.files());

        {
            let mut staging = staging.lock().await;

            let untracked = untracked_files(&current, &staging, self.workspace())?;
            if untracked_in_the_way(split.files(), given.files(), untracked.iter()) {
                return Err(UserError::UntrackedFileInTheWay.into());
            }

            for action in plan.actions() {
                match action {
                    MergeAction::TakeGiven { name, oid } => {
                        let content = self.database().load_blob(oid, Some(name.as_str()))?;
                        self.workspace().write_file(name, &content)?;
                        staging.stage_add(self.workspace(), name, &current)?;
                    }
                    MergeAction::Remove { name } => {
                        staging.stage_remove(self.workspace(), name, &current)?;
                    }
                    MergeAction::Conflict {
                        name,
                        current: current_oid,
                        given: given_oid,
                    } => {
                        let load = |oid: &Option<ObjectId>| {
                            oid.as_ref()
                                .map(|oid| self.database().load_blob(oid, Some(name.as_str())))
                                .transpose()
                        };
                        let current_content = load(current_oid)?;
                        let given_content = load(given_oid)?;

                        let content =
                            conflict_content(current_content.as_deref(), given_content.as_deref());
                        self.workspace().write_file(name, &content)?;
                        staging.stage_add(self.workspace(), name, &current)?;
                    }
                }
            }
        }

        if plan.has_conflicts() {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        let message = format!("Merged {branch_name} into {current_branch}.");
        let merge_oid = self.make_commit(&message, Some(given_oid)).await?;
        tracing::info!(commit = %merge_oid, given = %branch_name, "merged");

        Ok(())
    }
}
