use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::UserError;
use colored::Colorize;

impl Repository {
    /// First-parent history from the current head back to the root commit
    pub fn log(&self) -> anyhow::Result<()> {
        let mut curr_commit_oid = Some(self.refs().read_head()?);

        while let Some(commit_oid) = curr_commit_oid {
            let commit = self.load_commit(&commit_oid)?;
            self.display_commit(&commit_oid, &commit)?;

            curr_commit_oid = commit.parent().cloned();
        }

        Ok(())
    }

    /// Every commit ever made, ordered by fingerprint
    pub fn global_log(&self) -> anyhow::Result<()> {
        let oids = self
            .commit_index()
            .iter()
            .map(|(oid, _)| oid.clone())
            .collect::<Vec<_>>();

        for oid in oids {
            let commit = self.load_commit(&oid)?;
            self.display_commit(&oid, &commit)?;
        }

        Ok(())
    }

    /// Print the fingerprint of every commit whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let oids = self
            .commit_index()
            .iter()
            .map(|(oid, _)| oid.clone())
            .collect::<Vec<_>>();

        let mut found = false;
        for oid in oids {
            if self.load_commit(&oid)?.message() == message {
                writeln!(self.writer(), "{oid}")?;
                found = true;
            }
        }

        if !found {
            return Err(UserError::NoMatchingMessage.into());
        }

        Ok(())
    }

    fn display_commit(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "===")?;
        writeln!(self.writer(), "{}", format!("commit {oid}").yellow())?;
        if let (Some(parent), Some(merge_parent)) = (commit.parent(), commit.merge_parent()) {
            writeln!(
                self.writer(),
                "Merge: {} {}",
                parent.to_short_oid(),
                merge_parent.to_short_oid()
            )?;
        }
        writeln!(self.writer(), "Date: {}", commit.timestamp())?;
        writeln!(self.writer(), "{}", commit.message())?;
        writeln!(self.writer())?;

        Ok(())
    }
}
