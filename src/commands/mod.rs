//! Command implementations
//!
//! Commands are organized into two categories:
//!
//! - `plumbing`: direct object store access (hash-object, cat-file)
//! - `porcelain`: user-facing version control workflows (add, commit, merge...)
//!
//! Every command is a [`Command`] variant, validated at the command-line
//! boundary and run through [`Repository::execute`].

pub mod plumbing;
pub mod porcelain;

use crate::areas::repository::Repository;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Init { path: Option<PathBuf> },
    Add { name: String },
    Rm { name: String },
    Commit { message: String },
    Log,
    GlobalLog,
    Find { message: String },
    Status,
    CheckoutFile { commit: Option<String>, name: String },
    CheckoutBranch { name: String },
    Branch { name: String },
    RmBranch { name: String },
    Reset { commit: String },
    Merge { branch: String },
    Diff { from: Option<String>, to: Option<String> },
    HashObject { write: bool, name: String },
    CatFile { oid: String, name: String },
}

impl Command {
    /// Whether the command prints enough to go through the pager
    pub fn is_paged(&self) -> bool {
        matches!(self, Command::Log | Command::GlobalLog)
    }
}

impl Repository {
    /// Run `command` against this repository
    ///
    /// Except for `init`, the persisted state is loaded first and written back
    /// only if the command succeeds.
    pub async fn execute(&self, command: Command) -> anyhow::Result<()> {
        tracing::debug!(?command, "executing");

        if let Command::Init { .. } = command {
            return self.init().await;
        }

        self.load().await?;
        self.dispatch(&command).await?;
        self.persist().await
    }

    async fn dispatch(&self, command: &Command) -> anyhow::Result<()> {
        match command {
            Command::Init { .. } => self.init().await,
            Command::Add { name } => self.add(name).await,
            Command::Rm { name } => self.rm(name).await,
            Command::Commit { message } => self.commit(message).await,
            Command::Log => self.log(),
            Command::GlobalLog => self.global_log(),
            Command::Find { message } => self.find(message),
            Command::Status => self.status().await,
            Command::CheckoutFile { commit, name } => self.checkout_file(commit.as_deref(), name),
            Command::CheckoutBranch { name } => self.checkout_branch(name),
            Command::Branch { name } => self.branch(name),
            Command::RmBranch { name } => self.rm_branch(name),
            Command::Reset { commit } => self.reset(commit).await,
            Command::Merge { branch } => self.merge(branch).await,
            Command::Diff { from, to } => self.diff(from.as_deref(), to.as_deref()),
            Command::HashObject { write, name } => self.hash_object(name, *write),
            Command::CatFile { oid, name } => self.cat_file(oid, name),
        }
    }
}
