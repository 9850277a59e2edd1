//! Error taxonomy
//!
//! Two families of errors cross the command boundary:
//!
//! - [`UserError`]: expected misuse (missing file, nothing staged, unknown branch...).
//!   The message is printed as a single line and the command ends successfully
//!   without persisting anything.
//! - [`IntegrityError`]: the on-disk state contradicts itself (missing blob, hash
//!   mismatch, corrupt object). These abort the process with a non-zero status.
//!
//! Everything else travels as a plain `anyhow::Error` and is treated like an
//! integrity failure by the binary.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Please enter a command.")]
    NoCommand,
    #[error("No command with that name exists.")]
    UnknownCommand,
    #[error("Incorrect operands.")]
    IncorrectOperands,
    #[error("Not in an initialized sprig directory.")]
    NotInitialized,
    #[error("A sprig version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("File does not exist.")]
    MissingFile,
    #[error("No reason to remove the file.")]
    NothingToRemove,
    #[error("Please enter a commit message.")]
    EmptyMessage,
    #[error("No changes added to the commit.")]
    NoChanges,
    #[error("No commit with that id exists.")]
    UnknownCommit,
    #[error("File does not exist in that commit.")]
    MissingFileInCommit,
    #[error("Found no commit with that message.")]
    NoMatchingMessage,
    #[error("A branch with that name already exists.")]
    BranchExists,
    #[error("A branch with that name does not exist.")]
    UnknownBranch,
    #[error("No such branch exists.")]
    NoSuchBranch,
    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),
    #[error("Cannot create branch {0}: it conflicts with an existing branch.")]
    ConflictingBranchName(String),
    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,
    #[error("No need to checkout the current branch.")]
    CheckoutCurrentBranch,
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,
    #[error("Given branch is an ancestor of the current branch.")]
    AncestorMerge,
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,
}

#[derive(Debug, Error)]
pub enum IntegrityError {
    #[error("object {0} is missing from the object store")]
    MissingObject(ObjectId),
    #[error("commit {0} is not registered in the commit index")]
    UnindexedCommit(ObjectId),
    #[error("hash mismatch for {name}: expected {expected}, got {actual}")]
    HashMismatch {
        name: String,
        expected: ObjectId,
        actual: ObjectId,
    },
    #[error("corrupt {kind} at {}: {reason}", path.display())]
    Corrupt {
        kind: &'static str,
        path: PathBuf,
        reason: String,
    },
}

/// Returns the user error carried by `error`, if any
pub fn as_user_error(error: &anyhow::Error) -> Option<&UserError> {
    error.downcast_ref::<UserError>()
}
