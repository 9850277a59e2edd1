//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: create the repository and its root commit
//! - `add` / `rm`: stage files for addition or removal
//! - `commit`: record the staged changes
//! - `log` / `global-log` / `find`: browse commits
//! - `status`: show branches, staged changes and the working tree state
//! - `checkout` / `reset`: restore files, switch branches, move a branch
//! - `branch` / `rm-branch`: create or delete branches
//! - `merge`: merge another branch into the current one
//! - `diff`: compare branch heads and the working tree

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod merge;
pub mod status;
