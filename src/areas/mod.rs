//! Repository areas
//!
//! The persistent pieces a repository is made of:
//!
//! - `database`: write-once blob and commit store
//! - `staging`: two-sided staging area (additions and removals)
//! - `commit_index`: fingerprint -> branch directory map of every commit
//! - `refs`: branch heads and the symbolic HEAD
//! - `repository`: the handle coordinating the areas for one command
//! - `workspace`: the flat working tree

pub mod commit_index;
pub mod database;
pub mod refs;
pub mod repository;
pub mod staging;
pub mod workspace;
