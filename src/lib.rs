//! sprig: a small content-addressed version control system
//!
//! - `areas`: the persistent repository pieces and the per-invocation handle
//! - `artifacts`: value types and algorithms (objects, diff, merge, status...)
//! - `commands`: the command set run against a repository
//! - `errors`: user and integrity error taxonomy

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
