//! Plumbing commands (direct object store access)
//!
//! - `hash-object`: compute a working file's fingerprint and optionally store it
//! - `cat-file`: print a stored blob

pub mod cat_file;
pub mod hash_object;
