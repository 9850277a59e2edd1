//! Stored object types
//!
//! Everything the repository keeps permanently is an object identified by a
//! SHA-1 fingerprint. There are two kinds:
//!
//! - **Blob**: the bytes of one tracked file, fingerprinted together with its name
//! - **Commit**: an immutable snapshot node of the history graph
//!
//! Both share the on-disk framing `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Shortest accepted abbreviated commit id
pub const MIN_PREFIX_LENGTH: usize = 4;
