//! Line diffs
//!
//! - `diff_algorithm`: Myers' diff producing edit scripts and hunks
//! - `unified`: unified-format rendering of one file's hunks

pub mod diff_algorithm;
pub mod unified;

/// Placeholder path for the missing side of an added or deleted file
pub const NULL_PATH: &str = "/dev/null";
