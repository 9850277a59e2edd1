//! Merge algorithms
//!
//! - `split_finder`: locates the split point (common ancestor) of two heads
//! - `resolution`: three-way reconciliation of projections against the split
//!   point, including conflict detection

pub mod resolution;
pub mod split_finder;

/// Opening line of a conflict block
pub const CONFLICT_HEAD_MARKER: &str = "<<<<<<< HEAD\n";

/// Separator between the current and given versions of a conflict block
pub const CONFLICT_SEPARATOR: &str = "=======\n";

/// Closing line of a conflict block
pub const CONFLICT_TAIL_MARKER: &str = ">>>>>>>\n";
