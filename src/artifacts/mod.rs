//! Domain artifacts
//!
//! Value types and algorithms the repository areas and commands are built on.
//!
//! - `branch`: branch and symbolic reference names
//! - `checkout`: working tree migration between commits
//! - `core`: terminal output helpers
//! - `diff`: Myers diff and unified rendering
//! - `manifest`: checksummed name -> fingerprint files
//! - `merge`: split point search and three-way reconciliation
//! - `objects`: blobs, commits and fingerprints
//! - `status`: working tree status partition

pub mod branch;
pub mod checkout;
pub mod core;
pub mod diff;
pub mod manifest;
pub mod merge;
pub mod objects;
pub mod status;
