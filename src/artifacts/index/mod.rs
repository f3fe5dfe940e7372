//! Staging index records
//!
//! The index is a plain text file with one staged path per line:
//!
//! ```text
//! <mode> <path> <blob-sha>
//! ```
//!
//! Paths are relative to the repository root and use `/` separators. Lines are
//! kept sorted by path so the file diffs cleanly and rewrites are reproducible.

pub mod entry_mode;
pub mod index_entry;
