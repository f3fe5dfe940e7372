//! Command implementations
//!
//! Commands are methods on [`Repository`](crate::areas::repository::Repository),
//! split the way git splits them:
//!
//! - `plumbing`: direct object manipulation (hash-object, cat-file, write-tree, commit-tree)
//! - `porcelain`: everyday workflows (init, add, commit, status, log, branch, checkout, config, remote)
//!
//! Each command prints its human-readable output to the repository writer and
//! returns a typed value, so it can be driven both by the binary and by tests.

pub mod plumbing;
pub mod porcelain;
