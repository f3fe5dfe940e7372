//! Plumbing commands (low-level operations)
//!
//! Plumbing commands provide direct access to the object database. They're
//! primarily used for scripting and as building blocks for porcelain commands.
//!
//! ## Commands
//!
//! - `hash-object`: Compute object ID and optionally store in database
//! - `cat-file`: Inspect a stored object
//! - `write-tree`: Snapshot the working directory as tree objects
//! - `commit-tree`: Create a commit object from an existing tree

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod write_tree;
