//! Data structures and algorithms
//!
//! - `branch`: Branch names
//! - `checkout`: Working directory migration to another commit
//! - `ignore`: Ignore file rules and matching
//! - `index`: Index entry records
//! - `log`: Commit history traversal
//! - `objects`: Object types (blob, tree, commit) and the tree builder
//! - `status`: Working tree status classification

pub mod branch;
pub mod checkout;
pub mod ignore;
pub mod index;
pub mod log;
pub mod objects;
pub mod status;
