//! senpai: a minimal content-addressed version-control engine
//!
//! The crate is layered the way git itself is:
//!
//! - [`areas`]: the on-disk areas of a repository (object database, index,
//!   refs, working directory, config) and the [`Repository`](areas::repository::Repository)
//!   handle that ties them together
//! - [`artifacts`]: the data structures and algorithms those areas exchange
//!   (objects, index entries, branch names, ignore rules, status, history walks)
//! - [`commands`]: plumbing and porcelain commands, as methods on `Repository`
//! - [`transport`]: byte pipes to remote repositories
//! - [`errors`]: the error taxonomy shared by all of the above

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
pub mod transport;
