//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files for commit
//! - `commit`: Create a new commit
//! - `status`: Show working tree status
//! - `log`: Show commit history
//! - `branch`: Create, list, or delete branches
//! - `checkout`: Switch branches or detach HEAD at a commit
//! - `config`: Read and write repository options
//! - `remote`: Manage remote repositories

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod config;
pub mod init;
pub mod log;
pub mod remote;
pub mod status;
