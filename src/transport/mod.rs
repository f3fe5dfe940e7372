//! Transports to remote repositories
//!
//! Only a raw byte pipe is provided: a session forwards bytes to and from a
//! remote `git-upload-pack`/`git-receive-pack` without interpreting them.

pub mod ssh;
