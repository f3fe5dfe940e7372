//! Working tree status
//!
//! Every walked file is classified by comparing three digests of the same path:
//! the last commit (C), the index (I) and the working tree (W, hashed on the fly
//! without writing an object).

pub mod file_status;
pub mod inspector;
