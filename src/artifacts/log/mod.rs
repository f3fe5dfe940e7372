//! Commit history traversal

pub mod rev_list;
