//! Core repository components
//!
//! This module contains the fundamental building blocks of a repository:
//!
//! - `config`: INI-like repository configuration and remotes
//! - `database`: Object database for storing blobs, trees, and commits
//! - `index`: Staging area mapping paths to blobs
//! - `refs`: Reference management (branches, HEAD)
//! - `repository`: Repository handle and layout configuration
//! - `workspace`: Working directory file system operations

pub mod config;
pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
