//! Checkout migration
//!
//! Moving the working directory to another commit happens in two phases:
//!
//! 1. Planning: the target tree is flattened and every blob it references is
//!    loaded. Nothing on disk changes, so a missing or corrupt object aborts
//!    the checkout with the working directory untouched.
//! 2. Applying: the working directory is cleared (everything but the metadata
//!    directory), every planned file is written, and the index is rewritten to
//!    exactly the target tree.
//!
//! ## Hazard
//!
//! The apply phase is destructive and not atomic: untracked files are removed,
//! and a failure halfway leaves a partially restored working directory with no
//! rollback.

use crate::areas::database::FlatTree;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use bytes::Bytes;
use std::collections::BTreeMap;

pub struct Migration<'r> {
    repository: &'r Repository,
    /// Blob id per path of the target tree
    files: FlatTree,
    /// Loaded content per path of the target tree
    contents: BTreeMap<String, Bytes>,
}

impl<'r> Migration<'r> {
    /// Plan a checkout of `commit_oid` without touching the working directory.
    pub fn plan(repository: &'r Repository, commit_oid: &ObjectId) -> Result<Self> {
        let files = repository.database().flatten_commit(commit_oid)?;
        let contents = files
            .iter()
            .map(|(path, oid)| Ok((path.clone(), repository.database().load_blob(oid)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        tracing::debug!(commit = %commit_oid, files = files.len(), "checkout planned");

        Ok(Migration {
            repository,
            files,
            contents,
        })
    }

    /// Replace the working directory and the index with the planned tree.
    pub fn apply_changes(&self) -> Result<()> {
        let workspace = self.repository.workspace();

        workspace.clear()?;
        tracing::debug!("working directory cleared");

        for (path, content) in &self.contents {
            workspace.write_file(path, content)?;
        }

        self.repository.index().rewrite_to_match(&self.files)?;

        Ok(())
    }
}
