use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};

impl Repository {
    /// Move the working directory, the index and HEAD to a branch or commit.
    ///
    /// A branch name wins over a commit id. The target is fully loaded before
    /// the working directory is touched, and HEAD moves last.
    pub fn checkout(&self, target: &str) -> Result<Head> {
        let (head, commit_oid) = self.resolve_checkout_target(target)?;

        Migration::plan(self, &commit_oid)?.apply_changes()?;

        match &head {
            Head::Symbolic(branch) => {
                self.refs().set_head_symbolic(branch)?;
                self.emit(format!("Switched to branch '{branch}'"))?;
            }
            Head::Detached(oid) => {
                self.refs().set_head_detached(oid)?;
                self.emit(format!("HEAD is now at {}", oid.to_short_oid()))?;
            }
        }
        tracing::info!(target, commit = %commit_oid, "checkout complete");

        Ok(head)
    }

    /// Create a branch at HEAD and check it out.
    pub fn checkout_new_branch(&self, name: &str) -> Result<Head> {
        self.create_branch(name)?;

        self.checkout(name)
    }

    fn resolve_checkout_target(&self, target: &str) -> Result<(Head, ObjectId)> {
        if let Ok(branch) = BranchName::try_parse(target)
            && self.refs().branch_exists(&branch)
        {
            let oid = self.refs().resolve_branch(&branch)?;
            return Ok((Head::Symbolic(branch), oid));
        }

        if let Ok(oid) = ObjectId::try_parse(target)
            && self.database().exists(&oid)
        {
            return Ok((Head::Detached(oid.clone()), oid));
        }

        Err(Error::ReferenceNotFound(target.to_string()))
    }
}
