use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};

impl Repository {
    pub fn commit(&self, message: &str) -> Result<ObjectId> {
        let mut index = self.index();

        // Load the index file from the disk
        index.rehydrate()?;
        if index.is_empty() {
            return Err(Error::NothingToCommit);
        }

        let author = Author::load_from_env()?;
        let parent = self.refs().resolve_head()?;

        let files = index.merged_with_parent(self.database(), parent.as_ref());
        let tree_oid = self.database().write_tree(&files)?;

        let is_root = if parent.is_none() { "(root-commit) " } else { "" };
        let commit = Commit::new(parent.into_iter().collect(), tree_oid, author, message);
        let commit_oid = self.database().store(&commit)?;

        self.refs().update_head(&commit_oid)?;
        index.rewrite_to_match(&files)?;
        drop(index);

        tracing::info!(oid = %commit_oid, files = files.len(), "commit created");

        let position = match self.refs().read_head()? {
            Head::Symbolic(branch) => branch.to_string(),
            Head::Detached(_) => "detached HEAD".to_string(),
        };
        self.emit(format!(
            "[{position} {is_root}{}] {}",
            commit_oid.to_short_oid(),
            commit.short_message()
        ))?;

        Ok(commit_oid)
    }
}
