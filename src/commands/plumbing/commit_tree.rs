use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Create a commit object for an existing tree without touching refs or the index.
    pub fn commit_tree(&self, tree: &str, parents: &[String], message: &str) -> Result<ObjectId> {
        let tree_oid = ObjectId::try_parse(tree)?;
        self.database().parse_object_as_tree(&tree_oid)?;

        let parents = parents
            .iter()
            .map(|parent| {
                let parent = ObjectId::try_parse(parent)?;
                self.database().parse_object_as_commit(&parent)?;
                Ok(parent)
            })
            .collect::<Result<Vec<_>>>()?;

        let author = Author::load_from_env()?;
        let commit = Commit::new(parents, tree_oid, author, message);
        let commit_oid = self.database().store(&commit)?;

        self.emit(&commit_oid)?;

        Ok(commit_oid)
    }
}
