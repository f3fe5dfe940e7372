use crate::areas::database::FlatTree;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::status::file_status::{FileStatus, StatusKind};
use crate::errors::Result;
use derive_new::new;

#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    /// Flattened tree of the commit HEAD resolves to; empty when there is no
    /// commit yet or its tree cannot be read. A broken HEAD is an error.
    fn committed_files(&self) -> Result<FlatTree> {
        let Some(head) = self.repository.refs().resolve_head()? else {
            return Ok(FlatTree::new());
        };

        Ok(self
            .repository
            .database()
            .flatten_commit(&head)
            .unwrap_or_else(|error| {
                tracing::warn!(%error, head = %head, "HEAD tree unreadable, comparing against an empty tree");
                FlatTree::new()
            }))
    }

    /// Classify every non-ignored working-tree file, sorted by path.
    pub fn inspect(&self) -> Result<Vec<FileStatus>> {
        let staged_files = {
            let mut index = self.repository.index();
            index.rehydrate()?;
            index.to_flat_tree()
        };
        let committed_files = self.committed_files()?;
        let ignore = self.repository.ignore_matcher()?;
        let workspace = self.repository.workspace();

        workspace
            .list_files(&ignore)?
            .into_iter()
            .map(|path| {
                let content = workspace.read_file(&path)?;
                let working = self.repository.database().hash(ObjectType::Blob, &content);
                let kind = StatusKind::classify(
                    committed_files.get(&path),
                    staged_files.get(&path),
                    &working,
                );

                Ok(FileStatus::new(path, kind))
            })
            .collect()
    }
}
