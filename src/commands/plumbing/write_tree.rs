use crate::areas::database::FlatTree;
use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Store every non-ignored working-tree file and the trees above them,
    /// bypassing the index.
    pub fn write_tree(&self) -> Result<ObjectId> {
        let ignore = self.ignore_matcher()?;

        let files = self
            .workspace()
            .list_files(&ignore)?
            .into_iter()
            .map(|path| {
                let content = self.workspace().read_file(&path)?;
                let oid = self.database().store(&Blob::new(content))?;
                Ok((path, oid))
            })
            .collect::<Result<FlatTree>>()?;

        let tree_oid = self.database().write_tree(&files)?;
        self.emit(&tree_oid)?;

        Ok(tree_oid)
    }
}
