use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, IoResultExt, Result};
use std::path::Path;

impl Repository {
    /// Print the id `path` would be stored under as an object of `object_type`,
    /// storing it when `write` is set.
    pub fn hash_object(&self, path: &Path, object_type: ObjectType, write: bool) -> Result<ObjectId> {
        if write && !self.is_initialized() {
            return Err(Error::RepositoryNotInitialized(self.meta_path()));
        }

        let object_path = self.path().join(path);
        let content = std::fs::read(&object_path).with_path(&object_path)?;

        let object_id = if write {
            self.database().write(object_type, &content)?
        } else {
            self.database().hash(object_type, &content)
        };

        self.emit(&object_id)?;

        Ok(object_id)
    }
}
