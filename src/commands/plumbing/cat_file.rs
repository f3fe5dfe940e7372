use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, RawObject, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, Result};
use std::io::Write;

/// What `cat-file` reports about an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// `-t`
    Type,
    /// `-s`
    Size,
    /// `-e`: no output, fails when the object is absent
    Exists,
    /// `-p`
    Pretty,
}

impl Repository {
    pub fn cat_file(&self, object_id: &str, mode: CatFileMode) -> Result<()> {
        let object_id = ObjectId::try_parse(object_id)?;

        match mode {
            CatFileMode::Exists => match self.database().exists(&object_id) {
                true => Ok(()),
                false => Err(Error::ObjectNotFound(object_id.to_string())),
            },
            CatFileMode::Type => self.emit(self.database().read(&object_id)?.object_type),
            CatFileMode::Size => self.emit(self.database().read(&object_id)?.size),
            CatFileMode::Pretty => self.pretty_print(self.database().read(&object_id)?),
        }
    }

    fn pretty_print(&self, object: RawObject) -> Result<()> {
        match object.object_type {
            // blob bytes go out untouched
            ObjectType::Blob => self
                .writer()
                .write_all(&object.payload)
                .map_err(Error::Output),
            ObjectType::Tree => self.emit(Tree::deserialize(&object.payload[..])?.display()),
            ObjectType::Commit => self.emit(Commit::deserialize(&object.payload[..])?.display()),
        }
    }
}
