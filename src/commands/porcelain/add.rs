use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::Blob;
use crate::errors::{Error, Result};
use std::collections::BTreeSet;
use std::path::PathBuf;

impl Repository {
    /// Stage files and directories, returning the staged relative paths.
    ///
    /// Every path is expanded before anything is written, so one bad argument
    /// leaves both the object database and the index untouched.
    pub fn add(&self, paths: &[PathBuf]) -> Result<Vec<String>> {
        let ignore = self.ignore_matcher()?;

        let mut files = BTreeSet::new();
        for path in paths {
            files.extend(self.workspace().expand_path(path, &ignore)?);
        }

        if let Some(file) = files.iter().find(|file| !IndexEntry::is_representable(file)) {
            return Err(Error::InvalidPath(format!(
                "'{}' contains a line break and cannot be staged",
                file.escape_debug()
            )));
        }

        let mut index = self.index();
        index.rehydrate()?;

        for file in &files {
            let content = self.workspace().read_file(file)?;
            let oid = self.database().store(&Blob::new(content))?;

            index.add(IndexEntry::regular(file.clone(), oid));
        }

        index.write_updates()?;
        tracing::debug!(files = files.len(), "paths staged");

        Ok(files.into_iter().collect())
    }
}
