use crate::areas::repository::Repository;
use crate::artifacts::status::file_status::{FileStatus, StatusKind};
use crate::artifacts::status::inspector::Inspector;
use crate::errors::Result;

impl Repository {
    /// Print and return every working-tree file that is not unmodified.
    pub fn status(&self) -> Result<Vec<FileStatus>> {
        let changes = self
            .status_all()?
            .into_iter()
            .filter(|status| status.kind != StatusKind::Unmodified)
            .collect::<Vec<_>>();

        for status in &changes {
            self.emit(status)?;
        }

        Ok(changes)
    }

    /// Classification of every non-ignored working-tree file, unmodified ones included.
    pub fn status_all(&self) -> Result<Vec<FileStatus>> {
        Inspector::new(self).inspect()
    }
}
