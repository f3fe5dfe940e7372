use crate::artifacts::ignore::IgnoreMatcher;
use crate::errors::{Error, IoResultExt, Result};
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// The working directory: every file under the repository root except the
/// metadata directory.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
    meta_dir_name: String,
}

impl Workspace {
    pub fn new(path: Box<Path>, meta_dir_name: impl Into<String>) -> Self {
        Workspace {
            path,
            meta_dir_name: meta_dir_name.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every non-ignored file, as sorted `/`-separated relative paths.
    ///
    /// Ignored directories are not descended into.
    pub fn list_files(&self, ignore: &IgnoreMatcher) -> Result<Vec<String>> {
        self.list_files_under(&self.path, ignore)
    }

    /// Expand a user-supplied path (absolute, or relative to the root) into the
    /// files it names: itself for a file, its non-ignored files for a directory.
    /// The root itself expands to every non-ignored file.
    pub fn expand_path(&self, path: &Path, ignore: &IgnoreMatcher) -> Result<Vec<String>> {
        let absolute_path = self.absolute_path(path);
        let segments = self.relative_segments(&absolute_path)?;
        if segments.is_empty() {
            return self.list_files(ignore);
        }

        let relative_path = segments.join("/");
        if self.is_meta_path(&relative_path) {
            return Err(Error::InvalidPath(format!(
                "'{relative_path}' is inside the repository metadata"
            )));
        }

        let metadata = std::fs::metadata(&absolute_path).with_path(&absolute_path)?;
        if metadata.is_dir() {
            self.list_files_under(&absolute_path, ignore)
        } else {
            Ok(vec![relative_path])
        }
    }

    fn list_files_under(&self, root: &Path, ignore: &IgnoreMatcher) -> Result<Vec<String>> {
        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| match self.relative_path(entry.path()) {
                Ok(relative_path) => {
                    !self.is_meta_path(&relative_path)
                        && !ignore.is_ignored(&relative_path, entry.file_type().is_dir())
                }
                Err(_) => false,
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(self.relative_path(entry.path())?);
            }
        }

        files.sort();
        Ok(files)
    }

    /// `/`-separated path relative to the root. Paths outside the root, and the
    /// root itself, are rejected.
    pub fn relative_path(&self, path: &Path) -> Result<String> {
        let segments = self.relative_segments(path)?;
        if segments.is_empty() {
            return Err(Error::InvalidPath(format!(
                "{} is the repository root",
                path.display()
            )));
        }

        Ok(segments.join("/"))
    }

    /// Normalized segments of `path` below the root; empty for the root itself.
    fn relative_segments(&self, path: &Path) -> Result<Vec<String>> {
        let outside = || Error::InvalidPath(format!("{} is outside the repository", path.display()));

        let absolute_path = self.absolute_path(path);
        let relative_path = absolute_path.strip_prefix(&self.path).map_err(|_| outside())?;

        let mut segments = Vec::new();
        for component in relative_path.components() {
            match component {
                Component::Normal(segment) => segments.push(segment.to_string_lossy().into_owned()),
                Component::CurDir => {}
                Component::ParentDir => {
                    segments.pop().ok_or_else(outside)?;
                }
                Component::RootDir | Component::Prefix(_) => return Err(outside()),
            }
        }

        Ok(segments)
    }

    fn absolute_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.path.join(path)
        }
    }

    fn is_meta_path(&self, relative_path: &str) -> bool {
        relative_path
            .split('/')
            .next()
            .is_some_and(|first| first == self.meta_dir_name)
    }

    pub fn read_file(&self, relative_path: &str) -> Result<Bytes> {
        let file_path = self.path.join(relative_path);
        let content = std::fs::read(&file_path).with_path(&file_path)?;

        Ok(content.into())
    }

    /// Write a file, creating its parent directories.
    pub fn write_file(&self, relative_path: &str, content: &[u8]) -> Result<()> {
        let file_path = self.path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).with_path(parent)?;
        }

        std::fs::write(&file_path, content).with_path(&file_path)
    }

    /// Remove every entry of the root except the metadata directory.
    pub fn clear(&self) -> Result<()> {
        for entry in std::fs::read_dir(&self.path).with_path(&self.path)? {
            let entry = entry.with_path(&self.path)?;
            if entry.file_name().to_string_lossy() == self.meta_dir_name {
                continue;
            }

            let entry_path = entry.path();
            let file_type = entry.file_type().with_path(&entry_path)?;
            if file_type.is_dir() {
                std::fs::remove_dir_all(&entry_path).with_path(&entry_path)?;
            } else {
                std::fs::remove_file(&entry_path).with_path(&entry_path)?;
            }
        }

        Ok(())
    }
}
