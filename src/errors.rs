//! Error taxonomy
//!
//! Every failure the engine can surface is a variant of [`Error`], so callers can
//! branch on the kind of failure instead of matching on message text.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not a repository (or the metadata directory is missing): {0}")]
    RepositoryNotInitialized(PathBuf),

    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("invalid object format: {0}")]
    InvalidObjectFormat(String),

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("index is corrupt at line {line}: {reason}")]
    IndexCorrupt { line: usize, reason: String },

    #[error("nothing to commit (staging area is empty)")]
    NothingToCommit,

    #[error(
        "missing author info: set GIT_AUTHOR_NAME and GIT_AUTHOR_EMAIL (or the committer variants)"
    )]
    MissingAuthorInfo,

    #[error("branch '{0}' already exists")]
    BranchAlreadyExists(String),

    #[error("branch '{0}' not found")]
    BranchNotFound(String),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("cannot delete branch '{0}': currently checked out")]
    CannotDeleteCurrentBranch(String),

    #[error("no commits yet")]
    NoCommitsYet,

    #[error("reference '{0}' not found (not a branch or commit)")]
    ReferenceNotFound(String),

    #[error("HEAD is detached: {0}")]
    DetachedHeadUnsupportedOperation(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("invalid ignore pattern '{pattern}': {reason}")]
    InvalidIgnorePattern { pattern: String, reason: String },

    #[error("config is corrupt at line {line}: {reason}")]
    ConfigCorrupt { line: usize, reason: String },

    #[error("invalid config key '{0}': expected section.key")]
    InvalidConfigKey(String),

    #[error("key '{key}' not found in section '{section}'")]
    ConfigKeyNotFound { section: String, key: String },

    #[error("remote '{0}' already exists")]
    RemoteAlreadyExists(String),

    #[error("remote '{0}' does not exist")]
    RemoteNotFound(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to write command output: {0}")]
    Output(#[source] std::io::Error),

    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Attach the offending path to a raw I/O failure.
pub trait IoResultExt<T> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        let path = error.path().map(Path::to_path_buf).unwrap_or_default();
        let source = error
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));

        Error::Io { path, source }
    }
}
