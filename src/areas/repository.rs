use crate::areas::config::Config;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::ignore::IgnoreMatcher;
use crate::errors::{Error, IoResultExt, Result};
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

pub const DEFAULT_META_DIR_NAME: &str = ".senpai";
pub const DEFAULT_IGNORE_FILE_NAME: &str = ".senpaiignore";
pub const DEFAULT_BRANCH: &str = "master";

/// Names of the on-disk layout, carried into every component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    meta_dir_name: String,
    ignore_file_name: String,
    initial_branch: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            meta_dir_name: DEFAULT_META_DIR_NAME.to_string(),
            ignore_file_name: DEFAULT_IGNORE_FILE_NAME.to_string(),
            initial_branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

impl RepositoryConfig {
    pub fn with_meta_dir_name(mut self, name: impl Into<String>) -> Self {
        self.meta_dir_name = name.into();
        self
    }

    pub fn with_ignore_file_name(mut self, name: impl Into<String>) -> Self {
        self.ignore_file_name = name.into();
        self
    }

    pub fn with_initial_branch(mut self, name: impl Into<String>) -> Self {
        self.initial_branch = name.into();
        self
    }

    pub fn meta_dir_name(&self) -> &str {
        &self.meta_dir_name
    }

    pub fn ignore_file_name(&self) -> &str {
        &self.ignore_file_name
    }

    pub fn initial_branch(&self) -> &str {
        &self.initial_branch
    }
}

/// Handle on one repository: root path, layout names and the areas built on them.
///
/// Commands are implemented as methods on this type and print their
/// human-readable output to `writer`.
pub struct Repository {
    path: Box<Path>,
    config: RepositoryConfig,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Build a handle without checking that the metadata directory exists.
    pub fn new(
        path: impl AsRef<Path>,
        config: RepositoryConfig,
        writer: Box<dyn std::io::Write>,
    ) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            std::fs::create_dir_all(path).with_path(path)?;
        }
        let path = path.canonicalize().with_path(path)?;
        let meta_path = path.join(config.meta_dir_name());

        Ok(Repository {
            index: RefCell::new(Index::new(meta_path.join("index").into_boxed_path())),
            database: Database::new(meta_path.join("objects").into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path(), config.meta_dir_name()),
            refs: Refs::new(meta_path.into_boxed_path()),
            writer: RefCell::new(writer),
            path: path.into_boxed_path(),
            config,
        })
    }

    /// Open an initialized repository rooted at `path`.
    pub fn open(
        path: impl AsRef<Path>,
        config: RepositoryConfig,
        writer: Box<dyn std::io::Write>,
    ) -> Result<Self> {
        let meta_path = path.as_ref().join(config.meta_dir_name());
        if !meta_path.is_dir() {
            return Err(Error::RepositoryNotInitialized(meta_path));
        }

        Self::new(path, config, writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub fn meta_path(&self) -> PathBuf {
        self.path.join(self.config.meta_dir_name())
    }

    pub fn is_initialized(&self) -> bool {
        self.meta_path().is_dir()
    }

    pub fn writer(&self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    /// Write one line of command output.
    pub fn emit(&self, line: impl std::fmt::Display) -> Result<()> {
        writeln!(self.writer(), "{line}").map_err(Error::Output)
    }

    pub fn index(&self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn config_path(&self) -> Box<Path> {
        self.meta_path().join("config").into_boxed_path()
    }

    /// Repository configuration file, freshly read.
    pub fn load_config(&self) -> Result<Config> {
        Config::load(self.config_path())
    }

    /// Ignore rules, freshly read from the root.
    pub fn ignore_matcher(&self) -> Result<IgnoreMatcher> {
        IgnoreMatcher::load(&self.path.join(self.config.ignore_file_name()))
    }
}
