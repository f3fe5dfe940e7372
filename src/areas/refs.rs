//! References (branches and HEAD)
//!
//! References are human-readable names pointing to commits.
//!
//! - HEAD: the current position, either symbolic (`ref: refs/heads/<branch>`)
//!   or detached (a raw commit hash)
//! - Branches: `refs/heads/<name>` files holding the tip commit hash
//!
//! A freshly initialized repository has a symbolic HEAD whose branch file does
//! not exist yet; the first commit creates it.
//!
//! Every ref file is replaced whole under an exclusive `file-guard` lock and read
//! under a shared one.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, IoResultExt, Result};
use derive_new::new;
use file_guard::Lock;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// State of HEAD
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// Attached to a branch, which may not have any commits yet
    Symbolic(BranchName),
    /// Pointing straight at a commit
    Detached(ObjectId),
}

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.senpai`)
    path: Box<Path>,
}

impl Refs {
    pub fn read_head(&self) -> Result<Head> {
        let head_path = self.head_path();
        let content = Self::read_ref_file(&head_path)?
            .ok_or_else(|| Error::RepositoryNotInitialized(self.path.to_path_buf()))?;

        let symref = regex::Regex::new(SYMREF_REGEX)
            .map_err(|e| Error::InvalidObjectFormat(e.to_string()))?;

        match symref.captures(&content) {
            Some(captures) => Ok(Head::Symbolic(BranchName::try_parse_ref_path(&captures[1])?)),
            None => Ok(Head::Detached(ObjectId::try_parse(&content)?)),
        }
    }

    /// Commit HEAD currently resolves to, if any.
    pub fn resolve_head(&self) -> Result<Option<ObjectId>> {
        match self.read_head()? {
            Head::Detached(oid) => Ok(Some(oid)),
            Head::Symbolic(branch) => self.read_branch(&branch),
        }
    }

    /// Attach HEAD to a branch without checking that the branch exists.
    pub fn set_head_symbolic(&self, branch: &BranchName) -> Result<()> {
        self.update_ref_file(&self.head_path(), &format!("ref: {}\n", branch.to_ref_path()))
    }

    pub fn set_head_detached(&self, oid: &ObjectId) -> Result<()> {
        self.update_ref_file(&self.head_path(), &format!("{oid}\n"))
    }

    /// Advance HEAD to a new commit: the attached branch moves, or a detached
    /// HEAD is rewritten.
    pub fn update_head(&self, oid: &ObjectId) -> Result<()> {
        match self.read_head()? {
            Head::Symbolic(branch) => {
                tracing::debug!(branch = %branch, oid = %oid, "branch advanced");
                self.write_branch(&branch, oid)
            }
            Head::Detached(_) => {
                tracing::debug!(oid = %oid, "detached HEAD moved");
                self.set_head_detached(oid)
            }
        }
    }

    pub fn branch_exists(&self, branch: &BranchName) -> bool {
        self.heads_path().join(branch.as_ref()).is_file()
    }

    /// Branch tip, `None` for an empty ref file.
    fn read_branch(&self, branch: &BranchName) -> Result<Option<ObjectId>> {
        let branch_path = self.heads_path().join(branch.as_ref());
        match Self::read_ref_file(&branch_path)? {
            Some(content) => Ok(Some(ObjectId::try_parse(content)?)),
            None => Ok(None),
        }
    }

    /// Tip commit of an existing branch.
    pub fn resolve_branch(&self, branch: &BranchName) -> Result<ObjectId> {
        if !self.branch_exists(branch) {
            return Err(Error::BranchNotFound(branch.to_string()));
        }

        self.read_branch(branch)?.ok_or(Error::NoCommitsYet)
    }

    pub fn current_branch(&self) -> Result<BranchName> {
        match self.read_head()? {
            Head::Symbolic(branch) => Ok(branch),
            Head::Detached(oid) => Err(Error::DetachedHeadUnsupportedOperation(oid.to_string())),
        }
    }

    pub fn is_current_branch(&self, branch: &BranchName) -> Result<bool> {
        Ok(matches!(self.read_head()?, Head::Symbolic(current) if &current == branch))
    }

    /// Create a branch at the commit HEAD resolves to.
    pub fn create_branch(&self, branch: &BranchName) -> Result<ObjectId> {
        if self.branch_exists(branch) {
            return Err(Error::BranchAlreadyExists(branch.to_string()));
        }

        let oid = self.resolve_head()?.ok_or(Error::NoCommitsYet)?;
        self.write_branch(branch, &oid)?;
        tracing::info!(branch = %branch, oid = %oid, "branch created");

        Ok(oid)
    }

    /// Delete a branch other than the checked-out one, returning its last tip.
    pub fn delete_branch(&self, branch: &BranchName) -> Result<Option<ObjectId>> {
        if !self.branch_exists(branch) {
            return Err(Error::BranchNotFound(branch.to_string()));
        }
        if self.is_current_branch(branch)? {
            return Err(Error::CannotDeleteCurrentBranch(branch.to_string()));
        }

        let oid = self.read_branch(branch)?;
        let branch_path = self.heads_path().join(branch.as_ref());
        std::fs::remove_file(&branch_path).with_path(&branch_path)?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        tracing::info!(branch = %branch, "branch deleted");

        Ok(oid)
    }

    /// All branches, as `/`-joined paths relative to `refs/heads`, sorted.
    pub fn list_branches(&self) -> Result<Vec<BranchName>> {
        let heads_path = self.heads_path();
        if !heads_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut branches = Vec::new();
        for entry in WalkDir::new(&heads_path) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative_path) = entry.path().strip_prefix(&heads_path) else {
                continue;
            };
            let name = relative_path
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            match BranchName::try_parse(name) {
                Ok(branch) => branches.push(branch),
                Err(error) => tracing::debug!(%error, "skipping unparseable ref"),
            }
        }

        branches.sort();
        Ok(branches)
    }

    fn write_branch(&self, branch: &BranchName, oid: &ObjectId) -> Result<()> {
        self.update_ref_file(&self.heads_path().join(branch.as_ref()), &format!("{oid}\n"))
    }

    /// Trimmed content of a ref file; `None` when it is missing or empty.
    fn read_ref_file(path: &Path) -> Result<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }

        let mut ref_file = std::fs::File::open(path).with_path(path)?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Shared, 0, 1).with_path(path)?;
        let mut content = String::new();
        lock.deref_mut().read_to_string(&mut content).with_path(path)?;

        let content = content.trim();
        Ok((!content.is_empty()).then(|| content.to_string()))
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> Result<()> {
        // create all the parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_path(parent)?;
        }

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_path(path)?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1).with_path(path)?;
        lock.deref_mut().write_all(raw_ref.as_bytes()).with_path(path)?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> Result<()> {
        let heads_path = self.heads_path();

        if let Some(parent) = path.parent()
            && parent != heads_path.as_ref()
            && parent.starts_with(&heads_path)
            && parent.read_dir().with_path(parent)?.next().is_none()
        {
            std::fs::remove_dir(parent).with_path(parent)?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
