//! Staging area
//!
//! The index tracks which blob is staged for each path in the next commit. It is
//! a small text record that is always read whole and rewritten whole.
//!
//! ## Locking
//!
//! Reads take a shared `file-guard` lock and rewrites an exclusive one. There is
//! no transaction spanning a read and the following write: the last writer wins.

use crate::areas::database::{Database, FlatTree};
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IoResultExt, Result};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.senpai/index`)
    path: Box<Path>,
    /// Staged entries keyed by path
    entries: BTreeMap<String, IndexEntry>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk. A missing or empty file is an empty index.
    pub fn rehydrate(&mut self) -> Result<()> {
        self.entries.clear();

        if !self.path.exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(&self.path)
            .with_path(&self.path)?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)
            .with_path(&self.path)?;

        let mut content = String::new();
        lock.deref_mut()
            .read_to_string(&mut content)
            .with_path(&self.path)?;

        for (number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let entry = IndexEntry::parse_line(number + 1, line)?;
            self.entries.insert(entry.path.clone(), entry);
        }

        Ok(())
    }

    pub fn entry_by_path(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace the entry for its path; the last write wins.
    ///
    /// Entries the new path cannot coexist with are dropped first: a file
    /// staged where one of its parent directories was, or files staged under
    /// what is now a file.
    pub fn add(&mut self, entry: IndexEntry) {
        self.discard_conflicts(&entry.path);
        self.entries.insert(entry.path.clone(), entry);
    }

    fn discard_conflicts(&mut self, path: &str) {
        for parent in parent_dirs(path) {
            self.remove(parent);
        }

        let children = self
            .entries
            .keys()
            .filter(|staged| is_under(staged, path))
            .cloned()
            .collect::<Vec<_>>();
        for child in children {
            self.remove(&child);
        }
    }

    fn remove(&mut self, path: &str) {
        if self.entries.remove(path).is_some() {
            tracing::debug!(path, "conflicting index entry discarded");
        }
    }

    /// Staged paths and their blobs.
    pub fn to_flat_tree(&self) -> FlatTree {
        self.entries
            .iter()
            .map(|(path, entry)| (path.clone(), entry.oid.clone()))
            .collect()
    }

    /// Staged paths plus every path of the parent commit's tree that is not
    /// staged. Without a readable parent, the staged paths alone.
    pub fn merged_with_parent(&self, database: &Database, parent: Option<&ObjectId>) -> FlatTree {
        let mut merged = self.to_flat_tree();

        let Some(parent) = parent else {
            return merged;
        };

        match database.flatten_commit(parent) {
            Ok(parent_files) => {
                let staged = self.entries.keys().collect::<Vec<_>>();
                for (path, oid) in parent_files {
                    // a staged file replaced this path's directory, or the reverse
                    let shadowed = staged
                        .iter()
                        .any(|staged| is_under(staged, &path) || is_under(&path, staged));
                    if !shadowed {
                        merged.entry(path).or_insert(oid);
                    }
                }
            }
            Err(error) => {
                tracing::warn!(parent = %parent, %error, "parent tree unreadable, committing staged paths only");
            }
        }

        merged
    }

    /// Replace every entry with exactly the given map and persist it.
    pub fn rewrite_to_match(&mut self, files: &FlatTree) -> Result<()> {
        self.entries = files
            .iter()
            .map(|(path, oid)| {
                let entry = IndexEntry::new(EntryMode::Regular, path.clone(), oid.clone());
                (path.clone(), entry)
            })
            .collect();

        self.write_updates()
    }

    /// Rewrite the index file from the in-memory entries, sorted by path.
    pub fn write_updates(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_path(parent)?;
        }

        let content = self
            .entries
            .values()
            .map(|entry| format!("{}\n", entry.to_line()))
            .collect::<String>();

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .with_path(&self.path)?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)
            .with_path(&self.path)?;

        lock.deref_mut()
            .write_all(content.as_bytes())
            .with_path(&self.path)?;

        tracing::debug!(entries = self.entries.len(), "index rewritten");

        Ok(())
    }
}

/// Proper ancestors of a `/`-separated path, nearest last: `a/b/c` gives `a`, `a/b`.
fn parent_dirs(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/').map(move |(at, _)| &path[..at])
}

/// Whether `path` sits strictly below the directory `dir`.
fn is_under(path: &str, dir: &str) -> bool {
    path.strip_prefix(dir).is_some_and(|rest| rest.starts_with('/'))
}
