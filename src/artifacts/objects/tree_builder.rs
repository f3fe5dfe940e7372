//! Tree building from flat staging paths
//!
//! The index stores paths such as `a/b/3.txt`. To snapshot them, the paths are
//! split into segments and inserted into an in-memory trie, where directories are
//! internal nodes and files are leaves. The trie is then serialized depth-first:
//! every subtree is written before its parent, so a parent record can embed the
//! already-computed child digest.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use crate::errors::{Error, Result};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum TreeNode {
    File(ObjectId),
    Directory(BTreeMap<String, TreeNode>),
}

/// Trie of staged paths, rooted at the repository root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeBuilder {
    root: BTreeMap<String, TreeNode>,
}

impl TreeBuilder {
    /// Insert every `path -> blob` pair into a fresh trie.
    pub fn from_flat_paths<'p>(
        entries: impl IntoIterator<Item = (&'p str, &'p ObjectId)>,
    ) -> Result<Self> {
        let mut builder = Self::default();
        for (path, oid) in entries {
            builder.insert(path, oid.clone())?;
        }

        Ok(builder)
    }

    pub fn insert(&mut self, path: &str, oid: ObjectId) -> Result<()> {
        let segments = path.split('/').collect::<Vec<_>>();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(Error::InvalidPath(format!("empty path segment in '{path}'")));
        }

        let (file_name, parents) = segments
            .split_last()
            .ok_or_else(|| Error::InvalidPath(path.to_string()))?;

        let mut level = &mut self.root;
        for parent in parents {
            let node = level
                .entry(parent.to_string())
                .or_insert_with(|| TreeNode::Directory(BTreeMap::new()));

            level = match node {
                TreeNode::Directory(children) => children,
                TreeNode::File(_) => {
                    return Err(Error::InvalidPath(format!(
                        "'{parent}' is both a file and a directory in '{path}'"
                    )));
                }
            };
        }

        if let Some(TreeNode::Directory(_)) = level.get(*file_name) {
            return Err(Error::InvalidPath(format!(
                "'{path}' is both a file and a directory"
            )));
        }
        level.insert(file_name.to_string(), TreeNode::File(oid));

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Serialize the trie bottom-up, handing every tree to `store`.
    ///
    /// `store` receives children before their parents and returns the digest the
    /// parent must reference. The root tree digest is returned.
    pub fn write<F>(&self, store: &mut F) -> Result<ObjectId>
    where
        F: FnMut(&Tree) -> Result<ObjectId>,
    {
        Self::write_level(&self.root, store)
    }

    fn write_level<F>(level: &BTreeMap<String, TreeNode>, store: &mut F) -> Result<ObjectId>
    where
        F: FnMut(&Tree) -> Result<ObjectId>,
    {
        // BTreeMap iteration yields names in sorted order
        let entries = level
            .iter()
            .map(|(name, node)| match node {
                TreeNode::File(oid) => Ok(TreeEntry::new(EntryMode::Regular, name.clone(), oid.clone())),
                TreeNode::Directory(children) => {
                    let oid = Self::write_level(children, store)?;
                    Ok(TreeEntry::new(EntryMode::Directory, name.clone(), oid))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        store(&Tree::new(entries))
    }
}
