//! Tree object
//!
//! Trees represent one directory level. They contain entries for files (blobs)
//! and subdirectories (other trees), along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! The codec emits entries in the order it is given; callers sort by name
//! before encoding so that the resulting hash is reproducible.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// One `(mode, name, child-hash)` record.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: String,
    pub oid: ObjectId,
}

impl TreeEntry {
    pub fn object_type(&self) -> ObjectType {
        if self.mode.is_tree() {
            ObjectType::Tree
        } else {
            ObjectType::Blob
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a tree from entries in any order, sorting them by name.
    pub fn from_unsorted(mut entries: Vec<TreeEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self { entries }
    }

    pub fn entries(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = TreeEntry> {
        self.entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Result<Bytes> {
        let mut content = Vec::new();

        for entry in &self.entries {
            content.extend_from_slice(entry.mode.as_str().as_bytes());
            content.push(b' ');
            content.extend_from_slice(entry.name.as_bytes());
            content.push(0);
            content.extend_from_slice(&entry.oid.to_raw());
        }

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Tree {
    fn deserialize(mut reader: impl BufRead) -> Result<Self> {
        let mut entries = Vec::new();

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            // Read "mode " (space-delimited)
            let n = reader
                .read_until(b' ', &mut mode_bytes)
                .map_err(|e| Error::InvalidObjectFormat(e.to_string()))?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(Error::InvalidObjectFormat(
                    "unexpected end of tree in mode".into(),
                ));
            }

            let mode = std::str::from_utf8(&mode_bytes)
                .map_err(|_| Error::InvalidObjectFormat("mode is not valid UTF-8".into()))?;
            let mode = EntryMode::from_octal_str(mode)?;

            // Read "name\0"
            name_bytes.clear();
            reader
                .read_until(b'\0', &mut name_bytes)
                .map_err(|e| Error::InvalidObjectFormat(e.to_string()))?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(Error::InvalidObjectFormat(
                    "unexpected end of tree in name".into(),
                ));
            }
            let name = String::from_utf8(name_bytes.clone())
                .map_err(|_| Error::InvalidObjectFormat("name is not valid UTF-8".into()))?;

            let oid = ObjectId::read_raw_from(&mut reader).map_err(|_| {
                Error::InvalidObjectFormat(format!("truncated object id for entry '{name}'"))
            })?;

            entries.push(TreeEntry::new(mode, name, oid));
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{:0>6} {} {}\t{}",
                    entry.mode.as_str(),
                    entry.object_type(),
                    entry.oid,
                    entry.name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
