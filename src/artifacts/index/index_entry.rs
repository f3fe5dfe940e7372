//! Index entry representation
//!
//! Each entry maps one repository-relative path to the blob staged for it.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    pub mode: EntryMode,
    /// Path relative to the repository root, `/`-separated
    pub path: String,
    pub oid: ObjectId,
}

impl IndexEntry {
    /// Regular-file entry, the only kind the staging area records.
    pub fn regular(path: impl Into<String>, oid: ObjectId) -> Self {
        Self::new(EntryMode::Regular, path.into(), oid)
    }

    /// Parse one `<mode> <path> <hash>` line; `line_number` is 1-based.
    ///
    /// Neither mode nor hash contain spaces, so the path is everything between
    /// the first and the last space and may itself contain spaces.
    pub fn parse_line(line_number: usize, line: &str) -> Result<Self> {
        let corrupt = |reason: String| Error::IndexCorrupt {
            line: line_number,
            reason,
        };

        let (mode, path, oid) = line
            .split_once(' ')
            .and_then(|(mode, rest)| rest.rsplit_once(' ').map(|(path, oid)| (mode, path, oid)))
            .filter(|(_, path, _)| !path.is_empty())
            .ok_or_else(|| corrupt(format!("expected '<mode> <path> <hash>', found '{line}'")))?;

        let mode = EntryMode::from_octal_str(mode).map_err(|e| corrupt(e.to_string()))?;
        let oid = ObjectId::try_parse(oid).map_err(|e| corrupt(e.to_string()))?;

        Ok(Self::new(mode, path.to_string(), oid))
    }

    /// Serialized form, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!("{} {} {}", self.mode, self.path, self.oid)
    }

    /// Whether a path fits on one index line.
    pub fn is_representable(path: &str) -> bool {
        !path.is_empty() && !path.contains(['\n', '\r'])
    }
}
