use crate::errors::{Error, Result};

/// Mode of a tree or index entry.
///
/// Only regular files and subtrees are modelled; executable bits and symlinks
/// are not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum EntryMode {
    #[default]
    Regular,
    Directory,
}

impl EntryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::Regular => "100644",
            EntryMode::Directory => "40000",
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }

    pub fn from_octal_str(mode: &str) -> Result<Self> {
        match mode {
            "100644" => Ok(EntryMode::Regular),
            "40000" | "040000" => Ok(EntryMode::Directory),
            other => Err(Error::InvalidObjectFormat(format!(
                "unsupported entry mode '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
