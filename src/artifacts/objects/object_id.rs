//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings representing SHA-1
//! digests. They uniquely identify every stored object (blobs, trees, commits).
//!
//! ## Storage
//!
//! Objects are stored in `<meta>/objects/<first-2-chars>/<remaining-38-chars>`,
//! so the first byte of the digest selects one of 256 fan-out directories.

use crate::artifacts::objects::{OBJECT_ID_LENGTH, RAW_OBJECT_ID_LENGTH};
use crate::errors::{Error, Result};
use std::io;
use std::path::PathBuf;

/// Validated object identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from its hex form.
    ///
    /// Upper-case digits are accepted and normalized to lower case.
    pub fn try_parse(id: impl AsRef<str>) -> Result<Self> {
        let id = id.as_ref().trim();

        if id.len() != OBJECT_ID_LENGTH {
            return Err(Error::InvalidObjectId(format!(
                "expected {OBJECT_ID_LENGTH} hex characters, got {} in '{id}'",
                id.len()
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidObjectId(format!(
                "non-hex characters in '{id}'"
            )));
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Build an object ID from a raw 20-byte digest.
    pub fn from_raw(raw: &[u8; RAW_OBJECT_ID_LENGTH]) -> Self {
        Self(raw.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    /// Raw 20-byte form, as embedded in tree records.
    pub fn to_raw(&self) -> [u8; RAW_OBJECT_ID_LENGTH] {
        let mut raw = [0u8; RAW_OBJECT_ID_LENGTH];
        for (i, byte) in raw.iter_mut().enumerate() {
            // validated as hex on construction
            *byte = u8::from_str_radix(&self.0[2 * i..2 * i + 2], 16).unwrap_or_default();
        }
        raw
    }

    /// Read an object ID from binary format (20 bytes).
    pub fn read_raw_from<R: io::Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        let mut raw = [0u8; RAW_OBJECT_ID_LENGTH];
        reader.read_exact(&mut raw)?;
        Ok(Self::from_raw(&raw))
    }

    /// Convert to the fan-out storage path, e.g. `abc123...` becomes `ab/c123...`.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash.
    pub fn to_short_oid(&self) -> &str {
        &self.0[..7]
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}
