use crate::artifacts::objects::RAW_OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;

pub trait Packable {
    /// Serialize the object body, without the `<type> <size>\0` header.
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    /// Parse an object body; the header has already been consumed.
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    fn object_id(&self) -> Result<ObjectId> {
        Ok(hash_object(self.object_type(), &self.serialize()?))
    }
}

/// Prefix a payload with its `<type> <size>\0` header.
pub fn frame_object(object_type: ObjectType, payload: &[u8]) -> Vec<u8> {
    let header = format!("{} {}\0", object_type.as_str(), payload.len());
    let mut framed = Vec::with_capacity(header.len() + payload.len());
    framed.extend_from_slice(header.as_bytes());
    framed.extend_from_slice(payload);
    framed
}

/// Digest of the framed payload. Pure, no I/O.
pub fn hash_object(object_type: ObjectType, payload: &[u8]) -> ObjectId {
    let header = format!("{} {}\0", object_type.as_str(), payload.len());
    let mut hasher = Sha1::new();
    hasher.update(header.as_bytes());
    hasher.update(payload);

    let mut digest = [0u8; RAW_OBJECT_ID_LENGTH];
    digest.copy_from_slice(&hasher.finalize());
    ObjectId::from_raw(&digest)
}

/// A decompressed object split into header fields and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObject {
    pub object_type: ObjectType,
    pub size: usize,
    pub payload: Bytes,
}

impl RawObject {
    /// Split a decompressed object on its first NUL byte.
    pub fn parse(data: Bytes) -> Result<Self> {
        let separator = data
            .iter()
            .position(|byte| *byte == 0)
            .ok_or_else(|| Error::InvalidObjectFormat("missing header terminator".into()))?;

        let header = std::str::from_utf8(&data[..separator])
            .map_err(|_| Error::InvalidObjectFormat("header is not valid UTF-8".into()))?;
        let (object_type, size) = header
            .split_once(' ')
            .ok_or_else(|| Error::InvalidObjectFormat(format!("malformed header '{header}'")))?;

        let object_type = ObjectType::try_from(object_type)?;
        let size = size
            .parse::<usize>()
            .map_err(|_| Error::InvalidObjectFormat(format!("invalid object size '{size}'")))?;

        Ok(RawObject {
            object_type,
            size,
            payload: data.slice(separator + 1..),
        })
    }

    /// Fail unless the object has the expected kind.
    pub fn expect_type(self, expected: ObjectType) -> Result<Self> {
        if self.object_type != expected {
            return Err(Error::InvalidObjectFormat(format!(
                "expected a {expected} object, found a {}",
                self.object_type
            )));
        }

        Ok(self)
    }
}
