use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, RawObject, Unpackable, frame_object, hash_object};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::objects::tree_builder::TreeBuilder;
use crate::errors::{Error, IoResultExt, Result};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

/// Flat `path -> blob id` view of a tree, ordered by path.
pub type FlatTree = BTreeMap<String, ObjectId>;

static TEMP_COUNTER: AtomicU32 = AtomicU32::new(0);

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Digest an object without touching the disk.
    pub fn hash(&self, object_type: ObjectType, content: &[u8]) -> ObjectId {
        hash_object(object_type, content)
    }

    /// Persist an object, returning its id. Already stored objects are left alone.
    pub fn write(&self, object_type: ObjectType, content: &[u8]) -> Result<ObjectId> {
        if !self.path.is_dir() {
            return Err(Error::RepositoryNotInitialized(self.path.to_path_buf()));
        }

        let object_id = hash_object(object_type, content);
        let object_path = self.path.join(object_id.to_path());

        // write the object to disk unless it already exists
        if object_path.exists() {
            tracing::debug!(oid = %object_id, kind = %object_type, "object already stored");
            return Ok(object_id);
        }

        let object_dir = object_path
            .parent()
            .ok_or_else(|| Error::InvalidPath(object_path.display().to_string()))?;
        std::fs::create_dir_all(object_dir).with_path(object_dir)?;

        self.write_object(&object_path, &frame_object(object_type, content))?;
        tracing::debug!(oid = %object_id, kind = %object_type, size = content.len(), "object written");

        Ok(object_id)
    }

    /// Persist a typed object.
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        self.write(object.object_type(), &object.serialize()?)
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Load, decompress and split an object into kind, size and payload.
    pub fn read(&self, object_id: &ObjectId) -> Result<RawObject> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.is_file() {
            return Err(Error::ObjectNotFound(object_id.to_string()));
        }

        RawObject::parse(self.read_object(&object_path)?)
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> Result<Blob> {
        let raw = self.read(object_id)?.expect_type(ObjectType::Blob)?;
        Blob::deserialize(&raw.payload[..])
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> Result<Tree> {
        let raw = self.read(object_id)?.expect_type(ObjectType::Tree)?;
        Tree::deserialize(&raw.payload[..])
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> Result<Commit> {
        let raw = self.read(object_id)?.expect_type(ObjectType::Commit)?;
        Commit::deserialize(&raw.payload[..])
    }

    /// Payload bytes of a blob.
    pub fn load_blob(&self, object_id: &ObjectId) -> Result<Bytes> {
        Ok(self.parse_object_as_blob(object_id)?.into_content())
    }

    /// Expand a tree into every file path it reaches, `/`-joined.
    pub fn flatten(&self, tree_id: &ObjectId) -> Result<FlatTree> {
        let mut files = FlatTree::new();
        self.flatten_into(tree_id, "", &mut files)?;
        Ok(files)
    }

    fn flatten_into(&self, tree_id: &ObjectId, prefix: &str, files: &mut FlatTree) -> Result<()> {
        let tree = self.parse_object_as_tree(tree_id)?;

        for entry in tree.into_entries() {
            let path = if prefix.is_empty() {
                entry.name
            } else {
                format!("{prefix}/{}", entry.name)
            };

            if entry.mode.is_tree() {
                self.flatten_into(&entry.oid, &path, files)?;
            } else {
                files.insert(path, entry.oid);
            }
        }

        Ok(())
    }

    /// Build and store the tree hierarchy for a flat path map, returning the root id.
    pub fn write_tree(&self, files: &FlatTree) -> Result<ObjectId> {
        let builder = TreeBuilder::from_flat_paths(files.iter().map(|(path, oid)| (path.as_str(), oid)))?;
        builder.write(&mut |tree: &Tree| self.store(tree))
    }

    /// Root tree of a commit, flattened.
    pub fn flatten_commit(&self, commit_id: &ObjectId) -> Result<FlatTree> {
        let commit = self.parse_object_as_commit(commit_id)?;
        self.flatten(commit.tree_oid())
    }

    fn read_object(&self, object_path: &Path) -> Result<Bytes> {
        let object_content = std::fs::read(object_path).with_path(object_path)?;

        Self::decompress(object_content.into())
            .map_err(|_| Error::InvalidObjectFormat(format!("corrupt zlib stream in {}", object_path.display())))
    }

    fn write_object(&self, object_path: &Path, object_content: &[u8]) -> Result<()> {
        let object_dir = object_path
            .parent()
            .ok_or_else(|| Error::InvalidPath(object_path.display().to_string()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .with_path(&temp_object_path)?;

        let mut encoder = flate2::write::ZlibEncoder::new(&mut file, flate2::Compression::default());
        encoder.write_all(object_content).with_path(&temp_object_path)?;
        encoder.finish().with_path(&temp_object_path)?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path).with_path(object_path)?;

        Ok(())
    }

    fn decompress(data: Bytes) -> std::io::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> PathBuf {
        let sequence = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        PathBuf::from(format!("tmp-obj-{}-{sequence}", std::process::id()))
    }
}
