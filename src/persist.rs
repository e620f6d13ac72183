//! JSON persistence for the canonical file and the century shards.
//!
//! Both file kinds hold a JSON array of person objects. Every write is staged
//! in a temporary file next to its target and renamed into place once fully
//! written and synced, so a crash never leaves a truncated file behind. A
//! staged file that is dropped without being committed is removed.

// used for the file system
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

// used to recognise shard files among whatever else is in the store
use lazy_static::lazy_static;
use regex::Regex;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;
use tracing::debug;

// our own stuff that we need
use crate::error::{Result, RootshardError};
use crate::record::{Bucket, RecordCollection};

lazy_static! {
    static ref SHARD_FILE_NAME: Regex = Regex::new(r"^data_([0-9]+|unknown)\.json$").unwrap();
}

const TEMP_PREFIX: &str = ".rootshard-";

// ------------- Reading -------------
/// Loads a JSON array of person objects.
pub fn read_collection(path: &Path) -> Result<RecordCollection> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => RootshardError::format(path, "content is not valid UTF-8"),
        _ => RootshardError::storage(path, e),
    })?;
    let records: RecordCollection = serde_json::from_str(&text)
        .map_err(|e| RootshardError::format(path, e.to_string()))?;
    debug!(path=%path.display(), records=records.len(), "collection read");
    Ok(records)
}

// ------------- Writing -------------
/// Renders a collection as pretty-printed JSON with `indent` spaces per level
/// and a trailing newline. Non-ASCII characters are written as is.
pub fn encode_collection(records: &RecordCollection, indent: usize) -> serde_json::Result<Vec<u8>> {
    let indent = vec![b' '; indent];
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(&indent));
    records.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Hex BLAKE3 digest of written bytes.
pub fn digest(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// Fully written temporary file waiting to replace its target.
#[derive(Debug)]
pub struct StagedFile {
    target: PathBuf,
    temp: NamedTempFile,
}

impl StagedFile {
    /// Writes `bytes` to a fresh temporary file in the target's directory.
    pub fn stage(target: &Path, bytes: &[u8]) -> Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| RootshardError::storage(dir, e))?;
        temp.write_all(bytes)
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| RootshardError::storage(temp.path(), e))?;
        Ok(Self { target: target.to_path_buf(), temp })
    }
    pub fn target(&self) -> &Path {
        &self.target
    }
    /// Atomically renames the staged file over its target.
    pub fn commit(self) -> Result<()> {
        let target = self.target;
        self.temp
            .persist(&target)
            .map_err(|e| RootshardError::storage(&target, e.error))?;
        debug!(path=%target.display(), "file replaced");
        Ok(())
    }
}

/// Replaces `target` with `bytes` in one atomic step.
pub fn write_atomic(target: &Path, bytes: &[u8]) -> Result<()> {
    StagedFile::stage(target, bytes)?.commit()
}

// ------------- Canonical file -------------
#[derive(Debug, Clone)]
pub struct CanonicalFile {
    path: PathBuf,
}

impl CanonicalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    pub fn load(&self) -> Result<RecordCollection> {
        read_collection(&self.path)
    }
    pub fn save(&self, records: &RecordCollection, indent: usize) -> Result<()> {
        let bytes = encode_collection(records, indent)
            .map_err(|e| RootshardError::format(&self.path, e.to_string()))?;
        write_atomic(&self.path, &bytes)
    }
}

// ------------- Shard store -------------
/// A shard file found in the store, identified by its bucket label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardFile {
    pub label: String,
    pub path: PathBuf,
}

/// Directory holding one `data_<bucket>.json` file per bucket.
#[derive(Debug, Clone)]
pub struct ShardStore {
    dir: PathBuf,
}

impl ShardStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
    pub fn dir(&self) -> &Path {
        &self.dir
    }
    pub fn shard_file_name(bucket: &Bucket) -> String {
        format!("data_{}.json", bucket)
    }
    pub fn shard_path(&self, bucket: &Bucket) -> PathBuf {
        self.dir.join(Self::shard_file_name(bucket))
    }
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| RootshardError::storage(&self.dir, e))
    }
    /// Shard files currently in the store, sorted lexicographically by label.
    ///
    /// Directory listings come back in no particular order; sorting here is
    /// what makes consolidation reproducible.
    pub fn list(&self) -> Result<Vec<ShardFile>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| RootshardError::storage(&self.dir, e))?;
        let mut shards = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| RootshardError::storage(&self.dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else { continue };
            if let Some(captures) = SHARD_FILE_NAME.captures(file_name) {
                shards.push(ShardFile { label: captures[1].to_string(), path });
            }
        }
        shards.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(shards)
    }
    pub fn read(&self, shard: &ShardFile) -> Result<RecordCollection> {
        read_collection(&shard.path)
    }
}
