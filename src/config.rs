//! Layered settings: built-in defaults, then an optional JSON file, then
//! `ROOTSHARD_*` environment variables.

use std::path::{Path, PathBuf};

use ::config::builder::{ConfigBuilder, DefaultState};
use ::config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::partition::PartitionOptions;
use crate::persist::{CanonicalFile, ShardStore};

pub const DEFAULT_CONFIG_FILE: &str = "rootshard.json";
pub const ENV_PREFIX: &str = "ROOTSHARD";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// The single file holding every person record.
    pub canonical_file: PathBuf,
    /// Directory receiving one `data_<bucket>.json` per century.
    pub shard_directory: PathBuf,
    /// Capitalize names while partitioning.
    pub normalize_names: bool,
    /// Delete shard files whose bucket did not occur in the partitioned input.
    pub prune_stale: bool,
    /// Spaces per indentation level in written files.
    pub indent: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canonical_file: PathBuf::from("data.json"),
            shard_directory: PathBuf::from("familyDatas"),
            normalize_names: false,
            prune_stale: false,
            indent: 4,
        }
    }
}

impl Settings {
    /// Reads settings from `file` and the environment. A missing `file` is
    /// an error only when `required`.
    pub fn load(file: &Path, required: bool) -> Result<Self> {
        let settings = Self::builder(file, required)?
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize::<Settings>()?;
        debug!(?settings, "settings loaded");
        Ok(settings)
    }
    /// Reads settings from `file` only, ignoring the environment.
    pub fn load_file(file: &Path, required: bool) -> Result<Self> {
        Ok(Self::builder(file, required)?.build()?.try_deserialize::<Settings>()?)
    }
    fn builder(file: &Path, required: bool) -> Result<ConfigBuilder<DefaultState>> {
        let defaults = Self::default();
        Ok(Config::builder()
            .set_default("canonical_file", defaults.canonical_file.to_string_lossy().into_owned())?
            .set_default("shard_directory", defaults.shard_directory.to_string_lossy().into_owned())?
            .set_default("normalize_names", defaults.normalize_names)?
            .set_default("prune_stale", defaults.prune_stale)?
            .set_default("indent", defaults.indent as i64)?
            .add_source(File::from(file).format(FileFormat::Json).required(required)))
    }
    pub fn canonical(&self) -> CanonicalFile {
        CanonicalFile::new(&self.canonical_file)
    }
    pub fn store(&self) -> ShardStore {
        ShardStore::new(&self.shard_directory)
    }
    pub fn partition_options(&self) -> PartitionOptions {
        PartitionOptions {
            normalize_names: self.normalize_names,
            prune_stale: self.prune_stale,
            indent: self.indent,
        }
    }
}
