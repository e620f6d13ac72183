use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Process exit codes, part of the shell contract of the binary.
pub const EXIT_SUCCESS: u8 = 0;
/// A required file or directory is missing or could not be read/written.
pub const EXIT_STORAGE: u8 = 1;
/// Persisted content is not a JSON array of objects.
pub const EXIT_FORMAT: u8 = 2;
/// Configuration could not be loaded.
pub const EXIT_CONFIG: u8 = 3;
/// Bad command line arguments. Kept apart from `EXIT_FORMAT`, which clap
/// would otherwise share for usage errors.
pub const EXIT_USAGE: u8 = 4;

#[derive(Error, Debug)]
pub enum RootshardError {
    #[error("Storage error at {}: {source}", path.display())]
    Storage { path: PathBuf, source: io::Error },
    #[error("No shard files found in {}", dir.display())]
    NoShards { dir: PathBuf },
    #[error("Format error in {}: {message}", path.display())]
    Format { path: PathBuf, message: String },
    #[error("Config error: {0}")]
    Config(String),
}

impl RootshardError {
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage { path: path.into(), source }
    }
    pub fn format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Format { path: path.into(), message: message.into() }
    }
    /// Maps the error taxonomy onto the exit codes of the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Storage { .. } | Self::NoShards { .. } => EXIT_STORAGE,
            Self::Format { .. } => EXIT_FORMAT,
            Self::Config(_) => EXIT_CONFIG,
        }
    }
}

pub type Result<T> = std::result::Result<T, RootshardError>;

// Helper conversions
impl From<::config::ConfigError> for RootshardError {
    fn from(e: ::config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
