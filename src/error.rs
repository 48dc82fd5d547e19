//! Error types for the catalog core.
//!
//! Only conditions that abort an operation are errors. Skipped folders,
//! duplicates and failed copies are reported through the interaction hook
//! and returned as [`AddOutcome`](crate::library::AddOutcome) values.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// A path the caller named does not exist.
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The interaction hook could not produce a usable value.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted index exists but could not be decoded.
    #[error("Corrupt index file {}: {source}", path.display())]
    IndexFormat {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to encode index: {0}")]
    IndexEncode(#[from] toml::ser::Error),

    #[error("Unsupported index version {found} (expected {expected})")]
    IndexVersion { found: u32, expected: u32 },

    /// Neither `--library` nor `library.location` named a catalog root.
    #[error("Library location is not set; pass --library or set library.location")]
    MissingLibrary,
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
