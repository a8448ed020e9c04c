//! Error types for catalog parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a whole catalog parse.
///
/// Anything that only affects a single node is reported as a
/// [`Diagnostic`](crate::diagnostics::Diagnostic) instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog root does not exist.
    #[error("catalog not found: {path}")]
    RootNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// Catalog root exists but is not a directory.
    #[error("catalog root is not a directory: {path}")]
    NotADirectory {
        /// Path that was requested.
        path: PathBuf,
    },

    /// Catalog root could not be resolved or listed.
    #[error("cannot read catalog {path}: {source}")]
    Unreadable {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// Classify an IO error raised while opening the catalog root.
    pub(crate) fn from_io(err: std::io::Error, path: PathBuf) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::RootNotFound { path },
            _ => Self::Unreadable { path, source: err },
        }
    }
}

/// Result type alias for catalog operations.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Failure to produce a single asset set from its manifest.
///
/// Never crosses the tree builder boundary: the walker turns it into a
/// diagnostic and drops the node.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// `Contents.json` is absent.
    #[error("manifest not found: {path}")]
    Missing {
        /// Expected manifest path.
        path: PathBuf,
    },

    /// `Contents.json` exists but could not be read.
    #[error("failed to read manifest {path}: {source}")]
    Unreadable {
        /// Manifest path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// `Contents.json` is not valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    InvalidJson {
        /// Manifest path.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The manifest parsed but does not have the expected shape.
    #[error("invalid manifest structure in {path}: {message}")]
    InvalidStructure {
        /// Manifest path.
        path: PathBuf,
        /// What was wrong.
        message: String,
    },
}

impl ManifestError {
    /// Manifest path this error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Missing { path }
            | Self::Unreadable { path, .. }
            | Self::InvalidJson { path, .. }
            | Self::InvalidStructure { path, .. } => path,
        }
    }
}
