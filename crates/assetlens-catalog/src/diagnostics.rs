//! Recoverable problems recorded during a parse.

use crate::error::ManifestError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Category of a recoverable problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A subdirectory listing failed.
    DirectoryUnreadable,
    /// A typed asset set has no `Contents.json`.
    ManifestMissing,
    /// `Contents.json` exists but could not be read.
    ManifestUnreadable,
    /// `Contents.json` is not valid JSON.
    ManifestInvalidJson,
    /// `Contents.json` lacks the expected structure.
    ManifestInvalidStructure,
    /// Recursion stopped at the depth limit.
    DepthLimitExceeded,
    /// An entry resolves outside the catalog root.
    PathEscapesRoot,
    /// An entry could not be resolved at all (dangling link, permissions).
    PathUnresolvable,
}

impl DiagnosticKind {
    /// Stable identifier used in log fields and text output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectoryUnreadable => "directory-unreadable",
            Self::ManifestMissing => "manifest-missing",
            Self::ManifestUnreadable => "manifest-unreadable",
            Self::ManifestInvalidJson => "manifest-invalid-json",
            Self::ManifestInvalidStructure => "manifest-invalid-structure",
            Self::DepthLimitExceeded => "depth-limit-exceeded",
            Self::PathEscapesRoot => "path-escapes-root",
            Self::PathUnresolvable => "path-unresolvable",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recoverable problem, tied to the entry that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Entry the problem was found at.
    pub path: PathBuf,
    /// Category.
    pub kind: DiagnosticKind,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic.
    pub fn new(kind: DiagnosticKind, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    /// Diagnostic for an asset set whose manifest failed.
    pub fn from_manifest_error(asset_dir: &Path, err: &ManifestError) -> Self {
        let kind = match err {
            ManifestError::Missing { .. } => DiagnosticKind::ManifestMissing,
            ManifestError::Unreadable { .. } => DiagnosticKind::ManifestUnreadable,
            ManifestError::InvalidJson { .. } => DiagnosticKind::ManifestInvalidJson,
            ManifestError::InvalidStructure { .. } => DiagnosticKind::ManifestInvalidStructure,
        };
        Self::new(kind, asset_dir, err.to_string())
    }

    /// Emit this diagnostic to the log.
    pub fn log(&self, operation_id: &str) {
        match self.kind {
            DiagnosticKind::DepthLimitExceeded | DiagnosticKind::PathEscapesRoot => {
                warn!(
                    op_id = %operation_id,
                    kind = %self.kind,
                    path = %self.path.display(),
                    "{}", self.message
                );
            }
            DiagnosticKind::PathUnresolvable => {
                debug!(
                    op_id = %operation_id,
                    kind = %self.kind,
                    path = %self.path.display(),
                    "{}", self.message
                );
            }
            _ => {
                warn!(
                    op_id = %operation_id,
                    kind = %self.kind,
                    path = %self.path.display(),
                    "Skipping entry: {}", self.message
                );
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.path.display(), self.message)
    }
}
