//! Parse options and the read-only context shared by one parse.

use std::path::{Path, PathBuf};

/// Default maximum folder depth below the catalog root.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Default number of sibling entries parsed at once per directory level.
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

/// Extensions whose data items are loaded as UTF-8 text.
pub const DEFAULT_TEXT_EXTENSIONS: &[&str] = &["json", "txt", "xml", "plist", "strings"];

/// Options for a catalog parse.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Depth past which recursion stops.
    pub max_depth: usize,
    /// Sibling entries in flight per directory level.
    pub max_concurrency: usize,
    /// Data item extensions read into `content` (lowercase, no dot).
    pub text_extensions: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            text_extensions: DEFAULT_TEXT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl ParseOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum depth.
    pub fn depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set sibling concurrency (clamped to at least 1).
    pub fn concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = limit.max(1);
        self
    }

    /// Replace the text extension list.
    pub fn text_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.text_extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Whether a lowercase extension is read as text.
    pub fn is_text_extension(&self, ext: &str) -> bool {
        self.text_extensions.iter().any(|e| e == ext)
    }
}

/// Read-only state shared by every task of one parse.
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Canonical catalog root.
    pub root: PathBuf,
    /// Options.
    pub options: ParseOptions,
    /// Unique operation ID for logging.
    pub operation_id: String,
}

impl ParseContext {
    /// Create a context for an already canonicalized root.
    pub fn new(root: PathBuf, options: ParseOptions) -> Self {
        Self {
            root,
            options,
            operation_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Check whether a canonical path lies inside the catalog root.
    pub fn contains(&self, path: &Path) -> bool {
        crate::path::is_within(path, &self.root)
    }
}
