//! Configuration types.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetlensConfig {
    /// Catalog parser settings.
    pub parser: ParserConfig,
    /// Rendering settings.
    pub output: OutputConfig,
}

/// Catalog parser settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Deepest folder level whose children are still read.
    pub max_depth: usize,
    /// Sibling entries parsed at once per directory.
    pub max_concurrency: usize,
    /// Data item extensions loaded as text, without the dot.
    pub text_extensions: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            max_concurrency: 16,
            text_extensions: ["json", "txt", "xml", "plist", "strings"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print parse diagnostics to stderr.
    pub show_diagnostics: bool,
    /// Show sizes as `12.3 KB` instead of raw bytes.
    pub human_sizes: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_diagnostics: true,
            human_sizes: true,
        }
    }
}
