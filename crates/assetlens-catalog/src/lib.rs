//! Assetlens catalog - asset catalog parsing.
//!
//! Walks an `.xcassets`-style directory and produces a typed tree:
//!
//! - folders, optionally providing a namespace
//! - `.imageset`, `.appiconset`, `.colorset` and `.dataset` asset sets
//! - per-set variants with resolved file paths and byte sizes
//!
//! Problems below the root never abort a parse. They are collected as
//! [`Diagnostic`]s next to the tree in a [`CatalogReport`].

#![warn(missing_docs)]

pub mod context;
pub mod diagnostics;
pub mod error;
pub mod lottie;
pub mod manifest;
pub mod model;
pub mod path;
pub mod query;
pub mod size;
pub mod sort;
pub mod walker;

// Re-exports
pub use context::{ParseContext, ParseOptions};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::{CatalogError, CatalogResult, ManifestError};
pub use lottie::{is_lottie_json, is_lottie_value};
pub use model::{
    AppIconSet, AppIconVariant, Appearance, AssetKind, AssetNode, CatalogTree, ColorComponents,
    ColorDefinition, ColorSet, ColorValue, DataItem, DataSet, Folder, ImageSet, ImageVariant,
    Rgba,
};
pub use query::{CatalogSummary, FlatEntry, FlatRow};
pub use size::file_size;
pub use sort::natural_cmp;
pub use walker::{
    parse_catalog, parse_catalog_with, parse_directory, CatalogReport, DirectoryListing,
};
