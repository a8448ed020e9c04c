//! Test utilities for Assetlens crates.

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Manifest file name inside every catalog directory.
pub const MANIFEST: &str = "Contents.json";

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Creates a temporary file with given content.
pub fn temp_file(content: &str) -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let path = dir.path().join("test_file");
    std::fs::write(&path, content).expect("Failed to write temp file");
    (dir, path)
}

/// Builds an asset catalog on disk.
///
/// All paths are relative to the catalog root and include directory
/// suffixes (`"Brand/Logo.imageset"`). Methods chain:
///
/// ```
/// use assetlens_test_utils::CatalogFixture;
///
/// let catalog = CatalogFixture::new();
/// catalog
///     .namespace_folder("Brand")
///     .image_set("Brand/Logo.imageset", &[("logo.png", 100)])
///     .color_set("Accent.colorset", ["0.1", "0.2", "0.3"]);
/// assert!(catalog.path("Brand/Logo.imageset/logo.png").exists());
/// ```
pub struct CatalogFixture {
    dir: TempDir,
    root: PathBuf,
}

impl Default for CatalogFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogFixture {
    /// Empty `Assets.xcassets` in a fresh temp dir.
    pub fn new() -> Self {
        Self::named("Assets.xcassets")
    }

    /// Empty catalog with a custom directory name.
    pub fn named(name: &str) -> Self {
        let dir = temp_dir();
        let root = dir.path().join(name);
        std::fs::create_dir_all(&root).expect("Failed to create catalog root");
        Self { dir, root }
    }

    /// Catalog root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the catalog, outside of it.
    pub fn outside(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `rel`.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Plain folder without a manifest.
    pub fn folder(&self, rel: &str) -> &Self {
        std::fs::create_dir_all(self.path(rel)).expect("Failed to create folder");
        self
    }

    /// Folder whose manifest sets `provides-namespace`.
    pub fn namespace_folder(&self, rel: &str) -> &Self {
        self.manifest(
            rel,
            &json!({"info": {"author": "xcode", "version": 1}, "properties": {"provides-namespace": true}}),
        )
    }

    /// File with raw contents, parents created.
    pub fn file(&self, rel: &str, contents: impl AsRef<[u8]>) -> &Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent");
        }
        std::fs::write(&path, contents).expect("Failed to write file");
        self
    }

    /// `Contents.json` in `rel_dir`.
    pub fn manifest(&self, rel_dir: &str, manifest: &Value) -> &Self {
        let body = serde_json::to_string_pretty(manifest).expect("Failed to encode manifest");
        self.raw_manifest(rel_dir, &body)
    }

    /// `Contents.json` in `rel_dir` with text taken as-is.
    pub fn raw_manifest(&self, rel_dir: &str, body: &str) -> &Self {
        self.file(&format!("{rel_dir}/{MANIFEST}"), body)
    }

    /// Image set with one variant per `(filename, bytes)`, scales 1x, 2x, ...
    pub fn image_set(&self, rel: &str, files: &[(&str, usize)]) -> &Self {
        let images: Vec<Value> = files
            .iter()
            .enumerate()
            .map(|(i, (filename, bytes))| {
                self.file(&format!("{rel}/{filename}"), vec![0u8; *bytes]);
                json!({"filename": filename, "idiom": "universal", "scale": format!("{}x", i + 1)})
            })
            .collect();
        self.manifest(rel, &json!({"images": images, "info": {"author": "xcode", "version": 1}}))
    }

    /// App icon set with one 1024pt icon per `(filename, bytes)`.
    pub fn app_icon_set(&self, rel: &str, files: &[(&str, usize)]) -> &Self {
        let images: Vec<Value> = files
            .iter()
            .map(|(filename, bytes)| {
                self.file(&format!("{rel}/{filename}"), vec![0u8; *bytes]);
                json!({"filename": filename, "idiom": "universal", "platform": "ios", "size": "1024x1024"})
            })
            .collect();
        self.manifest(rel, &json!({"images": images}))
    }

    /// Color set with a single sRGB color.
    pub fn color_set(&self, rel: &str, [red, green, blue]: [&str; 3]) -> &Self {
        self.manifest(
            rel,
            &json!({
                "colors": [{
                    "idiom": "universal",
                    "color": {
                        "color-space": "srgb",
                        "components": {"red": red, "green": green, "blue": blue, "alpha": "1.000"}
                    }
                }]
            }),
        )
    }

    /// Data set holding a single file.
    pub fn data_set(&self, rel: &str, filename: &str, contents: impl AsRef<[u8]>) -> &Self {
        self.file(&format!("{rel}/{filename}"), contents);
        self.manifest(rel, &json!({"data": [{"filename": filename, "idiom": "universal"}]}))
    }

    /// Symlink at `rel` pointing to `target`.
    #[cfg(unix)]
    pub fn symlink(&self, target: impl AsRef<Path>, rel: &str) -> &Self {
        std::os::unix::fs::symlink(target, self.path(rel)).expect("Failed to create symlink");
        self
    }
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a Result is Err and return the error.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
