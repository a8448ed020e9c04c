//! `Contents.json` reading and per-kind manifest parsers.
//!
//! Every parser validates that its required array key is present and is an
//! array before mapping entries, so a malformed manifest is reported as a
//! structural problem rather than an opaque serde error. Fields inside an
//! entry are all optional: a value of the wrong type reads as absent.

mod color;
mod data;
mod icon;
mod image;

pub use color::parse_color_set;
pub use data::parse_data_set;
pub use icon::parse_app_icon_set;
pub use image::parse_image_set;

use crate::context::ParseContext;
use crate::error::ManifestError;
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Manifest file name inside every asset set and folder.
pub const MANIFEST_FILE: &str = "Contents.json";

/// A manifest read from disk.
#[derive(Debug)]
pub struct Manifest {
    /// Path of the `Contents.json` file.
    pub path: PathBuf,
    /// Parsed document.
    pub value: Value,
}

impl Manifest {
    /// Require `key` to be an array and deserialize each element.
    ///
    /// An element that is not an object fails the whole manifest.
    pub fn entries<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, ManifestError> {
        let items = self
            .value
            .get(key)
            .ok_or_else(|| self.invalid(format!("missing `{key}` array")))?
            .as_array()
            .ok_or_else(|| self.invalid(format!("`{key}` must be an array")))?;

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                T::deserialize(item)
                    .map_err(|e| self.invalid(format!("`{key}[{index}]`: {e}")))
            })
            .collect()
    }

    /// String at `properties.<key>`, if present and a string.
    pub fn property_str(&self, key: &str) -> Option<String> {
        self.property(key)?.as_str().map(str::to_string)
    }

    /// Bool at `properties.<key>`, if present and a bool.
    pub fn property_bool(&self, key: &str) -> Option<bool> {
        self.property(key)?.as_bool()
    }

    fn property(&self, key: &str) -> Option<&Value> {
        let value = self.value.get("properties")?.get(key)?;
        if value.is_null() {
            return None;
        }
        Some(value)
    }

    fn invalid(&self, message: String) -> ManifestError {
        ManifestError::InvalidStructure {
            path: self.path.clone(),
            message,
        }
    }
}

/// Read and parse `<dir>/Contents.json`.
pub async fn read_manifest(dir: &Path) -> Result<Manifest, ManifestError> {
    let path = dir.join(MANIFEST_FILE);
    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ManifestError::Missing { path });
        }
        Err(source) => return Err(ManifestError::Unreadable { path, source }),
    };

    let value = serde_json::from_str(&text)
        .map_err(|source| ManifestError::InvalidJson {
            path: path.clone(),
            source,
        })?;

    Ok(Manifest { path, value })
}

/// Whether a plain folder's manifest sets `provides-namespace: true`.
///
/// A folder manifest is optional, so every failure reads as `false`.
pub async fn folder_provides_namespace(dir: &Path) -> bool {
    match read_manifest(dir).await {
        Ok(manifest) => manifest.property_bool("provides-namespace") == Some(true),
        Err(ManifestError::Missing { .. }) => false,
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "Ignoring unusable folder manifest");
            false
        }
    }
}

/// Resolve a manifest filename against its asset directory.
///
/// Empty names are unfilled slots and have no path. A file that does not
/// exist, or that resolves outside the catalog root, also has no path.
pub(crate) async fn resolve_file(
    ctx: &ParseContext,
    dir: &Path,
    filename: &str,
) -> Option<PathBuf> {
    if filename.is_empty() {
        return None;
    }

    let path = dir.join(filename);
    let resolved = match tokio::fs::canonicalize(&path).await {
        Ok(resolved) => resolved,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Variant file not found");
            return None;
        }
    };
    if !ctx.contains(&resolved) {
        warn!(
            op_id = %ctx.operation_id,
            path = %path.display(),
            resolved = %resolved.display(),
            "Variant file resolves outside the catalog"
        );
        return None;
    }
    Some(path)
}

/// Deserialize an optional field, reading a value of the wrong type as absent.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(T::deserialize(value).ok())
}

/// Deserialize an optional list, dropping elements of the wrong shape.
///
/// A value that is not an array reads as absent.
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        items
            .into_iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
    ))
}

/// Accept either a JSON string or a JSON number and keep its text.
///
/// Any other value reads as absent.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// Context rooted at `root` with default options.
#[cfg(test)]
pub(crate) fn test_context(root: &Path) -> ParseContext {
    let root = root.canonicalize().expect("canonical test root");
    ParseContext::new(root, crate::context::ParseOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Debug, Deserialize)]
    struct Entry {
        filename: Option<String>,
    }

    #[tokio::test]
    async fn test_missing_manifest() {
        let dir = tempdir().unwrap();
        let err = read_manifest(dir.path()).await.unwrap_err();
        assert!(matches!(err, ManifestError::Missing { .. }));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "{ not json").unwrap();
        let err = read_manifest(dir.path()).await.unwrap_err();
        assert!(matches!(err, ManifestError::InvalidJson { .. }));
    }

    #[tokio::test]
    async fn test_entries_require_array() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), r#"{"images": {}}"#).unwrap();
        let manifest = read_manifest(dir.path()).await.unwrap();

        let err = manifest.entries::<Entry>("images").unwrap_err();
        assert!(err.to_string().contains("`images` must be an array"));

        let err = manifest.entries::<Entry>("colors").unwrap_err();
        assert!(err.to_string().contains("missing `colors` array"));
    }

    #[tokio::test]
    async fn test_entries_deserialize() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"images": [{"filename": "a.png"}, {}]}"#,
        )
        .unwrap();
        let manifest = read_manifest(dir.path()).await.unwrap();
        let entries = manifest.entries::<Entry>("images").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].filename.as_deref(), Some("a.png"));
        assert!(entries[1].filename.is_none());
    }

    #[tokio::test]
    async fn test_folder_namespace_flag() {
        let dir = tempdir().unwrap();
        assert!(!folder_provides_namespace(dir.path()).await);

        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"properties": {"provides-namespace": true}}"#,
        )
        .unwrap();
        assert!(folder_provides_namespace(dir.path()).await);

        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"properties": {"provides-namespace": false}}"#,
        )
        .unwrap();
        assert!(!folder_provides_namespace(dir.path()).await);

        std::fs::write(dir.path().join(MANIFEST_FILE), "garbage").unwrap();
        assert!(!folder_provides_namespace(dir.path()).await);
    }

    #[tokio::test]
    async fn test_resolve_file() {
        let dir = tempdir().unwrap();
        let set = dir.path().join("A.imageset");
        std::fs::create_dir(&set).unwrap();
        std::fs::write(set.join("a.png"), [0u8; 4]).unwrap();
        let ctx = test_context(dir.path());

        assert_eq!(resolve_file(&ctx, &set, "a.png").await, Some(set.join("a.png")));
        assert_eq!(resolve_file(&ctx, &set, "").await, None);
        assert_eq!(resolve_file(&ctx, &set, "gone.png").await, None);
    }

    #[tokio::test]
    async fn test_resolve_file_stays_inside_root() {
        let outer = tempdir().unwrap();
        let root = outer.path().join("Assets.xcassets");
        let set = root.join("Leak.dataset");
        std::fs::create_dir_all(&set).unwrap();
        std::fs::write(outer.path().join("secret.txt"), "secret").unwrap();
        let ctx = test_context(&root);

        assert_eq!(resolve_file(&ctx, &set, "../../secret.txt").await, None);
        let absolute = outer.path().join("secret.txt");
        assert_eq!(resolve_file(&ctx, &set, &absolute.to_string_lossy()).await, None);

        std::fs::write(set.join("inner.txt"), "ok").unwrap();
        assert_eq!(
            resolve_file(&ctx, &set, "../Leak.dataset/inner.txt").await,
            Some(set.join("../Leak.dataset/inner.txt"))
        );
    }

    #[test]
    fn test_lenient_fields() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default, deserialize_with = "lenient")]
            name: Option<String>,
            #[serde(default, deserialize_with = "lenient_list")]
            tags: Option<Vec<String>>,
        }

        let w: Wrapper = serde_json::from_str(r#"{"name": 5, "tags": ["a", 1, "b"]}"#).unwrap();
        assert!(w.name.is_none());
        assert_eq!(w.tags, Some(vec!["a".to_string(), "b".to_string()]));

        let w: Wrapper = serde_json::from_str(r#"{"name": "x", "tags": {}}"#).unwrap();
        assert_eq!(w.name.as_deref(), Some("x"));
        assert!(w.tags.is_none());

        let w: Wrapper = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert!(w.name.is_none());
        assert!(w.tags.is_none());
    }

    #[test]
    fn test_string_or_number() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default, deserialize_with = "string_or_number")]
            value: Option<String>,
        }

        let w: Wrapper = serde_json::from_str(r#"{"value": "0.5"}"#).unwrap();
        assert_eq!(w.value.as_deref(), Some("0.5"));
        let w: Wrapper = serde_json::from_str(r#"{"value": 1}"#).unwrap();
        assert_eq!(w.value.as_deref(), Some("1"));
        let w: Wrapper = serde_json::from_str(r#"{}"#).unwrap();
        assert!(w.value.is_none());
        let w: Wrapper = serde_json::from_str(r#"{"value": true}"#).unwrap();
        assert!(w.value.is_none());
    }
}
