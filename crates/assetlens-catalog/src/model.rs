//! Catalog tree model.
//!
//! The tree is built once per parse and never mutated afterwards. Every type
//! serializes so consumers can export it as-is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Idiom recorded when a manifest entry does not name one.
pub const DEFAULT_IDIOM: &str = "universal";

/// A parsed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTree {
    /// The catalog directory's own name.
    pub name: String,
    /// Canonical absolute catalog root.
    pub root: PathBuf,
    /// Top-level nodes, sorted by name.
    pub children: Vec<AssetNode>,
}

/// Kind of a node in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    /// Plain directory.
    Folder,
    /// `.imageset` directory.
    ImageSet,
    /// `.appiconset` directory.
    AppIconSet,
    /// `.colorset` directory.
    ColorSet,
    /// `.dataset` directory.
    DataSet,
}

impl AssetKind {
    /// Every kind, in display order.
    pub const ALL: [AssetKind; 5] = [
        AssetKind::Folder,
        AssetKind::ImageSet,
        AssetKind::AppIconSet,
        AssetKind::ColorSet,
        AssetKind::DataSet,
    ];

    /// Directory suffix that marks this kind. Folders have none.
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Self::Folder => None,
            Self::ImageSet => Some(".imageset"),
            Self::AppIconSet => Some(".appiconset"),
            Self::ColorSet => Some(".colorset"),
            Self::DataSet => Some(".dataset"),
        }
    }

    /// Classify a directory name, returning the kind and display name.
    ///
    /// A name that is nothing but a suffix (`.imageset`) is hidden and never
    /// reaches this point, so the stripped name is never empty in practice.
    pub fn classify(dir_name: &str) -> (AssetKind, &str) {
        for kind in [Self::ImageSet, Self::AppIconSet, Self::ColorSet, Self::DataSet] {
            if let Some(base) = kind.suffix().and_then(|s| dir_name.strip_suffix(s)) {
                return (kind, base);
            }
        }
        (Self::Folder, dir_name)
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::ImageSet => "image set",
            Self::AppIconSet => "app icon set",
            Self::ColorSet => "color set",
            Self::DataSet => "data set",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A node of the catalog tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AssetNode {
    /// Plain directory with children.
    Folder(Folder),
    /// Image set.
    ImageSet(ImageSet),
    /// App icon set.
    AppIconSet(AppIconSet),
    /// Color set.
    ColorSet(ColorSet),
    /// Data set.
    DataSet(DataSet),
}

impl AssetNode {
    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Folder(n) => &n.name,
            Self::ImageSet(n) => &n.name,
            Self::AppIconSet(n) => &n.name,
            Self::ColorSet(n) => &n.name,
            Self::DataSet(n) => &n.name,
        }
    }

    /// Absolute directory path.
    pub fn path(&self) -> &Path {
        match self {
            Self::Folder(n) => &n.path,
            Self::ImageSet(n) => &n.path,
            Self::AppIconSet(n) => &n.path,
            Self::ColorSet(n) => &n.path,
            Self::DataSet(n) => &n.path,
        }
    }

    /// Node kind.
    pub fn kind(&self) -> AssetKind {
        match self {
            Self::Folder(_) => AssetKind::Folder,
            Self::ImageSet(_) => AssetKind::ImageSet,
            Self::AppIconSet(_) => AssetKind::AppIconSet,
            Self::ColorSet(_) => AssetKind::ColorSet,
            Self::DataSet(_) => AssetKind::DataSet,
        }
    }

    /// Children of a folder; empty for asset sets.
    pub fn children(&self) -> &[AssetNode] {
        match self {
            Self::Folder(f) => &f.children,
            _ => &[],
        }
    }

    /// Whether this is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }

    /// Whether this folder provides a namespace. Always false for sets.
    pub fn provides_namespace(&self) -> bool {
        matches!(self, Self::Folder(f) if f.provides_namespace)
    }

    /// Byte size of this node's own files. Folders and color sets are 0.
    pub fn size(&self) -> u64 {
        match self {
            Self::Folder(_) | Self::ColorSet(_) => 0,
            Self::ImageSet(n) => n.size,
            Self::AppIconSet(n) => n.size,
            Self::DataSet(n) => n.size,
        }
    }

    /// Byte size including every descendant.
    pub fn total_size(&self) -> u64 {
        match self {
            Self::Folder(f) => f.children.iter().map(AssetNode::total_size).sum(),
            other => other.size(),
        }
    }

    /// Number of variants (images, icons, colors or data items).
    pub fn variant_count(&self) -> usize {
        match self {
            Self::Folder(_) => 0,
            Self::ImageSet(n) => n.images.len(),
            Self::AppIconSet(n) => n.icons.len(),
            Self::ColorSet(n) => n.colors.len(),
            Self::DataSet(n) => n.data.len(),
        }
    }
}

/// Plain directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Directory name, verbatim.
    pub name: String,
    /// Absolute path.
    pub path: PathBuf,
    /// Set only when the folder manifest says `provides-namespace: true`.
    #[serde(default)]
    pub provides_namespace: bool,
    /// Sorted children.
    #[serde(default)]
    pub children: Vec<AssetNode>,
}

/// An `{appearance, value}` pair (e.g. `luminosity` / `dark`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    /// Appearance axis.
    pub appearance: String,
    /// Value on that axis.
    pub value: String,
}

/// Image set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSet {
    /// Directory name without `.imageset`.
    pub name: String,
    /// Absolute path.
    pub path: PathBuf,
    /// Variants in manifest order.
    pub images: Vec<ImageVariant>,
    /// `properties.template-rendering-intent`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_rendering_intent: Option<String>,
    /// `properties.preserves-vector-representation`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserves_vector_representation: Option<bool>,
    /// `properties.compression-type`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_type: Option<String>,
    /// Sum of variant file sizes.
    pub size: u64,
}

/// One image variant. An empty `filename` is an unfilled slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVariant {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    pub idiom: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appearances: Option<Vec<Appearance>>,
    /// Absolute path of the file. Absent for unfilled slots, missing files
    /// and names that resolve outside the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// App icon set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppIconSet {
    /// Directory name without `.appiconset`.
    pub name: String,
    /// Absolute path.
    pub path: PathBuf,
    /// Icons in manifest order.
    pub icons: Vec<AppIconVariant>,
    /// Sum of icon file sizes.
    pub size: u64,
}

/// One app icon slot. Unlike image variants, `appearances` is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppIconVariant {
    pub filename: String,
    /// Point size such as `60x60`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    pub idiom: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default)]
    pub appearances: Vec<Appearance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Color set. Colors are inline values, so there is no byte size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSet {
    /// Directory name without `.colorset`.
    pub name: String,
    /// Absolute path.
    pub path: PathBuf,
    /// Definitions in manifest order.
    pub colors: Vec<ColorDefinition>,
}

/// One color definition from a color set manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorDefinition {
    pub idiom: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appearances: Option<Vec<Appearance>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

/// A color in a named color space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorValue {
    /// Color space name (`srgb`, `display-p3`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_space: Option<String>,
    /// Raw components.
    pub components: ColorComponents,
}

/// Raw color components as written in the manifest: decimal (`"0.5"`),
/// 8-bit integer (`"128"`) or hex (`"0x80"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorComponents {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub green: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<String>,
}

/// Normalized color, every channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Rgba {
    /// `#RRGGBB` or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex_string(&self) -> String {
        let byte = |v: f64| (v * 255.0).round() as u8;
        if byte(self.alpha) == 255 {
            format!("#{:02X}{:02X}{:02X}", byte(self.red), byte(self.green), byte(self.blue))
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                byte(self.red),
                byte(self.green),
                byte(self.blue),
                byte(self.alpha)
            )
        }
    }
}

impl ColorComponents {
    /// Normalize to floating point channels.
    ///
    /// Returns `None` if red, green or blue is missing or unparseable. A
    /// missing alpha means opaque.
    pub fn to_rgba(&self) -> Option<Rgba> {
        let alpha = match &self.alpha {
            Some(a) => parse_component(a)?,
            None => 1.0,
        };
        Some(Rgba {
            red: parse_component(self.red.as_deref()?)?,
            green: parse_component(self.green.as_deref()?)?,
            blue: parse_component(self.blue.as_deref()?)?,
            alpha,
        })
    }
}

fn parse_component(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let value = if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16).ok()? as f64 / 255.0
    } else if raw.contains('.') {
        raw.parse::<f64>().ok()?
    } else {
        raw.parse::<u8>().ok()? as f64 / 255.0
    };
    value.is_finite().then(|| value.clamp(0.0, 1.0))
}

/// Data set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSet {
    /// Directory name without `.dataset`.
    pub name: String,
    /// Absolute path.
    pub path: PathBuf,
    /// Items in manifest order.
    pub data: Vec<DataItem>,
    /// Sum of item file sizes.
    pub size: u64,
}

/// One data item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataItem {
    pub filename: String,
    pub idiom: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// UTF-8 content for text-like files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_lottie: Option<bool>,
}
