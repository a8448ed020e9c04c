//! `.colorset` manifests.

use super::{lenient, lenient_list, read_manifest, string_or_number};
use crate::error::ManifestError;
use crate::model::{
    Appearance, ColorComponents, ColorDefinition, ColorSet, ColorValue, DEFAULT_IDIOM,
};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawColor {
    #[serde(default, deserialize_with = "lenient")]
    idiom: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    color: Option<RawColorValue>,
    #[serde(default, deserialize_with = "lenient_list")]
    appearances: Option<Vec<Appearance>>,
    #[serde(default, deserialize_with = "lenient")]
    subtype: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawColorValue {
    #[serde(default, deserialize_with = "lenient")]
    color_space: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    components: Option<RawComponents>,
}

#[derive(Debug, Default, Deserialize)]
struct RawComponents {
    #[serde(default, deserialize_with = "string_or_number")]
    red: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    green: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    blue: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    alpha: Option<String>,
}

impl From<RawColor> for ColorDefinition {
    fn from(raw: RawColor) -> Self {
        Self {
            idiom: raw.idiom.unwrap_or_else(|| DEFAULT_IDIOM.to_string()),
            color: raw.color.map(|color| {
                let components = color.components.unwrap_or_default();
                ColorValue {
                    color_space: color.color_space,
                    components: ColorComponents {
                        red: components.red,
                        green: components.green,
                        blue: components.blue,
                        alpha: components.alpha,
                    },
                }
            }),
            appearances: raw.appearances,
            subtype: raw.subtype,
        }
    }
}

/// Parse a color set directory. Colors are inline, nothing else is read.
pub async fn parse_color_set(dir: &Path, name: &str) -> Result<ColorSet, ManifestError> {
    let manifest = read_manifest(dir).await?;
    let colors = manifest
        .entries::<RawColor>("colors")?
        .into_iter()
        .map(ColorDefinition::from)
        .collect();

    Ok(ColorSet {
        name: name.to_string(),
        path: dir.to_path_buf(),
        colors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::MANIFEST_FILE;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_light_and_dark() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{
                "colors": [
                    {"idiom": "universal",
                     "color": {"color-space": "srgb",
                               "components": {"red": "0xFF", "green": "0x80", "blue": "0x00", "alpha": "1.000"}}},
                    {"idiom": "universal",
                     "appearances": [{"appearance": "luminosity", "value": "dark"}],
                     "color": {"color-space": "display-p3",
                               "components": {"red": 0.2, "green": "0.200", "blue": "0.200"}}}
                ]
            }"#,
        )
        .unwrap();

        let color_set = parse_color_set(dir.path(), "Accent").await.unwrap();
        assert_eq!(color_set.name, "Accent");
        assert_eq!(color_set.colors.len(), 2);

        let light = color_set.colors[0].color.as_ref().unwrap();
        assert_eq!(light.color_space.as_deref(), Some("srgb"));
        assert_eq!(light.components.red.as_deref(), Some("0xFF"));
        assert_eq!(light.components.to_rgba().unwrap().to_hex_string(), "#FF8000");

        let dark = &color_set.colors[1];
        assert_eq!(dark.appearances.as_ref().unwrap()[0].value, "dark");
        let dark_color = dark.color.as_ref().unwrap();
        assert_eq!(dark_color.components.red.as_deref(), Some("0.2"));
        assert!(dark_color.components.alpha.is_none());
    }

    #[tokio::test]
    async fn test_color_without_value() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"colors": [{"idiom": "universal"}]}"#,
        )
        .unwrap();
        let color_set = parse_color_set(dir.path(), "Empty").await.unwrap();
        assert!(color_set.colors[0].color.is_none());
    }

    #[tokio::test]
    async fn test_colors_must_be_array() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), r#"{"colors": null}"#).unwrap();
        let err = parse_color_set(dir.path(), "Bad").await.unwrap_err();
        assert!(matches!(err, ManifestError::InvalidStructure { .. }));
    }
}
