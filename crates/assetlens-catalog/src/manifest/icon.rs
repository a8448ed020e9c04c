//! `.appiconset` manifests.

use super::{lenient, lenient_list, read_manifest, resolve_file, string_or_number};
use crate::context::ParseContext;
use crate::error::ManifestError;
use crate::model::{AppIconSet, AppIconVariant, Appearance, DEFAULT_IDIOM};
use crate::size::total_size;
use futures::future::join_all;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawIcon {
    #[serde(default, deserialize_with = "lenient")]
    filename: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    size: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    scale: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    idiom: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    platform: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    appearances: Option<Vec<Appearance>>,
}

impl RawIcon {
    async fn into_variant(self, ctx: &ParseContext, dir: &Path) -> AppIconVariant {
        let filename = self.filename.unwrap_or_default();
        AppIconVariant {
            path: resolve_file(ctx, dir, &filename).await,
            filename,
            size: self.size,
            scale: self.scale,
            idiom: self.idiom.unwrap_or_else(|| DEFAULT_IDIOM.to_string()),
            platform: self.platform,
            appearances: self.appearances.unwrap_or_default(),
        }
    }
}

/// Parse an app icon set directory.
pub async fn parse_app_icon_set(
    ctx: &ParseContext,
    dir: &Path,
    name: &str,
) -> Result<AppIconSet, ManifestError> {
    let manifest = read_manifest(dir).await?;

    let raw = manifest.entries::<RawIcon>("images")?;
    let icons: Vec<AppIconVariant> =
        join_all(raw.into_iter().map(|raw| raw.into_variant(ctx, dir))).await;
    let size = total_size(icons.iter().map(|icon| &icon.path)).await;

    Ok(AppIconSet {
        name: name.to_string(),
        path: dir.to_path_buf(),
        icons,
        size,
    })
}
