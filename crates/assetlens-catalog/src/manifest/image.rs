//! `.imageset` manifests.

use super::{lenient, lenient_list, read_manifest, resolve_file, string_or_number};
use crate::context::ParseContext;
use crate::error::ManifestError;
use crate::model::{Appearance, ImageSet, ImageVariant, DEFAULT_IDIOM};
use crate::size::total_size;
use futures::future::join_all;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawImage {
    #[serde(default, deserialize_with = "lenient")]
    filename: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    scale: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    idiom: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    subtype: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    appearances: Option<Vec<Appearance>>,
}

impl RawImage {
    async fn into_variant(self, ctx: &ParseContext, dir: &Path) -> ImageVariant {
        let filename = self.filename.unwrap_or_default();
        ImageVariant {
            path: resolve_file(ctx, dir, &filename).await,
            filename,
            scale: self.scale,
            idiom: self.idiom.unwrap_or_else(|| DEFAULT_IDIOM.to_string()),
            subtype: self.subtype,
            appearances: self.appearances,
        }
    }
}

/// Parse an image set directory.
pub async fn parse_image_set(
    ctx: &ParseContext,
    dir: &Path,
    name: &str,
) -> Result<ImageSet, ManifestError> {
    let manifest = read_manifest(dir).await?;

    let raw = manifest.entries::<RawImage>("images")?;
    let images: Vec<ImageVariant> =
        join_all(raw.into_iter().map(|raw| raw.into_variant(ctx, dir))).await;
    let size = total_size(images.iter().map(|image| &image.path)).await;

    Ok(ImageSet {
        name: name.to_string(),
        path: dir.to_path_buf(),
        template_rendering_intent: manifest.property_str("template-rendering-intent"),
        preserves_vector_representation: manifest.property_bool("preserves-vector-representation"),
        compression_type: manifest.property_str("compression-type"),
        images,
        size,
    })
}
