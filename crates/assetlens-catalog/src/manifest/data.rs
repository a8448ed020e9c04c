//! `.dataset` manifests.

use super::{lenient, read_manifest, resolve_file};
use crate::context::ParseContext;
use crate::error::ManifestError;
use crate::lottie::{is_lottie_json, LOTTIE_EXTENSION};
use crate::model::{DataItem, DataSet, DEFAULT_IDIOM};
use crate::path::extension_lowercase;
use crate::size::total_size;
use futures::future::join_all;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct RawData {
    #[serde(default, deserialize_with = "lenient")]
    filename: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    idiom: Option<String>,
}

/// Parse a data set directory, loading text items into memory.
pub async fn parse_data_set(
    ctx: &ParseContext,
    dir: &Path,
    name: &str,
) -> Result<DataSet, ManifestError> {
    let manifest = read_manifest(dir).await?;
    let raw = manifest.entries::<RawData>("data")?;

    let data = join_all(raw.into_iter().map(|item| load_item(ctx, dir, item))).await;
    let size = total_size(data.iter().map(|item| &item.path)).await;

    Ok(DataSet {
        name: name.to_string(),
        path: dir.to_path_buf(),
        data,
        size,
    })
}

async fn load_item(ctx: &ParseContext, dir: &Path, raw: RawData) -> DataItem {
    let filename = raw.filename.unwrap_or_default();
    let mut item = DataItem {
        path: resolve_file(ctx, dir, &filename).await,
        filename,
        idiom: raw.idiom.unwrap_or_else(|| DEFAULT_IDIOM.to_string()),
        content: None,
        is_lottie: None,
    };

    let Some(path) = item.path.as_deref() else {
        return item;
    };
    let Some(ext) = extension_lowercase(&item.filename) else {
        return item;
    };

    if ext == LOTTIE_EXTENSION {
        // Zipped animation: never read as text.
        item.is_lottie = Some(true);
    } else if ctx.options.is_text_extension(&ext) {
        item.content = match tokio::fs::read_to_string(path).await {
            Ok(text) => Some(text),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Cannot read data item content");
                None
            }
        };
        if ext == "json" {
            item.is_lottie = Some(item.content.as_deref().is_some_and(is_lottie_json));
        }
    }

    item
}
