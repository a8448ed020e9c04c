//! File size lookups.
//!
//! Sizes are informational, so every failure degrades to 0.

use futures::future::join_all;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Byte length of a file, or 0 if it cannot be stat'd.
pub async fn file_size(path: &Path) -> u64 {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata.len(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Cannot stat file, counting 0 bytes");
            0
        }
    }
}

/// Sum of the sizes of every present path.
pub async fn total_size<'a, I>(paths: I) -> u64
where
    I: IntoIterator<Item = &'a Option<PathBuf>>,
{
    let lookups = paths
        .into_iter()
        .flatten()
        .map(|path| file_size(path));
    join_all(lookups).await.into_iter().sum()
}
