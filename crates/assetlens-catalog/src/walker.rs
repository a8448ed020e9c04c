//! Recursive catalog walking and classification.

use crate::context::{ParseContext, ParseOptions};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::error::{CatalogError, CatalogResult};
use crate::manifest::{
    folder_provides_namespace, parse_app_icon_set, parse_color_set, parse_data_set,
    parse_image_set,
};
use crate::model::{AssetKind, AssetNode, CatalogTree, Folder};
use crate::sort::sort_nodes;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, Span};

/// Outcome of a catalog parse: the tree plus every recoverable problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogReport {
    /// Parsed tree.
    pub tree: CatalogTree,
    /// Recoverable problems, sorted by path.
    pub diagnostics: Vec<Diagnostic>,
}

/// Nodes and diagnostics produced for one directory.
#[derive(Debug, Default)]
pub struct DirectoryListing {
    /// Sorted child nodes.
    pub nodes: Vec<AssetNode>,
    /// Problems found in this subtree.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a catalog with default options.
pub async fn parse_catalog(path: impl AsRef<Path>) -> CatalogResult<CatalogReport> {
    parse_catalog_with(path, ParseOptions::default()).await
}

/// Parse a catalog.
///
/// Fails only if the root itself is unusable; everything below the root
/// degrades into [`CatalogReport::diagnostics`].
pub async fn parse_catalog_with(
    path: impl AsRef<Path>,
    options: ParseOptions,
) -> CatalogResult<CatalogReport> {
    parse_root(path.as_ref(), options).await
}

#[instrument(skip(options), fields(op_id = tracing::field::Empty))]
async fn parse_root(requested: &Path, options: ParseOptions) -> CatalogResult<CatalogReport> {
    let start = Instant::now();

    let root = tokio::fs::canonicalize(requested)
        .await
        .map_err(|e| CatalogError::from_io(e, requested.to_path_buf()))?;
    let metadata = tokio::fs::metadata(&root)
        .await
        .map_err(|e| CatalogError::from_io(e, requested.to_path_buf()))?;
    if !metadata.is_dir() {
        return Err(CatalogError::NotADirectory {
            path: requested.to_path_buf(),
        });
    }

    let entries = list_candidates(&root)
        .await
        .map_err(|source| CatalogError::Unreadable {
            path: requested.to_path_buf(),
            source,
        })?;

    let ctx = ParseContext::new(root.clone(), options);
    Span::current().record("op_id", ctx.operation_id.as_str());
    debug!("Parsing catalog at {:?}", root);

    let mut listing = parse_entries(&ctx, entries, 0).await;
    listing
        .diagnostics
        .sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.kind.as_str().cmp(b.kind.as_str())));

    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    info!(
        op_id = %ctx.operation_id,
        nodes = listing.nodes.len(),
        diagnostics = listing.diagnostics.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Parsed catalog {}", name
    );

    Ok(CatalogReport {
        tree: CatalogTree {
            name,
            root,
            children: listing.nodes,
        },
        diagnostics: listing.diagnostics,
    })
}

/// Parse one directory of the catalog.
///
/// `depth` is the number of folders between the root and `dir`. Past
/// [`ParseOptions::max_depth`] nothing is read and a diagnostic is returned
/// instead. A listing failure is also reported as a diagnostic.
pub fn parse_directory<'a>(
    ctx: &'a ParseContext,
    dir: &'a Path,
    depth: usize,
) -> BoxFuture<'a, DirectoryListing> {
    async move {
        if depth > ctx.options.max_depth {
            let diag = report(
                ctx,
                Diagnostic::new(
                    DiagnosticKind::DepthLimitExceeded,
                    dir,
                    format!("maximum depth of {} exceeded", ctx.options.max_depth),
                ),
            );
            return DirectoryListing {
                nodes: Vec::new(),
                diagnostics: vec![diag],
            };
        }

        match list_candidates(dir).await {
            Ok(entries) => parse_entries(ctx, entries, depth).await,
            Err(e) => {
                let diag = report(
                    ctx,
                    Diagnostic::new(
                        DiagnosticKind::DirectoryUnreadable,
                        dir,
                        format!("cannot list directory: {e}"),
                    ),
                );
                DirectoryListing {
                    nodes: Vec::new(),
                    diagnostics: vec![diag],
                }
            }
        }
    }
    .boxed()
}

/// Parse sibling entries concurrently, then merge and sort.
async fn parse_entries(
    ctx: &ParseContext,
    entries: Vec<PathBuf>,
    depth: usize,
) -> DirectoryListing {
    let pending: Vec<_> = entries
        .into_iter()
        .map(|path| parse_entry(ctx, path, depth))
        .collect();
    let outcomes: Vec<DirectoryListing> = stream::iter(pending)
        .buffer_unordered(ctx.options.max_concurrency.max(1))
        .collect()
        .await;

    let mut listing = DirectoryListing::default();
    for outcome in outcomes {
        listing.nodes.extend(outcome.nodes);
        listing.diagnostics.extend(outcome.diagnostics);
    }
    sort_nodes(&mut listing.nodes);
    listing
}

/// Classify and parse a single entry. Produces at most one node.
async fn parse_entry(ctx: &ParseContext, path: PathBuf, depth: usize) -> DirectoryListing {
    let mut outcome = DirectoryListing::default();

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(e) => {
            outcome.diagnostics.push(unresolvable(ctx, &path, &e));
            return outcome;
        }
    };
    if !metadata.is_dir() {
        return outcome;
    }

    let resolved = match tokio::fs::canonicalize(&path).await {
        Ok(resolved) => resolved,
        Err(e) => {
            outcome.diagnostics.push(unresolvable(ctx, &path, &e));
            return outcome;
        }
    };
    if !ctx.contains(&resolved) {
        outcome.diagnostics.push(report(
            ctx,
            Diagnostic::new(
                DiagnosticKind::PathEscapesRoot,
                &path,
                format!("resolves to {} outside the catalog", resolved.display()),
            ),
        ));
        return outcome;
    }

    let dir_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (kind, name) = AssetKind::classify(&dir_name);

    let parsed = match kind {
        AssetKind::Folder => {
            let (provides_namespace, children) = futures::join!(
                folder_provides_namespace(&path),
                parse_directory(ctx, &path, depth + 1)
            );
            outcome.diagnostics.extend(children.diagnostics);
            Ok(AssetNode::Folder(Folder {
                name: name.to_string(),
                path: path.clone(),
                provides_namespace,
                children: children.nodes,
            }))
        }
        AssetKind::ImageSet => parse_image_set(ctx, &path, name)
            .await
            .map(AssetNode::ImageSet),
        AssetKind::AppIconSet => parse_app_icon_set(ctx, &path, name)
            .await
            .map(AssetNode::AppIconSet),
        AssetKind::ColorSet => parse_color_set(&path, name).await.map(AssetNode::ColorSet),
        AssetKind::DataSet => parse_data_set(ctx, &path, name)
            .await
            .map(AssetNode::DataSet),
    };

    match parsed {
        Ok(node) => outcome.nodes.push(node),
        Err(e) => outcome
            .diagnostics
            .push(report(ctx, Diagnostic::from_manifest_error(&path, &e))),
    }
    outcome
}

/// Non-hidden entries of `dir` that could be directories.
async fn list_candidates(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut candidates = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        // Regular files never become nodes; links are resolved later.
        if matches!(entry.file_type().await, Ok(ft) if ft.is_file()) {
            continue;
        }
        candidates.push(entry.path());
    }

    Ok(candidates)
}

fn unresolvable(ctx: &ParseContext, path: &Path, err: &io::Error) -> Diagnostic {
    report(
        ctx,
        Diagnostic::new(
            DiagnosticKind::PathUnresolvable,
            path,
            format!("cannot resolve entry: {err}"),
        ),
    )
}

fn report(ctx: &ParseContext, diagnostic: Diagnostic) -> Diagnostic {
    diagnostic.log(&ctx.operation_id);
    diagnostic
}
