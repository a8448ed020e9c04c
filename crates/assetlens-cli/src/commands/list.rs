//! List command implementation.

use std::fmt::Write as _;
use std::path::PathBuf;

use assetlens_catalog::{AssetKind, CatalogTree};
use clap::{Parser, ValueEnum, ValueHint};
use serde::Serialize;

use super::load_catalog;
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{describe_node, print_output, FormattedOutput};

/// List every node with its index and logical path
#[derive(Debug, Parser)]
pub struct ListCommand {
    /// Catalog directory (`*.xcassets`)
    #[arg(value_hint = ValueHint::DirPath)]
    pub catalog: PathBuf,

    /// Only list nodes of this kind
    #[arg(long, value_enum)]
    pub kind: Option<KindFilter>,
}

/// Node kind accepted by `--kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindFilter {
    Folder,
    Image,
    Icon,
    Color,
    Data,
}

impl From<KindFilter> for AssetKind {
    fn from(kind: KindFilter) -> Self {
        match kind {
            KindFilter::Folder => AssetKind::Folder,
            KindFilter::Image => AssetKind::ImageSet,
            KindFilter::Icon => AssetKind::AppIconSet,
            KindFilter::Color => AssetKind::ColorSet,
            KindFilter::Data => AssetKind::DataSet,
        }
    }
}

/// One listed node.
#[derive(Debug, Serialize)]
pub struct ListRow {
    pub index: usize,
    pub depth: usize,
    pub kind: AssetKind,
    pub logical_path: String,
    pub resource_name: Option<String>,
    pub variants: usize,
    pub size: u64,
    #[serde(skip)]
    summary: String,
}

#[derive(Debug, Serialize)]
struct ListOutput {
    catalog: String,
    nodes: Vec<ListRow>,
}

impl FormattedOutput for ListOutput {
    fn format_text(&self, ctx: &CommandContext) -> String {
        let mut out = String::new();
        let width = self.nodes.last().map_or(1, |row| row.index.to_string().len());
        for row in &self.nodes {
            let _ = writeln!(
                out,
                "{:>width$}  {} {}  ({})",
                row.index,
                ctx.icons.kind(row.kind),
                row.logical_path,
                row.summary
            );
        }
        if self.nodes.is_empty() {
            let _ = writeln!(out, "no nodes in {}", self.catalog);
        }
        out
    }
}

fn list_rows(tree: &CatalogTree, kind: Option<AssetKind>, human: bool) -> Vec<ListRow> {
    tree.flatten_with_paths()
        .into_iter()
        .filter(|row| kind.map_or(true, |k| row.entry.node.kind() == k))
        .map(|row| {
            let node = row.entry.node;
            ListRow {
                index: row.entry.index,
                depth: row.entry.depth,
                kind: node.kind(),
                resource_name: tree.resource_name(&row.logical_path),
                logical_path: row.logical_path,
                variants: node.variant_count(),
                size: node.total_size(),
                summary: describe_node(node, human),
            }
        })
        .collect()
}

impl ListCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let report = load_catalog(ctx, &self.catalog).await?;
        let nodes = list_rows(
            &report.tree,
            self.kind.map(AssetKind::from),
            ctx.config.output.human_sizes,
        );

        print_output(
            ctx,
            &ListOutput {
                catalog: report.tree.name.clone(),
                nodes,
            },
        )
    }
}
