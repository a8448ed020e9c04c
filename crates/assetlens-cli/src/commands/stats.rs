//! Stats command implementation.

use std::fmt::Write as _;
use std::path::PathBuf;

use assetlens_catalog::{AssetKind, CatalogSummary, Diagnostic};
use clap::{Parser, ValueHint};
use serde::Serialize;

use super::load_catalog;
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{format_size, print_output, FormattedOutput};

/// Count assets, variants and bytes
#[derive(Debug, Parser)]
pub struct StatsCommand {
    /// Catalog directory (`*.xcassets`)
    #[arg(value_hint = ValueHint::DirPath)]
    pub catalog: PathBuf,
}

#[derive(Debug, Serialize)]
struct StatsOutput<'a> {
    catalog: &'a str,
    root: &'a std::path::Path,
    summary: CatalogSummary,
    diagnostics: &'a [Diagnostic],
}

impl FormattedOutput for StatsOutput<'_> {
    fn format_text(&self, ctx: &CommandContext) -> String {
        let summary = &self.summary;
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.catalog);

        let mut row = |label: &str, value: String| {
            let _ = writeln!(out, "  {label:<16}{value}");
        };
        for kind in AssetKind::ALL {
            let label = match kind {
                AssetKind::Folder => "folders",
                AssetKind::ImageSet => "image sets",
                AssetKind::AppIconSet => "app icon sets",
                AssetKind::ColorSet => "color sets",
                AssetKind::DataSet => "data sets",
            };
            row(label, summary.count(kind).to_string());
        }
        row("namespaces", summary.namespaces.to_string());
        row("variants", summary.variants.to_string());
        row(
            "total size",
            format_size(summary.total_size, ctx.config.output.human_sizes),
        );
        row("diagnostics", self.diagnostics.len().to_string());
        out
    }
}

impl StatsCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let report = load_catalog(ctx, &self.catalog).await?;
        print_output(
            ctx,
            &StatsOutput {
                catalog: &report.tree.name,
                root: &report.tree.root,
                summary: report.tree.summary(),
                diagnostics: &report.diagnostics,
            },
        )
    }
}
