//! Tree command implementation.

use std::path::PathBuf;

use assetlens_catalog::{CatalogTree, Diagnostic};
use clap::{Parser, ValueHint};
use serde::Serialize;

use super::load_catalog;
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, render_tree, FormattedOutput};

/// Print the catalog as a tree
#[derive(Debug, Parser)]
pub struct TreeCommand {
    /// Catalog directory (`*.xcassets`)
    #[arg(value_hint = ValueHint::DirPath)]
    pub catalog: PathBuf,
}

/// A tree with the diagnostics of the parse that produced it.
#[derive(Debug, Serialize)]
pub struct ReportOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<&'a str>,
    pub tree: &'a CatalogTree,
    pub diagnostics: &'a [Diagnostic],
}

impl FormattedOutput for ReportOutput<'_> {
    fn format_text(&self, ctx: &CommandContext) -> String {
        render_tree(self.tree, &ctx.icons, ctx.config.output.human_sizes)
    }
}

impl TreeCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let report = load_catalog(ctx, &self.catalog).await?;
        print_output(
            ctx,
            &ReportOutput {
                query: None,
                tree: &report.tree,
                diagnostics: &report.diagnostics,
            },
        )
    }
}
