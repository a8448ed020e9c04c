//! Filter command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use tracing::info;

use super::{load_catalog, ReportOutput};
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::print_output;

/// Print only the parts of the tree matching a name
#[derive(Debug, Parser)]
pub struct FilterCommand {
    /// Catalog directory (`*.xcassets`)
    #[arg(value_hint = ValueHint::DirPath)]
    pub catalog: PathBuf,

    /// Case-insensitive substring of node names
    pub query: String,
}

impl FilterCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let report = load_catalog(ctx, &self.catalog).await?;
        let filtered = report.tree.filter(&self.query);
        info!(
            query = %self.query,
            matched = filtered.node_count(),
            total = report.tree.node_count(),
            "Filtered catalog"
        );

        print_output(
            ctx,
            &ReportOutput {
                query: Some(&self.query),
                tree: &filtered,
                diagnostics: &report.diagnostics,
            },
        )
    }
}
