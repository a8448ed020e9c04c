//! Command implementations.

mod filter;
mod init;
mod list;
mod show;
mod stats;
mod tree;

pub use filter::FilterCommand;
pub use init::InitCommand;
pub use list::{KindFilter, ListCommand};
pub use show::ShowCommand;
pub use stats::StatsCommand;
pub use tree::{ReportOutput, TreeCommand};

use std::path::Path;

use assetlens_catalog::{parse_catalog_with, CatalogReport, ParseOptions};
use assetlens_common_config::ParserConfig;
use assetlens_common_log::spans::{catalog_span, instrument_future, Timer};
use tracing::debug;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::print_diagnostics;

/// Parser settings from configuration.
pub fn parse_options(config: &ParserConfig) -> ParseOptions {
    ParseOptions::new()
        .depth(config.max_depth)
        .concurrency(config.max_concurrency)
        .text_extensions(&config.text_extensions)
}

/// Parse `catalog` and report its diagnostics on stderr.
pub(crate) async fn load_catalog(
    ctx: &CommandContext,
    catalog: &Path,
) -> Result<CatalogReport, CliError> {
    let options = parse_options(&ctx.config.parser);

    let timer = Timer::start("parse_catalog");
    let report =
        instrument_future(parse_catalog_with(catalog, options), catalog_span(catalog)).await?;
    let elapsed_ms = timer.finish();

    debug!(
        nodes = report.tree.node_count(),
        diagnostics = report.diagnostics.len(),
        elapsed_ms = elapsed_ms as u64,
        "Catalog loaded"
    );

    if ctx.show_diagnostics() {
        print_diagnostics(ctx, &report.diagnostics);
    }
    Ok(report)
}
