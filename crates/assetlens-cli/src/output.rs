//! Output formatting utilities for CLI commands.

use std::fmt::Write as _;
use std::io::Write;

use assetlens_catalog::{AssetNode, CatalogTree, Diagnostic};
use serde::Serialize;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

pub mod icons;
pub mod style;

use icons::IconContext;
use style::{Color, Styled};

/// Trait for types that can be formatted for output
pub trait FormattedOutput {
    fn format_text(&self, ctx: &CommandContext) -> String;

    fn format_json(&self) -> Result<String, serde_json::Error>
    where
        Self: Serialize,
    {
        serde_json::to_string_pretty(self)
    }
}

/// Print formatted output to stdout
pub fn print_output<T>(ctx: &CommandContext, value: &T) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
{
    write_output(ctx, value, std::io::stdout().lock())
}

/// Print formatted output to a writer
pub fn write_output<T, W>(ctx: &CommandContext, value: &T, mut writer: W) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
    W: Write,
{
    let output = match ctx.format {
        OutputFormat::Text => value.format_text(ctx),
        OutputFormat::Json => value.format_json()?,
    };

    writeln!(writer, "{}", output.trim_end_matches('\n'))?;
    Ok(())
}

/// Print diagnostics to stderr as warnings.
pub fn print_diagnostics(ctx: &CommandContext, diagnostics: &[Diagnostic]) {
    let mut stderr = std::io::stderr().lock();
    for diagnostic in diagnostics {
        let label = Styled::new(format!("{} warning:", ctx.icons.warning()), ctx.color_stderr)
            .fg(Color::Yellow)
            .bold();
        let _ = writeln!(stderr, "{label} {diagnostic}");
    }
}

/// Byte count for display. Human sizes use 1024-based units.
pub fn format_size(bytes: u64, human: bool) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if !human || bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// One-line summary of a node, without its name.
pub fn describe_node(node: &AssetNode, human: bool) -> String {
    match node {
        AssetNode::Folder(folder) => {
            let count = folder.children.len();
            format!("{count} {}", if count == 1 { "item" } else { "items" })
        }
        AssetNode::ColorSet(set) => {
            let count = set.colors.len();
            format!("color set, {count} {}", if count == 1 { "color" } else { "colors" })
        }
        other => {
            let count = other.variant_count();
            format!(
                "{}, {count} {}, {}",
                other.kind(),
                if count == 1 { "variant" } else { "variants" },
                format_size(other.size(), human)
            )
        }
    }
}

/// Indented tree listing.
pub fn render_tree(tree: &CatalogTree, icons: &IconContext, human: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tree.name);

    for entry in tree.flatten() {
        let node = entry.node;
        let indent = "  ".repeat(entry.depth + 1);
        let namespace = if node.provides_namespace() {
            format!(" {}", icons.namespace())
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "{indent}{} {}{namespace}  ({})",
            icons.kind(node.kind()),
            node.name(),
            describe_node(node, human)
        );
    }

    if tree.children.is_empty() {
        let _ = writeln!(out, "  (empty)");
    }
    out
}
