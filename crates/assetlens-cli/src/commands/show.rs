//! Show command implementation.

use std::fmt::Write as _;
use std::path::PathBuf;

use assetlens_catalog::{path::logical_segments, Appearance, AssetNode, CatalogTree};
use assetlens_common_log::spans::asset_span;
use clap::{Parser, ValueHint};
use serde::Serialize;
use tracing::debug;

use super::load_catalog;
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{describe_node, format_size, print_output, FormattedOutput};

const MAX_SUGGESTIONS: usize = 5;

/// Show one asset by logical path
#[derive(Debug, Parser)]
pub struct ShowCommand {
    /// Catalog directory (`*.xcassets`)
    #[arg(value_hint = ValueHint::DirPath)]
    pub catalog: PathBuf,

    /// Slash-separated names, e.g. `Brand/Logo`
    pub logical_path: String,
}

#[derive(Debug, Serialize)]
struct ShowOutput<'a> {
    logical_path: String,
    resource_name: Option<String>,
    total_size: u64,
    node: &'a AssetNode,
}

fn appearance_suffix(appearances: &[Appearance]) -> String {
    if appearances.is_empty() {
        return String::new();
    }
    let values: Vec<_> = appearances.iter().map(|a| a.value.as_str()).collect();
    format!("  ({})", values.join(", "))
}

fn filename_or_placeholder(filename: &str) -> &str {
    if filename.is_empty() {
        "(no file)"
    } else {
        filename
    }
}

impl FormattedOutput for ShowOutput<'_> {
    fn format_text(&self, ctx: &CommandContext) -> String {
        let human = ctx.config.output.human_sizes;
        let bullet = ctx.icons.bullet();
        let node = self.node;

        let mut out = String::new();
        let _ = writeln!(out, "{} {}", ctx.icons.kind(node.kind()), self.logical_path);
        let _ = writeln!(out, "  kind: {}", node.kind());
        let _ = writeln!(out, "  path: {}", node.path().display());
        if let Some(resource) = &self.resource_name {
            let _ = writeln!(out, "  resource: {resource}");
        }
        let _ = writeln!(out, "  size: {}", format_size(self.total_size, human));

        match node {
            AssetNode::Folder(folder) => {
                let _ = writeln!(out, "  provides namespace: {}", folder.provides_namespace);
                let _ = writeln!(out, "  children:");
                for child in &folder.children {
                    let _ = writeln!(
                        out,
                        "    {} {}  ({})",
                        ctx.icons.kind(child.kind()),
                        child.name(),
                        describe_node(child, human)
                    );
                }
            }
            AssetNode::ImageSet(set) => {
                if let Some(intent) = &set.template_rendering_intent {
                    let _ = writeln!(out, "  rendering: {intent}");
                }
                if let Some(vector) = set.preserves_vector_representation {
                    let _ = writeln!(out, "  preserves vector: {vector}");
                }
                if let Some(compression) = &set.compression_type {
                    let _ = writeln!(out, "  compression: {compression}");
                }
                let _ = writeln!(out, "  images:");
                for image in &set.images {
                    let _ = writeln!(
                        out,
                        "    {bullet} {}  {} {}{}",
                        filename_or_placeholder(&image.filename),
                        image.scale.as_deref().unwrap_or("-"),
                        image.idiom,
                        appearance_suffix(image.appearances.as_deref().unwrap_or_default())
                    );
                }
            }
            AssetNode::AppIconSet(set) => {
                let _ = writeln!(out, "  icons:");
                for icon in &set.icons {
                    let _ = writeln!(
                        out,
                        "    {bullet} {}  {} {} {} {}{}",
                        filename_or_placeholder(&icon.filename),
                        icon.size.as_deref().unwrap_or("-"),
                        icon.scale.as_deref().unwrap_or("-"),
                        icon.idiom,
                        icon.platform.as_deref().unwrap_or("-"),
                        appearance_suffix(&icon.appearances)
                    );
                }
            }
            AssetNode::ColorSet(set) => {
                let _ = writeln!(out, "  colors:");
                for color in &set.colors {
                    let value = color
                        .color
                        .as_ref()
                        .map(|c| {
                            let hex = c
                                .components
                                .to_rgba()
                                .map(|rgba| rgba.to_hex_string())
                                .unwrap_or_else(|| "?".to_string());
                            format!("{} {hex}", c.color_space.as_deref().unwrap_or("-"))
                        })
                        .unwrap_or_else(|| "(no value)".to_string());
                    let _ = writeln!(
                        out,
                        "    {bullet} {}  {value}{}",
                        color.idiom,
                        appearance_suffix(color.appearances.as_deref().unwrap_or_default())
                    );
                }
            }
            AssetNode::DataSet(set) => {
                let _ = writeln!(out, "  data:");
                for item in &set.data {
                    let detail = match (item.is_lottie, &item.content) {
                        (Some(true), _) => "lottie".to_string(),
                        (_, Some(content)) => format!("text, {} chars", content.chars().count()),
                        _ => "binary".to_string(),
                    };
                    let _ = writeln!(
                        out,
                        "    {bullet} {}  {}  {detail}",
                        filename_or_placeholder(&item.filename),
                        item.idiom
                    );
                }
            }
        }
        out
    }
}

/// Logical paths that look like `wanted`, for a not-found message.
fn suggest(tree: &CatalogTree, wanted: &str) -> Vec<String> {
    let Some(needle) = logical_segments(wanted).last().map(|s| s.to_lowercase()) else {
        return Vec::new();
    };
    tree.flatten_with_paths()
        .into_iter()
        .map(|row| row.logical_path)
        .filter(|path| path.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .collect()
}

impl ShowCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let report = load_catalog(ctx, &self.catalog).await?;
        let tree = &report.tree;

        let node = tree.find(&self.logical_path).ok_or_else(|| {
            CliError::not_found_with_suggestions(
                "asset",
                &self.logical_path,
                suggest(tree, &self.logical_path),
            )
        })?;

        let logical_path = logical_segments(&self.logical_path).join("/");
        asset_span(&node.kind().to_string(), node.path()).in_scope(|| {
            debug!(variants = node.variant_count(), "Showing asset");
            print_output(
                ctx,
                &ShowOutput {
                    resource_name: tree.resource_name(&logical_path),
                    total_size: node.total_size(),
                    logical_path,
                    node,
                },
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetlens_catalog::{Folder, ImageSet, ImageVariant};
    use assetlens_common_config::AssetlensConfig;

    fn tree() -> CatalogTree {
        let logo = AssetNode::ImageSet(ImageSet {
            name: "Logo".into(),
            path: PathBuf::from("/a/Brand/Logo.imageset"),
            images: vec![
                ImageVariant {
                    filename: "logo.png".into(),
                    scale: Some("1x".into()),
                    idiom: "universal".into(),
                    subtype: None,
                    appearances: None,
                    path: Some(PathBuf::from("/a/Brand/Logo.imageset/logo.png")),
                },
                ImageVariant {
                    filename: String::new(),
                    scale: Some("2x".into()),
                    idiom: "universal".into(),
                    subtype: None,
                    appearances: Some(vec![Appearance {
                        appearance: "luminosity".into(),
                        value: "dark".into(),
                    }]),
                    path: None,
                },
            ],
            template_rendering_intent: Some("template".into()),
            preserves_vector_representation: None,
            compression_type: None,
            size: 100,
        });
        CatalogTree {
            name: "A.xcassets".into(),
            root: PathBuf::from("/a"),
            children: vec![AssetNode::Folder(Folder {
                name: "Brand".into(),
                path: PathBuf::from("/a/Brand"),
                provides_namespace: false,
                children: vec![logo],
            })],
        }
    }

    #[test]
    fn test_suggest_by_last_segment() {
        let tree = tree();
        assert_eq!(suggest(&tree, "Other/logo"), vec!["Brand/Logo"]);
        assert!(suggest(&tree, "").is_empty());
    }

    #[test]
    fn test_image_set_text() {
        let tree = tree();
        let ctx = CommandContext::plain(AssetlensConfig::default());
        let output = ShowOutput {
            logical_path: "Brand/Logo".into(),
            resource_name: tree.resource_name("Brand/Logo"),
            total_size: 100,
            node: tree.find("Brand/Logo").unwrap(),
        };
        let text = output.format_text(&ctx);
        assert!(text.starts_with("[img] Brand/Logo\n"));
        assert!(text.contains("  resource: Logo\n"));
        assert!(text.contains("  rendering: template\n"));
        assert!(text.contains("    * logo.png  1x universal\n"));
        assert!(text.contains("    * (no file)  2x universal  (dark)\n"));
    }
}
