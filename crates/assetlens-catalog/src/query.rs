//! Read-only queries over a parsed tree.

use crate::model::{AssetKind, AssetNode, CatalogTree, Folder};
use crate::path::{join_logical, logical_segments};
use serde::{Deserialize, Serialize};

/// One row of a flattened tree.
#[derive(Debug, Clone, Copy)]
pub struct FlatEntry<'a> {
    /// Position in pre-order.
    pub index: usize,
    /// Nesting level, top-level nodes are 0.
    pub depth: usize,
    /// Node reference.
    pub node: &'a AssetNode,
}

/// A flattened row with its logical path.
#[derive(Debug, Clone)]
pub struct FlatRow<'a> {
    /// Entry data.
    pub entry: FlatEntry<'a>,
    /// Slash-joined names from the root.
    pub logical_path: String,
}

/// Counts and sizes for a whole tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    /// Folder nodes.
    pub folders: usize,
    /// Image sets.
    pub image_sets: usize,
    /// App icon sets.
    pub app_icon_sets: usize,
    /// Color sets.
    pub color_sets: usize,
    /// Data sets.
    pub data_sets: usize,
    /// Images, icons, colors and data items combined.
    pub variants: usize,
    /// Folders that provide a namespace.
    pub namespaces: usize,
    /// Bytes across every asset set.
    pub total_size: u64,
}

impl CatalogSummary {
    /// Count for one kind.
    pub fn count(&self, kind: AssetKind) -> usize {
        match kind {
            AssetKind::Folder => self.folders,
            AssetKind::ImageSet => self.image_sets,
            AssetKind::AppIconSet => self.app_icon_sets,
            AssetKind::ColorSet => self.color_sets,
            AssetKind::DataSet => self.data_sets,
        }
    }

    /// Number of asset sets (everything but folders).
    pub fn asset_sets(&self) -> usize {
        self.image_sets + self.app_icon_sets + self.color_sets + self.data_sets
    }

    fn add(&mut self, node: &AssetNode) {
        match node.kind() {
            AssetKind::Folder => self.folders += 1,
            AssetKind::ImageSet => self.image_sets += 1,
            AssetKind::AppIconSet => self.app_icon_sets += 1,
            AssetKind::ColorSet => self.color_sets += 1,
            AssetKind::DataSet => self.data_sets += 1,
        }
        if node.provides_namespace() {
            self.namespaces += 1;
        }
        self.variants += node.variant_count();
        self.total_size += node.size();
    }
}

impl CatalogTree {
    /// Look up a node by logical path (`"Icons/AppIcon"`).
    ///
    /// When siblings share a name the first one in tree order wins.
    pub fn find(&self, logical_path: &str) -> Option<&AssetNode> {
        self.ancestry(logical_path)?.last().copied()
    }

    /// The node at `logical_path` preceded by every ancestor folder.
    pub fn ancestry(&self, logical_path: &str) -> Option<Vec<&AssetNode>> {
        let segments = logical_segments(logical_path);
        if segments.is_empty() {
            return None;
        }

        let mut chain = Vec::with_capacity(segments.len());
        let mut level: &[AssetNode] = &self.children;
        for segment in segments {
            let node = level.iter().find(|node| node.name() == segment)?;
            chain.push(node);
            level = node.children();
        }
        Some(chain)
    }

    /// Identifier a consumer would use for the node at `logical_path`:
    /// its name prefixed by every ancestor folder that provides a namespace.
    pub fn resource_name(&self, logical_path: &str) -> Option<String> {
        let chain = self.ancestry(logical_path)?;
        let (node, ancestors) = chain.split_last()?;

        let mut name = String::new();
        for folder in ancestors.iter().filter(|n| n.provides_namespace()) {
            name = join_logical(&name, folder.name());
        }
        Some(join_logical(&name, node.name()))
    }

    /// Keep nodes whose name contains `query` (case-insensitive) plus the
    /// folders leading to them. A matching folder keeps its whole subtree.
    pub fn filter(&self, query: &str) -> CatalogTree {
        let needle = query.trim().to_lowercase();
        let children = if needle.is_empty() {
            self.children.clone()
        } else {
            filter_nodes(&self.children, &needle)
        };
        CatalogTree {
            name: self.name.clone(),
            root: self.root.clone(),
            children,
        }
    }

    /// Pre-order list of every node, folders included.
    pub fn flatten(&self) -> Vec<FlatEntry<'_>> {
        let mut entries = Vec::new();
        flatten_into(&self.children, 0, &mut entries);
        entries
    }

    /// Pre-order list with logical paths.
    pub fn flatten_with_paths(&self) -> Vec<FlatRow<'_>> {
        let mut rows: Vec<FlatRow<'_>> = Vec::new();
        let mut parents: Vec<String> = Vec::new();

        for entry in self.flatten() {
            parents.truncate(entry.depth);
            let parent = parents.last().map(String::as_str).unwrap_or("");
            let logical_path = join_logical(parent, entry.node.name());
            if entry.node.is_folder() {
                parents.push(logical_path.clone());
            }
            rows.push(FlatRow { entry, logical_path });
        }
        rows
    }

    /// Counts and sizes for the tree.
    pub fn summary(&self) -> CatalogSummary {
        let mut summary = CatalogSummary::default();
        for entry in self.flatten() {
            summary.add(entry.node);
        }
        summary
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.flatten().len()
    }
}

fn filter_nodes(nodes: &[AssetNode], needle: &str) -> Vec<AssetNode> {
    nodes
        .iter()
        .filter_map(|node| {
            if node.name().to_lowercase().contains(needle) {
                return Some(node.clone());
            }
            match node {
                AssetNode::Folder(folder) => {
                    let children = filter_nodes(&folder.children, needle);
                    (!children.is_empty()).then(|| {
                        AssetNode::Folder(Folder {
                            name: folder.name.clone(),
                            path: folder.path.clone(),
                            provides_namespace: folder.provides_namespace,
                            children,
                        })
                    })
                }
                _ => None,
            }
        })
        .collect()
}

fn flatten_into<'a>(nodes: &'a [AssetNode], depth: usize, out: &mut Vec<FlatEntry<'a>>) {
    for node in nodes {
        out.push(FlatEntry {
            index: out.len(),
            depth,
            node,
        });
        flatten_into(node.children(), depth + 1, out);
    }
}
