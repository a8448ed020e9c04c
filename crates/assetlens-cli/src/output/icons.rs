//! Unicode icons for CLI output.

use std::env;

use assetlens_catalog::AssetKind;

/// Icon table with ASCII fallbacks.
pub struct Icons;

impl Icons {
    pub const WARNING: &'static str = "⚠";
    pub const BULLET: &'static str = "•";
    pub const NAMESPACE: &'static str = "◆";

    pub const FOLDER: &'static str = "▸";
    pub const IMAGE_SET: &'static str = "▣";
    pub const APP_ICON_SET: &'static str = "◈";
    pub const COLOR_SET: &'static str = "●";
    pub const DATA_SET: &'static str = "▤";

    /// Fallback ASCII versions
    pub const WARNING_ASCII: &'static str = "[warn]";
    pub const BULLET_ASCII: &'static str = "*";
    pub const NAMESPACE_ASCII: &'static str = "[ns]";

    pub const FOLDER_ASCII: &'static str = "+";
    pub const IMAGE_SET_ASCII: &'static str = "[img]";
    pub const APP_ICON_SET_ASCII: &'static str = "[icon]";
    pub const COLOR_SET_ASCII: &'static str = "[color]";
    pub const DATA_SET_ASCII: &'static str = "[data]";
}

/// Icon context that handles unicode support detection
#[derive(Debug, Clone, Copy)]
pub struct IconContext {
    unicode: bool,
}

impl IconContext {
    pub fn new() -> Self {
        Self {
            unicode: detect_unicode_support(),
        }
    }

    /// Always ASCII.
    pub fn ascii() -> Self {
        Self { unicode: false }
    }

    fn pick(&self, unicode: &'static str, ascii: &'static str) -> &'static str {
        if self.unicode {
            unicode
        } else {
            ascii
        }
    }

    pub fn warning(&self) -> &'static str {
        self.pick(Icons::WARNING, Icons::WARNING_ASCII)
    }

    pub fn bullet(&self) -> &'static str {
        self.pick(Icons::BULLET, Icons::BULLET_ASCII)
    }

    pub fn namespace(&self) -> &'static str {
        self.pick(Icons::NAMESPACE, Icons::NAMESPACE_ASCII)
    }

    /// Marker for a node kind.
    pub fn kind(&self, kind: AssetKind) -> &'static str {
        match kind {
            AssetKind::Folder => self.pick(Icons::FOLDER, Icons::FOLDER_ASCII),
            AssetKind::ImageSet => self.pick(Icons::IMAGE_SET, Icons::IMAGE_SET_ASCII),
            AssetKind::AppIconSet => self.pick(Icons::APP_ICON_SET, Icons::APP_ICON_SET_ASCII),
            AssetKind::ColorSet => self.pick(Icons::COLOR_SET, Icons::COLOR_SET_ASCII),
            AssetKind::DataSet => self.pick(Icons::DATA_SET, Icons::DATA_SET_ASCII),
        }
    }
}

impl Default for IconContext {
    fn default() -> Self {
        Self::new()
    }
}

fn detect_unicode_support() -> bool {
    env::var("TERM")
        .map(|t| !t.contains("linux"))
        .unwrap_or(true)
        && env::var("LANG")
            .map(|l| l.to_uppercase().contains("UTF"))
            .unwrap_or(true)
}
