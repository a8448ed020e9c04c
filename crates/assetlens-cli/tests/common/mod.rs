//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assetlens_test_utils::CatalogFixture;
use serde_json::Value;
use tempfile::{tempdir, TempDir};

/// A catalog on disk plus an empty working directory.
pub struct TestContext {
    pub catalog: CatalogFixture,
    pub work_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            catalog: CatalogFixture::new(),
            work_dir: tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Write `.assetlens/config.yaml` into the working directory.
    pub fn with_project_config(self, yaml: &str) -> Self {
        let dir = self.work_dir.path().join(".assetlens");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        std::fs::write(dir.join("config.yaml"), yaml).expect("Failed to write config");
        self
    }

    /// Write a standalone config file and return its path.
    pub fn config_file(&self, yaml: &str) -> PathBuf {
        let path = self.work_dir.path().join("assetlens.yaml");
        std::fs::write(&path, yaml).expect("Failed to write config");
        path
    }

    pub fn root(&self) -> &Path {
        self.catalog.root()
    }

    /// Create a command with a clean, predictable environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("assetlens").expect("Binary not found");
        cmd.current_dir(self.work_dir.path())
            .env_remove("ASSETLENS_CONFIG")
            .env_remove("ASSETLENS_LOG_LEVEL")
            .env_remove("ASSETLENS_ENV")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .env("LANG", "C");
        cmd
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON output helpers
pub mod json {
    use super::*;

    pub fn parse_output(output: &[u8]) -> Value {
        serde_json::from_slice(output).expect("Failed to parse JSON output")
    }

    pub fn child_names(tree: &Value) -> Vec<String> {
        tree["children"]
            .as_array()
            .expect("children array")
            .iter()
            .map(|c| c["name"].as_str().expect("name").to_string())
            .collect()
    }
}
