//! Init command implementation.

use std::path::{Path, PathBuf};

use assetlens_common_config::{AssetlensConfig, ConfigLoader};
use assetlens_common_log::spans::file_span;
use assetlens_common_log::timed;
use clap::{Parser, ValueHint};
use serde::Serialize;
use tracing::info;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Write a default `.assetlens/config.yaml`
#[derive(Debug, Parser)]
pub struct InitCommand {
    /// Project directory (defaults to the current directory)
    #[arg(value_hint = ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    /// Overwrite an existing configuration
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct InitOutput<'a> {
    path: &'a Path,
    overwritten: bool,
}

impl FormattedOutput for InitOutput<'_> {
    fn format_text(&self, _ctx: &CommandContext) -> String {
        let verb = if self.overwritten { "Replaced" } else { "Wrote" };
        format!("{verb} {}", self.path.display())
    }
}

impl InitCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let loader = match &self.dir {
            Some(dir) => ConfigLoader::new(dir),
            None => ConfigLoader::default(),
        };

        let target = loader.config_path();
        let exists = target.exists();
        if exists && !self.force {
            return Err(CliError::user_with_hint(
                format!("configuration already exists: {}", target.display()),
                "Pass --force to overwrite it",
            ));
        }

        let path = file_span("write", &target)
            .in_scope(|| timed!("save_config", loader.save(&AssetlensConfig::default())))?;
        info!(path = %path.display(), "Configuration written");

        print_output(
            ctx,
            &InitOutput {
                path: &path,
                overwritten: exists,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_init_writes_defaults_once() {
        let dir = tempdir().unwrap();
        let ctx = CommandContext::plain(AssetlensConfig::default());
        let cmd = InitCommand {
            dir: Some(dir.path().to_path_buf()),
            force: false,
        };

        cmd.execute(&ctx).await.unwrap();
        let loader = ConfigLoader::new(dir.path());
        assert_eq!(loader.load().unwrap(), AssetlensConfig::default());

        let err = cmd.execute(&ctx).await.unwrap_err();
        assert!(matches!(err, CliError::User { .. }));

        let forced = InitCommand {
            dir: Some(dir.path().to_path_buf()),
            force: true,
        };
        forced.execute(&ctx).await.unwrap();
    }
}
