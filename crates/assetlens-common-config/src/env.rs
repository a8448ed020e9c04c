//! Environment variable handling.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    /// Explicit configuration file.
    pub const ASSETLENS_CONFIG: &str = "ASSETLENS_CONFIG";
    /// Selects `.env.<name>` on top of `.env`.
    pub const ASSETLENS_ENV: &str = "ASSETLENS_ENV";
    /// Disables colored output when set.
    pub const NO_COLOR: &str = "NO_COLOR";
}

/// Environment configuration.
pub struct Environment {
    loaded: Vec<PathBuf>,
}

impl Environment {
    /// Initialize environment from `.env` files in the working directory.
    ///
    /// Variables already set in the process are never overridden. Missing
    /// files are skipped; a malformed one is an error.
    pub fn init() -> Result<Self, EnvError> {
        let mut names = vec![".env.local".to_string(), ".env".to_string()];
        if let Ok(profile) = env::var(vars::ASSETLENS_ENV) {
            names.insert(0, format!(".env.{profile}"));
        }

        let mut loaded = Vec::new();
        for name in names {
            match dotenvy::from_filename(&name) {
                Ok(path) => loaded.push(path),
                Err(e) if e.not_found() => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Self { loaded })
    }

    /// Files that were read by [`Environment::init`].
    pub fn loaded_files(&self) -> &[PathBuf] {
        &self.loaded
    }

    /// Whether `NO_COLOR` asks for plain output.
    pub fn no_color() -> bool {
        env::var_os(vars::NO_COLOR).is_some_and(|v| !v.is_empty())
    }
}
