//! Configuration for Assetlens.
//!
//! Project settings live in `.assetlens/config.yaml`. Every key is
//! optional; missing sections fall back to defaults.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
