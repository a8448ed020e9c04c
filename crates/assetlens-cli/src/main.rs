//! Assetlens CLI - asset catalog inspector
//!
//! Main entry point for the `assetlens` binary.

use std::process::ExitCode;

use assetlens_cli::cli::{Cli, OutputFormat};
use assetlens_cli::error::{CliError, ErrorFormatter};
use assetlens_common_config::Environment;
use assetlens_common_log::{vars, LogConfig, LogLevel};
use clap::Parser;

/// Application exit codes
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

fn main() -> ExitCode {
    // .env values must be visible before clap reads ASSETLENS_CONFIG.
    let environment = match Environment::init() {
        Ok(environment) => Some(environment),
        Err(e) => {
            eprintln!("warning: {e}");
            None
        }
    };

    let cli = Cli::parse();
    init_logging(&cli);
    if let Some(environment) = &environment {
        tracing::debug!(files = ?environment.loaded_files(), "Loaded environment files");
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start async runtime: {e}");
            return Exit::GeneralError.into();
        }
    };

    let format = cli.format;
    let color = cli.color_stderr();
    let verbose = cli.verbose > 0;

    match runtime.block_on(run(cli)) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            tracing::debug!(code = e.code(), "Command failed: {e}");
            let formatter = ErrorFormatter::new(color).verbose(verbose);
            match format {
                OutputFormat::Json => eprintln!("{}", formatter.format_json(&e)),
                OutputFormat::Text => formatter.print(&e),
            }
            e.exit_code()
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;
    cli.execute(config).await
}

fn init_logging(cli: &Cli) {
    let mut config = LogConfig::from_env().with_ansi(cli.color_stderr());
    if cli.verbose > 0 || cli.quiet || std::env::var_os(vars::LOG_LEVEL).is_none() {
        config = config.with_level(LogLevel::from_verbosity(cli.verbose, cli.quiet));
    }
    if let Err(e) = assetlens_common_log::init(config) {
        eprintln!("warning: {e}");
    }
}
