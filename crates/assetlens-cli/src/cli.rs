//! CLI argument definitions using clap derive macros.

use std::io::IsTerminal;
use std::path::PathBuf;

use assetlens_common_config::{vars, AssetlensConfig, ConfigLoader, Environment};
use assetlens_common_log::spans::{command_span, instrument_future, record_error};
use clap::{ArgAction, ColorChoice, Parser, Subcommand, ValueHint};

use crate::commands::{
    FilterCommand, InitCommand, ListCommand, ShowCommand, StatsCommand, TreeCommand,
};
use crate::error::CliError;
use crate::output::icons::IconContext;

/// Assetlens - inspect asset catalogs
///
/// Parses `.xcassets` directories and prints their folders, image sets,
/// app icons, colors and data assets.
#[derive(Debug, Parser)]
#[command(
    name = "assetlens",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress diagnostics and logging
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = vars::ASSETLENS_CONFIG,
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// When to use terminal colors
    #[arg(long, global = true, default_value = "auto", value_enum)]
    pub color: ColorChoice,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the catalog as a tree
    Tree(TreeCommand),

    /// Show one asset by logical path
    Show(ShowCommand),

    /// Print only the parts of the tree matching a name
    #[command(visible_alias = "find")]
    Filter(FilterCommand),

    /// List every node with its index and logical path
    #[command(visible_alias = "ls")]
    List(ListCommand),

    /// Count assets, variants and bytes
    Stats(StatsCommand),

    /// Write a default configuration file
    Init(InitCommand),

    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsCommand),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Tree(_) => "tree",
            Self::Show(_) => "show",
            Self::Filter(_) => "filter",
            Self::List(_) => "list",
            Self::Stats(_) => "stats",
            Self::Init(_) => "init",
            Self::Completions(_) => "completions",
        }
    }
}

/// Shell completions generation
#[derive(Debug, Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

impl Cli {
    /// Load configuration from `--config` or the current directory.
    pub fn load_config(&self) -> Result<AssetlensConfig, CliError> {
        let config = match &self.config {
            Some(path) => ConfigLoader::load_file(path)?,
            None => ConfigLoader::default().load()?,
        };
        Ok(config)
    }

    /// Whether stdout should be colored.
    pub fn color_stdout(&self) -> bool {
        use_color(self.color, std::io::stdout().is_terminal())
    }

    /// Whether stderr should be colored.
    pub fn color_stderr(&self) -> bool {
        use_color(self.color, std::io::stderr().is_terminal())
    }

    /// Execute the selected command
    pub async fn execute(self, config: AssetlensConfig) -> Result<(), CliError> {
        let ctx = CommandContext {
            config,
            format: self.format,
            color: self.color_stdout(),
            color_stderr: self.color_stderr(),
            verbose: self.verbose,
            quiet: self.quiet,
            icons: IconContext::new(),
        };

        let span = command_span(self.command.name());
        let run = async {
            match &self.command {
                Command::Tree(cmd) => cmd.execute(&ctx).await,
                Command::Show(cmd) => cmd.execute(&ctx).await,
                Command::Filter(cmd) => cmd.execute(&ctx).await,
                Command::List(cmd) => cmd.execute(&ctx).await,
                Command::Stats(cmd) => cmd.execute(&ctx).await,
                Command::Init(cmd) => cmd.execute(&ctx).await,
                Command::Completions(cmd) => cmd.execute(&ctx),
            }
        };
        let result = instrument_future(run, span.clone()).await;
        if let Err(e) = &result {
            span.in_scope(|| record_error(e));
        }
        result
    }
}

fn use_color(choice: ColorChoice, is_terminal: bool) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => is_terminal && !Environment::no_color(),
    }
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self, _ctx: &CommandContext) -> Result<(), CliError> {
        use clap::CommandFactory;
        use clap_complete::generate;

        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(self.shell, &mut cmd, name, &mut std::io::stdout());
        Ok(())
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: AssetlensConfig,
    pub format: OutputFormat,
    /// Color on stdout.
    pub color: bool,
    /// Color on stderr.
    pub color_stderr: bool,
    pub verbose: u8,
    pub quiet: bool,
    pub icons: IconContext,
}

impl CommandContext {
    /// Context with defaults, for rendering outside a real invocation.
    pub fn plain(config: AssetlensConfig) -> Self {
        Self {
            config,
            format: OutputFormat::Text,
            color: false,
            color_stderr: false,
            verbose: 0,
            quiet: false,
            icons: IconContext::ascii(),
        }
    }

    /// Whether diagnostics go to stderr.
    pub fn show_diagnostics(&self) -> bool {
        !self.quiet && self.config.output.show_diagnostics
    }
}
