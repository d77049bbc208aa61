//! Ark CLI - A command line interface for the BytePlus Ark image API.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::ImageCommand;

/// Ark CLI - A command line interface for the BytePlus Ark image API.
///
/// This tool allows you to generate images with Ark's Seedream models,
/// either as a single batch response or by consuming the streaming
/// progress events as images are produced.
///
/// The API key is taken from --api-key or the ARK_API_KEY environment
/// variable.
#[derive(Parser)]
#[command(name = "ark")]
#[command(about = "BytePlus Ark image generation CLI tool")]
#[command(version)]
pub struct Cli {
    /// API key (default: ARK_API_KEY environment variable)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<String>,

    /// Input request file (YAML or JSON)
    #[arg(short = 'f', long = "file", global = true)]
    pub input: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Image generation service
    Image(ImageCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    match &cli.command {
        Commands::Image(cmd) => cmd.run(&cli).await,
    }
}
