//! Image generation commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use byteark::{ImageGenerationRequest, MODEL_SEEDREAM_4, collect_urls};

use super::{create_client, load_request, output_result, print_success, print_verbose, require_input_file};
use crate::Cli;

/// Image generation service.
///
/// Supports batch generation and streaming consumption of per-image
/// progress events.
#[derive(Args)]
pub struct ImageCommand {
    #[command(subcommand)]
    command: ImageSubcommand,
}

#[derive(Subcommand)]
enum ImageSubcommand {
    /// Generate images, waiting for the whole batch
    Generate,
    /// Generate images, streaming progress events as they arrive
    Stream,
}

impl ImageCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ImageSubcommand::Generate => self.generate(cli).await,
            ImageSubcommand::Stream => self.stream(cli).await,
        }
    }

    async fn generate(&self, cli: &Cli) -> anyhow::Result<()> {
        let req = self.load(cli)?;

        let client = create_client(cli)?;
        let resp = client.images().generate(&req).await?;

        print_success(&format!("Generated {} image(s)", resp.data.len()));

        output_result(&resp, cli.output.as_deref(), cli.json)
    }

    async fn stream(&self, cli: &Cli) -> anyhow::Result<()> {
        let req = self.load(cli)?;

        let client = create_client(cli)?;
        let stream = client.images().generate_stream(&req).await?;
        let urls = collect_urls(stream).await;

        print_success(&format!("Generated {} image(s)", urls.len()));

        output_result(&StreamResult { urls }, cli.output.as_deref(), cli.json)
    }

    fn load(&self, cli: &Cli) -> anyhow::Result<ImageGenerationRequest> {
        let input_file = require_input_file(cli)?;
        let mut req: ImageGenerationRequest = load_request(input_file)?;

        // Use defaults if not specified
        if req.model.is_empty() {
            req.model = MODEL_SEEDREAM_4.to_string();
        }

        print_verbose(cli, &format!("Model: {}", req.model));
        print_verbose(cli, &format!("Prompt: {}", req.prompt));

        Ok(req)
    }
}

/// Result of a streaming generation run.
#[derive(Serialize)]
struct StreamResult {
    urls: Vec<String>,
}
