//! Streaming text-to-image example: a courtyard across the four seasons.
//!
//! Run with:
//! ```bash
//! export ARK_API_KEY="your-api-key"
//! cargo run --example streaming
//! ```

use std::env;

use byteark::{
    Client, ImageGenerationRequest, MODEL_SEEDREAM_4, ResponseFormat, SequentialGeneration,
    SequentialGenerationOptions, collect_urls,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // Get API key from environment
    let api_key = env::var("ARK_API_KEY").expect("ARK_API_KEY environment variable not set");

    let client = Client::new(api_key)?;

    let request = ImageGenerationRequest {
        model: MODEL_SEEDREAM_4.to_string(),
        prompt: "Generate a series of 4 coherent illustrations focusing on the same corner \
                 of a courtyard across the four seasons, presented in a unified style that \
                 captures the unique colors, elements, and atmosphere of each season."
            .to_string(),
        sequential_image_generation: Some(SequentialGeneration::Auto),
        sequential_image_generation_options: Some(SequentialGenerationOptions::max_images(4)),
        response_format: Some(ResponseFormat::Url),
        size: Some("2K".to_string()),
        watermark: Some(true),
        ..Default::default()
    };

    let stream = client.images().generate_stream(&request).await?;
    let urls = collect_urls(stream).await;

    println!("generated {} image(s):", urls.len());
    for url in &urls {
        println!("  {}", url);
    }

    Ok(())
}
