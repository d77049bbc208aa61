//! Single-reference example: brand visual design from a logo.
//!
//! Run with:
//! ```bash
//! export ARK_API_KEY="your-api-key"
//! cargo run --example reference
//! ```

use std::env;

use byteark::{
    Client, ImageGenerationRequest, MODEL_SEEDREAM_4, ResponseFormat, SequentialGeneration,
    SequentialGenerationOptions, collect_urls,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let api_key = env::var("ARK_API_KEY").expect("ARK_API_KEY environment variable not set");

    let client = Client::new(api_key)?;

    let request = ImageGenerationRequest {
        model: MODEL_SEEDREAM_4.to_string(),
        prompt: "Using this LOGO as a reference, create a visual design system for an \
                 outdoor sports brand named GREEN, including packaging bags, hats, paper \
                 boxes, wristbands, lanyards, etc. Main visual tone is green, with a fun, \
                 simple, and modern style."
            .to_string(),
        image: Some("https://ark-doc.tos-ap-southeast-1.bytepluses.com/doc_image/seedream4_imageToimages.png".into()),
        sequential_image_generation: Some(SequentialGeneration::Auto),
        sequential_image_generation_options: Some(SequentialGenerationOptions::max_images(5)),
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
