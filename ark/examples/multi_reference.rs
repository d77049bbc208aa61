//! Multi-reference example: amusement park scenes from two reference images.
//!
//! Run with:
//! ```bash
//! export ARK_API_KEY="your-api-key"
//! cargo run --example multi_reference
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
        prompt: "Generate 3 images of a girl and a cow plushie happily riding a roller \
                 coaster in an amusement park, depicting morning, noon, and night."
            .to_string(),
        image: Some(
            vec![
                "https://ark-doc.tos-ap-southeast-1.bytepluses.com/doc_image/seedream4_imagesToimages_1.png".to_string(),
                "https://ark-doc.tos-ap-southeast-1.bytepluses.com/doc_image/seedream4_imagesToimages_2.png".to_string(),
            ]
            .into(),
        ),
        sequential_image_generation: Some(SequentialGeneration::Auto),
        sequential_image_generation_options: Some(SequentialGenerationOptions::max_images(3)),
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
