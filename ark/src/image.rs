//! Image generation service.

use std::sync::Arc;

use async_stream::stream;
use futures::Stream;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{
    error::Result,
    event::{ErrorInfo, GenerationEvent, Usage},
    http::{HttpClient, SseReader},
};

/// Image generation service.
pub struct ImageService {
    http: Arc<HttpClient>,
}

impl ImageService {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Generates images from a text prompt, waiting for the whole batch.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use byteark::{Client, ImageGenerationRequest};
    /// # async fn run(client: Client) -> byteark::Result<()> {
    /// let request = ImageGenerationRequest {
    ///     model: "seedream-4-0-250828".to_string(),
    ///     prompt: "A quiet courtyard in autumn".to_string(),
    ///     size: Some("2K".to_string()),
    ///     ..Default::default()
    /// };
    ///
    /// let response = client.images().generate(&request).await?;
    /// for image in &response.data {
    ///     println!("{}", image.url.as_deref().unwrap_or("<no url>"));
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate(&self, request: &ImageGenerationRequest) -> Result<ImageResponse> {
        self.http
            .request("POST", "/images/generations", Some(request))
            .await
    }

    /// Starts a streaming image generation request.
    ///
    /// Returns a stream that yields one entry per server event, in
    /// arrival order. Frames that are not generation events decode to
    /// `None` and should be skipped; [`crate::collect_urls`] does this
    /// and reduces the stream to the generated URLs.
    ///
    /// The stream is one-shot. A transport error mid-stream is logged
    /// and ends the stream early, as if it had been exhausted.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use byteark::{Client, ImageGenerationRequest};
    /// # async fn run(client: Client, request: ImageGenerationRequest) -> byteark::Result<()> {
    /// let stream = client.images().generate_stream(&request).await?;
    /// let urls = byteark::collect_urls(stream).await;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate_stream(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<impl Stream<Item = Option<GenerationEvent>> + use<>> {
        // Add stream flag to request
        let stream_request = ImageGenerationStreamRequest {
            inner: request.clone(),
            stream: true,
        };

        let byte_stream = self
            .http
            .request_stream("POST", "/images/generations", Some(stream_request))
            .await?;

        let mut reader = SseReader::new(Box::pin(byte_stream));

        Ok(stream! {
            loop {
                match reader.read_event().await {
                    Ok(Some(data)) => yield GenerationEvent::decode(&data),
                    Ok(None) => break,
                    Err(e) => {
                        warn!(error = %e, "generation stream aborted");
                        break;
                    }
                }
            }
        })
    }
}

// ==================== Request/Response Types ====================

/// Request for image generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    /// Model name or endpoint ID.
    pub model: String,

    /// Image description.
    pub prompt: String,

    /// Zero, one, or many reference image URLs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageReference>,

    /// Whether the model may produce a coherent series of images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequential_image_generation: Option<SequentialGeneration>,

    /// Options for sequential generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequential_image_generation_options: Option<SequentialGenerationOptions>,

    /// How generated images are returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,

    /// Output resolution, e.g. "2K" or "2048x2048".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Whether to add a watermark.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<bool>,
}

/// One or many reference image URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageReference {
    Single(String),
    Multiple(Vec<String>),
}

impl From<&str> for ImageReference {
    fn from(url: &str) -> Self {
        ImageReference::Single(url.to_string())
    }
}

impl From<Vec<String>> for ImageReference {
    fn from(urls: Vec<String>) -> Self {
        ImageReference::Multiple(urls)
    }
}

/// Sequential generation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequentialGeneration {
    /// The model decides whether to produce a series.
    #[default]
    Auto,
    /// Generate a single image only.
    Disabled,
}

/// Options for sequential generation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SequentialGenerationOptions {
    /// Upper bound on the number of generated images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_images: Option<i32>,
}

impl SequentialGenerationOptions {
    pub fn max_images(n: i32) -> Self {
        Self {
            max_images: Some(n),
        }
    }
}

/// How generated images are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// A download URL per image.
    #[default]
    Url,
    /// Base64-encoded image data inline.
    B64Json,
}

/// Response from a non-streaming image generation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub model: String,

    /// Unix timestamp of request completion.
    #[serde(default)]
    pub created: i64,

    /// One entry per requested image.
    #[serde(default)]
    pub data: Vec<ImageData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// A single generated image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageData {
    /// Image URL (response_format = url).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Base64 image data (response_format = b64_json).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,

    /// Pixel dimensions, e.g. "2048x2048".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Present when this image failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

// ==================== Internal Types ====================

#[derive(Serialize)]
struct ImageGenerationStreamRequest {
    #[serde(flatten)]
    inner: ImageGenerationRequest,
    stream: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_skips_unset_fields() {
        let req = ImageGenerationRequest {
            model: "seedream-4-0-250828".to_string(),
            prompt: "a cat".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&req).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["model"], "seedream-4-0-250828");
        assert_eq!(obj["prompt"], "a cat");
    }

    #[test]
    fn single_reference_serializes_as_string() {
        let req = ImageGenerationRequest {
            model: "m".to_string(),
            prompt: "p".to_string(),
            image: Some("https://example.com/ref.png".into()),
            ..Default::default()
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["image"], "https://example.com/ref.png");
    }

    #[test]
    fn multiple_references_serialize_as_array() {
        let req = ImageGenerationRequest {
            model: "m".to_string(),
            prompt: "p".to_string(),
            image: Some(vec!["a".to_string(), "b".to_string()].into()),
            ..Default::default()
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["image"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn stream_request_carries_flag_and_flattens() {
        let req = ImageGenerationRequest {
            model: "m".to_string(),
            prompt: "p".to_string(),
            sequential_image_generation: Some(SequentialGeneration::Auto),
            sequential_image_generation_options: Some(SequentialGenerationOptions::max_images(4)),
            response_format: Some(ResponseFormat::Url),
            size: Some("2K".to_string()),
            watermark: Some(true),
            ..Default::default()
        };

        let wrapped = ImageGenerationStreamRequest {
            inner: req,
            stream: true,
        };

        let json = serde_json::to_value(&wrapped).unwrap();
        assert_eq!(json["stream"], true);
        assert_eq!(json["model"], "m");
        assert_eq!(json["sequential_image_generation"], "auto");
        assert_eq!(json["sequential_image_generation_options"]["max_images"], 4);
        assert_eq!(json["response_format"], "url");
        assert_eq!(json["size"], "2K");
        assert_eq!(json["watermark"], true);
    }
}
