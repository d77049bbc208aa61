//! Streaming event types for image generation.

use serde::{Deserialize, Serialize};

use super::error::error_code;

/// Server event types for streaming image generation.
pub const EVENT_TYPE_PARTIAL_FAILED: &str = "image_generation.partial_failed";
pub const EVENT_TYPE_PARTIAL_SUCCEEDED: &str = "image_generation.partial_succeeded";
pub const EVENT_TYPE_COMPLETED: &str = "image_generation.completed";

/// A progress event from a streaming image generation request.
///
/// The stream delivers one `PartialFailed` or `PartialSucceeded` event
/// per image in the batch, followed by a single `Completed` event for
/// the whole request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GenerationEvent {
    /// A single image in the batch failed.
    #[serde(rename = "image_generation.partial_failed")]
    PartialFailed(PartialFailure),

    /// A single image in the batch was generated.
    #[serde(rename = "image_generation.partial_succeeded")]
    PartialSucceeded(PartialSuccess),

    /// Terminal event for the whole batch.
    #[serde(rename = "image_generation.completed")]
    Completed(Completion),
}

impl GenerationEvent {
    /// Decodes a single SSE frame payload.
    ///
    /// Frames that are blank, malformed, or not one of the three known
    /// event kinds decode to `None` and are skipped by consumers.
    pub fn decode(data: &[u8]) -> Option<GenerationEvent> {
        serde_json::from_slice(data).ok()
    }
}

/// Payload of a `partial_failed` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialFailure {
    /// Why this image failed, if the service reported a cause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,

    /// Position of the failed image within the batch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_index: Option<i32>,
}

impl PartialFailure {
    /// Returns true if the failure carries the fatal
    /// `InternalServiceError` code.
    pub fn is_fatal(&self) -> bool {
        self.error.as_ref().is_some_and(ErrorInfo::is_internal_service)
    }
}

/// Payload of a `partial_succeeded` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSuccess {
    /// Present when the event is malformed; such events contribute
    /// nothing to the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,

    /// URL of the generated image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Pixel dimensions, e.g. "2048x2048".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Position of the generated image within the batch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_index: Option<i32>,
}

/// Payload of a `completed` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,

    /// Aggregate usage for the whole batch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Error information attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Machine-readable error code, e.g. "InternalServiceError".
    #[serde(default)]
    pub code: String,

    /// Human-readable description.
    #[serde(default)]
    pub message: String,
}

impl ErrorInfo {
    /// Returns true if this is the fatal internal service error.
    pub fn is_internal_service(&self) -> bool {
        self.code == error_code::INTERNAL_SERVICE_ERROR
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Usage accounting for an image generation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    /// Number of images produced.
    #[serde(default)]
    pub generated_images: i32,

    /// Billable output tokens.
    #[serde(default)]
    pub output_tokens: i32,

    /// Total billable tokens.
    #[serde(default)]
    pub total_tokens: i32,
}

impl std::fmt::Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} image(s), {} output tokens, {} total tokens",
            self.generated_images, self.output_tokens, self.total_tokens
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_partial_succeeded() {
        let data = br#"{
            "type": "image_generation.partial_succeeded",
            "url": "https://example.com/a.png",
            "size": "2048x2048",
            "image_index": 0
        }"#;

        let event = GenerationEvent::decode(data).unwrap();
        match event {
            GenerationEvent::PartialSucceeded(ok) => {
                assert_eq!(ok.url.as_deref(), Some("https://example.com/a.png"));
                assert_eq!(ok.size.as_deref(), Some("2048x2048"));
                assert_eq!(ok.image_index, Some(0));
                assert!(ok.error.is_none());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn decode_partial_failed_with_error() {
        let data = br#"{
            "type": "image_generation.partial_failed",
            "error": {"code": "InternalServiceError", "message": "boom"}
        }"#;

        let event = GenerationEvent::decode(data).unwrap();
        match event {
            GenerationEvent::PartialFailed(fail) => {
                assert!(fail.is_fatal());
                assert_eq!(fail.error.unwrap().message, "boom");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn decode_completed_with_usage() {
        let data = br#"{
            "type": "image_generation.completed",
            "usage": {"generated_images": 4, "output_tokens": 100, "total_tokens": 120}
        }"#;

        let event = GenerationEvent::decode(data).unwrap();
        match event {
            GenerationEvent::Completed(done) => {
                let usage = done.usage.unwrap();
                assert_eq!(usage.generated_images, 4);
                assert_eq!(usage.total_tokens, 120);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn decode_unknown_event_type() {
        let data = br#"{"type": "image_generation.queued"}"#;
        assert!(GenerationEvent::decode(data).is_none());
    }

    #[test]
    fn decode_malformed_frame() {
        assert!(GenerationEvent::decode(b"").is_none());
        assert!(GenerationEvent::decode(b"not json").is_none());
    }

    #[test]
    fn non_fatal_error_codes() {
        let fail = PartialFailure {
            error: Some(ErrorInfo {
                code: "RateLimitExceeded".to_string(),
                message: "slow down".to_string(),
            }),
            image_index: None,
        };
        assert!(!fail.is_fatal());

        let no_info = PartialFailure::default();
        assert!(!no_info.is_fatal());
    }
}
