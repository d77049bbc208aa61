//! Streaming response reduction.
//!
//! A streaming image generation request yields a one-shot sequence of
//! progress events. [`collect_urls`] drives that sequence to completion
//! and reduces it to the list of successfully generated image URLs.

use std::pin::pin;

use futures::{Stream, StreamExt};
use tracing::{info, warn};

use super::event::GenerationEvent;

/// Consumes a stream of generation events and returns the URLs of the
/// images that were generated, in arrival order.
///
/// Absent entries (`None`) are skipped. A `PartialFailed` event is
/// logged and, when it carries the fatal `InternalServiceError` code,
/// stops consumption early. A `PartialSucceeded` event contributes its
/// URL only when it carries no error and the URL is present. The
/// `Completed` event logs the usage summary and lets the stream drain
/// naturally.
///
/// This function never fails: a fatal event or an exhausted stream both
/// return whatever URLs were accumulated so far. Callers that need all
/// requested images must compare the result length against their
/// `max_images` themselves.
///
/// # Example
///
/// ```rust,no_run
/// # use byteark::{Client, ImageGenerationRequest};
/// # async fn run(client: Client, request: ImageGenerationRequest) -> byteark::Result<()> {
/// let stream = client.images().generate_stream(&request).await?;
/// let urls = byteark::collect_urls(stream).await;
/// println!("generated {} image(s)", urls.len());
/// # Ok(())
/// # }
/// ```
pub async fn collect_urls<S>(events: S) -> Vec<String>
where
    S: Stream<Item = Option<GenerationEvent>>,
{
    let mut events = pin!(events);
    let mut urls = Vec::new();

    while let Some(item) = events.next().await {
        let Some(event) = item else {
            continue;
        };

        match event {
            GenerationEvent::PartialFailed(fail) => {
                match &fail.error {
                    Some(err) => warn!(error = %err, "image generation failed"),
                    None => warn!("image generation failed without error info"),
                }
                if fail.is_fatal() {
                    break;
                }
            }

            GenerationEvent::PartialSucceeded(ok) => {
                if ok.error.is_none() {
                    if let Some(url) = ok.url {
                        info!(
                            size = ok.size.as_deref().unwrap_or("unknown"),
                            url = %url,
                            "image generated"
                        );
                        urls.push(url);
                    }
                }
            }

            GenerationEvent::Completed(done) => {
                if done.error.is_none() {
                    match &done.usage {
                        Some(usage) => info!(usage = %usage, "generation completed"),
                        None => info!("generation completed"),
                    }
                }
            }
        }
    }

    urls
}

#[cfg(test)]
mod tests {
    use futures::stream;

    use super::*;
    use crate::event::{Completion, ErrorInfo, PartialFailure, PartialSuccess, Usage};

    fn success(url: &str) -> Option<GenerationEvent> {
        Some(GenerationEvent::PartialSucceeded(PartialSuccess {
            url: Some(url.to_string()),
            size: Some("2048x2048".to_string()),
            ..Default::default()
        }))
    }

    fn failed(code: &str) -> Option<GenerationEvent> {
        Some(GenerationEvent::PartialFailed(PartialFailure {
            error: Some(ErrorInfo {
                code: code.to_string(),
                message: "test failure".to_string(),
            }),
            image_index: None,
        }))
    }

    fn completed() -> Option<GenerationEvent> {
        Some(GenerationEvent::Completed(Completion {
            error: None,
            usage: Some(Usage {
                generated_images: 2,
                output_tokens: 50,
                total_tokens: 60,
            }),
        }))
    }

    #[tokio::test]
    async fn collects_urls_in_arrival_order() {
        let events = stream::iter(vec![success("a"), success("b"), completed()]);
        assert_eq!(collect_urls(events).await, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn non_fatal_failure_continues() {
        let events = stream::iter(vec![
            success("a"),
            failed("RateLimitExceeded"),
            success("b"),
        ]);
        assert_eq!(collect_urls(events).await, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn fatal_failure_stops_early() {
        let events = stream::iter(vec![
            success("a"),
            failed("InternalServiceError"),
            success("b"),
        ]);
        assert_eq!(collect_urls(events).await, vec!["a"]);
    }

    #[tokio::test]
    async fn absent_entries_are_skipped() {
        let events = stream::iter(vec![None, success("a"), None]);
        assert_eq!(collect_urls(events).await, vec!["a"]);
    }

    #[tokio::test]
    async fn success_with_error_is_excluded() {
        let events = stream::iter(vec![Some(GenerationEvent::PartialSucceeded(
            PartialSuccess {
                error: Some(ErrorInfo {
                    code: "SensitiveContentDetected".to_string(),
                    message: "blocked".to_string(),
                }),
                url: Some("https://example.com/a.png".to_string()),
                ..Default::default()
            },
        ))]);
        assert!(collect_urls(events).await.is_empty());
    }

    #[tokio::test]
    async fn success_without_url_is_excluded() {
        let events = stream::iter(vec![
            Some(GenerationEvent::PartialSucceeded(PartialSuccess::default())),
            success("a"),
        ]);
        assert_eq!(collect_urls(events).await, vec!["a"]);
    }

    #[tokio::test]
    async fn failure_without_error_info_continues() {
        let events = stream::iter(vec![
            Some(GenerationEvent::PartialFailed(PartialFailure::default())),
            success("a"),
        ]);
        assert_eq!(collect_urls(events).await, vec!["a"]);
    }

    #[tokio::test]
    async fn fatal_code_on_completed_does_not_stop_early() {
        // Only partial_failed events short-circuit.
        let events = stream::iter(vec![
            Some(GenerationEvent::Completed(Completion {
                error: Some(ErrorInfo {
                    code: "InternalServiceError".to_string(),
                    message: "late failure".to_string(),
                }),
                usage: None,
            })),
            success("a"),
        ]);
        assert_eq!(collect_urls(events).await, vec!["a"]);
    }

    #[tokio::test]
    async fn empty_stream_yields_empty_result() {
        let events = stream::iter(Vec::<Option<GenerationEvent>>::new());
        assert!(collect_urls(events).await.is_empty());
    }

    #[tokio::test]
    async fn duplicate_urls_are_kept() {
        let events = stream::iter(vec![success("a"), success("a")]);
        assert_eq!(collect_urls(events).await, vec!["a", "a"]);
    }
}
