//! BytePlus Ark image generation SDK for Rust.
//!
//! This crate provides a client for the Ark image generation API,
//! including streaming consumption of generation progress events.

mod client;
mod error;
mod event;
pub mod http;
mod image;
mod models;
mod stream;

pub use client::{BASE_URL_CN, Client, ClientBuilder, DEFAULT_BASE_URL};
pub use error::{Error, Result, error_code};
pub use event::{
    Completion, ErrorInfo, EVENT_TYPE_COMPLETED, EVENT_TYPE_PARTIAL_FAILED,
    EVENT_TYPE_PARTIAL_SUCCEEDED, GenerationEvent, PartialFailure, PartialSuccess, Usage,
};
pub use image::{
    ImageData, ImageGenerationRequest, ImageReference, ImageResponse, ImageService,
    ResponseFormat, SequentialGeneration, SequentialGenerationOptions,
};
pub use models::*;
pub use stream::collect_urls;
