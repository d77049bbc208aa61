//! Ark API client.

use std::sync::Arc;

use super::{
    error::{Error, Result},
    http::HttpClient,
    image::ImageService,
};

/// Default Ark API base URL (Asia-Pacific).
pub const DEFAULT_BASE_URL: &str = "https://ark.ap-southeast.bytepluses.com/api/v3";

/// Ark API base URL for the China region.
pub const BASE_URL_CN: &str = "https://ark.cn-beijing.volces.com/api/v3";

/// Ark API client.
///
/// # Example
///
/// ```rust,no_run
/// use byteark::{Client, ImageGenerationRequest};
///
/// # async fn run() -> byteark::Result<()> {
/// let client = Client::new("your-api-key")?;
///
/// let request = ImageGenerationRequest::default();
/// let stream = client.images().generate_stream(&request).await?;
/// # Ok(())
/// # }
/// ```
pub struct Client {
    http: Arc<HttpClient>,
    config: ClientConfig,
}

/// Client configuration.
#[derive(Clone)]
struct ClientConfig {
    api_key: String,
    base_url: String,
}

impl Client {
    /// Creates a new Ark API client.
    ///
    /// The API key is passed in explicitly; the SDK never reads the
    /// process environment.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Creates a new client builder for more configuration options.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Returns the configured API key.
    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the image generation service.
    pub fn images(&self) -> ImageService {
        ImageService::new(self.http.clone())
    }

    /// Returns a reference to the internal HTTP client.
    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }
}

/// Builder for creating an Ark API client.
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
}

impl ClientBuilder {
    /// Creates a new client builder.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Sets a custom base URL for the API.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use byteark::{BASE_URL_CN, Client};
    ///
    /// # fn run() -> byteark::Result<()> {
    /// let client = Client::builder("your-api-key")
    ///     .base_url(BASE_URL_CN)
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<Client> {
        if self.api_key.is_empty() {
            return Err(Error::Config("api_key must be non-empty".to_string()));
        }

        let http = HttpClient::new(self.base_url.clone(), self.api_key.clone())?;

        Ok(Client {
            http: Arc::new(http),
            config: ClientConfig {
                api_key: self.api_key,
                base_url: self.base_url,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_rejected() {
        assert!(matches!(Client::new(""), Err(Error::Config(_))));
    }

    #[test]
    fn builder_overrides_base_url() {
        let client = Client::builder("key").base_url(BASE_URL_CN).build().unwrap();
        assert_eq!(client.base_url(), BASE_URL_CN);
        assert_eq!(client.api_key(), "key");
    }

    #[test]
    fn default_base_url_is_used() {
        let client = Client::new("key").unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }
}
