//! HTTP client implementation for the Ark API.

use std::time::Duration;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::{
    Client as ReqwestClient, Response, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::{Serialize, de::DeserializeOwned};

use super::{
    error::{Error, Result},
    event::ErrorInfo,
};

/// HTTP client for the Ark API.
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
    api_key: String,
}

impl HttpClient {
    /// Creates a new HTTP client.
    pub fn new(base_url: String, api_key: String) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(300))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Makes an HTTP request to the API.
    pub async fn request<T, R>(&self, method: &str, path: &str, body: Option<&T>) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let mut request = match method {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url),
            "DELETE" => self.client.delete(&url),
            _ => return Err(Error::Other(format!("unsupported method: {}", method))),
        };

        request = request.headers(self.default_headers());

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Makes a streaming HTTP request.
    ///
    /// The returned stream is one-shot: the underlying connection is
    /// consumed as the stream is polled and cannot be restarted.
    pub async fn request_stream<T>(
        &self,
        method: &str,
        path: &str,
        body: Option<T>,
    ) -> Result<impl Stream<Item = Result<Bytes>> + use<T>>
    where
        T: Serialize,
    {
        let url = format!("{}{}", self.base_url, path);

        let mut request = match method {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url),
            _ => return Err(Error::Other(format!("unsupported method: {}", method))),
        };

        let mut headers = self.default_headers();
        headers.insert("Accept", HeaderValue::from_static("text/event-stream"));
        request = request.headers(headers);

        if let Some(ref body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if response.status() != StatusCode::OK {
            return Err(self.handle_error_response(response).await);
        }

        Ok(response.bytes_stream().map(|r| r.map_err(Error::from)))
    }

    /// Returns default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).unwrap(),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("byteark-rust/0.1"));
        headers
    }

    /// Handles the API response.
    async fn handle_response<R>(&self, response: Response) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(self.parse_error(&body, status.as_u16()));
        }

        // A 200 response can still carry an API-level error envelope.
        if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(&body) {
            if let Some(err) = envelope.error {
                return Err(Error::api(err.code, err.message, status.as_u16()));
            }
        }

        serde_json::from_slice(&body).map_err(Error::from)
    }

    /// Handles an error response.
    async fn handle_error_response(&self, response: Response) -> Error {
        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => self.parse_error(&body, status),
            Err(e) => Error::Http(e),
        }
    }

    /// Parses an error response body.
    fn parse_error(&self, body: &[u8], http_status: u16) -> Error {
        if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
            if let Some(err) = envelope.error {
                return Error::api(err.code, err.message, http_status);
            }
        }

        Error::api(
            http_status.to_string(),
            String::from_utf8_lossy(body).to_string(),
            http_status,
        )
    }
}

/// API error envelope.
#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorInfo>,
}

/// SSE (Server-Sent Events) reader.
pub(crate) struct SseReader<S> {
    stream: S,
    buffer: String,
}

impl<S> SseReader<S>
where
    S: Stream<Item = Result<Bytes>> + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            buffer: String::new(),
        }
    }

    /// Reads the next SSE event payload.
    ///
    /// Returns `Ok(None)` once the stream is exhausted or the server
    /// sends the `[DONE]` terminator.
    pub async fn read_event(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            // Check if we have a complete event in the buffer
            if let Some(event) = self.extract_event() {
                if event == "[DONE]" {
                    return Ok(None);
                }
                return Ok(Some(event.into_bytes()));
            }

            // Read more data from the stream
            match self.stream.next().await {
                Some(Ok(bytes)) => {
                    self.buffer.push_str(&String::from_utf8_lossy(&bytes));
                }
                Some(Err(e)) => return Err(e),
                None => return Ok(None),
            }
        }
    }

    /// Extracts a complete event from the buffer.
    fn extract_event(&mut self) -> Option<String> {
        // Find "data:" line followed by a double newline
        let mut search_pos = 0;

        while let Some(pos) = self.buffer[search_pos..].find("data:") {
            let abs_pos = search_pos + pos;
            let after_data = abs_pos + 5; // "data:" length

            // Skip whitespace after "data:"
            let content_start = self.buffer[after_data..]
                .chars()
                .take_while(|c| *c == ' ')
                .count()
                + after_data;

            // Find the end of this data line
            if let Some(newline_pos) = self.buffer[content_start..].find('\n') {
                let content_end = content_start + newline_pos;
                let content = self.buffer[content_start..content_end].trim();

                // Check if this is a complete event (followed by empty line or another event)
                let after_newline = content_end + 1;
                if after_newline >= self.buffer.len()
                    || self.buffer[after_newline..].starts_with('\n')
                    || self.buffer[after_newline..].starts_with("data:")
                {
                    let result = content.to_string();
                    self.buffer = self.buffer[after_newline..]
                        .trim_start_matches('\n')
                        .to_string();
                    return Some(result);
                }
            }

            search_pos = abs_pos + 1;
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use futures::stream;

    use super::*;

    fn byte_stream(chunks: Vec<&'static str>) -> impl Stream<Item = Result<Bytes>> + Unpin {
        stream::iter(
            chunks
                .into_iter()
                .map(|c| Ok(Bytes::from_static(c.as_bytes())))
                .collect::<Vec<_>>(),
        )
    }

    #[tokio::test]
    async fn reads_events_from_single_chunk() {
        let s = byte_stream(vec!["data: {\"a\":1}\n\ndata: {\"b\":2}\n\n"]);
        let mut reader = SseReader::new(s);

        assert_eq!(reader.read_event().await.unwrap().unwrap(), b"{\"a\":1}");
        assert_eq!(reader.read_event().await.unwrap().unwrap(), b"{\"b\":2}");
        assert!(reader.read_event().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reads_event_split_across_chunks() {
        let s = byte_stream(vec!["data: {\"url\":", "\"a\"}\n\n"]);
        let mut reader = SseReader::new(s);

        assert_eq!(
            reader.read_event().await.unwrap().unwrap(),
            b"{\"url\":\"a\"}"
        );
    }

    #[tokio::test]
    async fn done_marker_terminates() {
        let s = byte_stream(vec!["data: {\"a\":1}\n\ndata: [DONE]\n\n"]);
        let mut reader = SseReader::new(s);

        assert!(reader.read_event().await.unwrap().is_some());
        assert!(reader.read_event().await.unwrap().is_none());
    }
}
