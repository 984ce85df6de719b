//! HTTP fetch and JSON decode.
//!
//! One client is built per run with the configured timeout; each page is
//! one request. The HTTP status is deliberately not checked: an API error
//! body that is valid JSON flows on to the filter stage, whose failure
//! path dumps the payload for diagnosis.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::debug;

use crate::error::{RunError, RunResult};
use crate::options::RunOptions;

/// HTTP client for one pipeline run.
#[derive(Debug)]
pub(crate) struct ApiClient {
    client: reqwest::Client,
    method: reqwest::Method,
    headers: HeaderMap,
}

impl ApiClient {
    /// Builds the client from the run options.
    ///
    /// # Errors
    ///
    /// Returns a network-stage error when a configured header name or
    /// value is not a legal HTTP header.
    pub(crate) fn new(options: &RunOptions) -> RunResult<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| RunError::Network {
                message: format!("invalid header name {:?}: {}", name, e),
                url: options.url.clone(),
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| RunError::Network {
                message: format!("invalid header value for {}: {}", name, e),
                url: options.url.clone(),
            })?;
            headers.append(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| RunError::Network {
                message: format!("failed to create HTTP client: {}", e),
                url: options.url.clone(),
            })?;

        Ok(Self {
            client,
            method: options.method.clone(),
            headers,
        })
    }

    /// Fetches one page and decodes its body as JSON.
    pub(crate) async fn fetch_page(&self, url: &str) -> RunResult<Value> {
        let response = self
            .client
            .request(self.method.clone(), url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    "request timeout".to_string()
                } else if e.is_connect() {
                    format!("connection failed: {}", e)
                } else {
                    format!("request failed: {}", e)
                };
                RunError::Network {
                    message,
                    url: url.to_string(),
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| RunError::Network {
            message: format!("failed to read response: {}", e),
            url: url.to_string(),
        })?;

        debug!(%url, %status, bytes = body.len(), "fetched page");

        if body.is_empty() {
            return Err(RunError::Decode {
                message: "response body is empty".to_string(),
            });
        }

        serde_json::from_str(&body).map_err(|e| RunError::Decode {
            message: e.to_string(),
        })
    }
}
