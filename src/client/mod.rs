//! Upstream list-API access.
//!
//! The store layer treats HTTP as an opaque collaborator: something
//! that can `get(url)` and hand back JSON or a failure. [`ApiClient`]
//! is that seam; [`HttpApiClient`] is the production implementation
//! over `reqwest`. Tests substitute stub clients.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Errors produced by an [`ApiClient`] request.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the connection failed.
    #[error("request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("unexpected status {status} from '{url}'")]
    Status { status: u16, url: String },

    /// The response body was not the expected JSON.
    #[error("invalid response body from '{url}': {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Boxed response future, so the trait stays object-safe.
pub type ClientFuture = Pin<Box<dyn Future<Output = Result<serde_json::Value, ClientError>> + Send>>;

/// Read-only JSON-over-HTTP collaborator.
pub trait ApiClient: Send + Sync {
    /// Fetch `url` and return its JSON body.
    fn get(&self, url: &str) -> ClientFuture;
}

/// Production [`ApiClient`] backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct HttpApiClient {
    http: reqwest::Client,
}

impl HttpApiClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for HttpApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient for HttpApiClient {
    fn get(&self, url: &str) -> ClientFuture {
        let http = self.http.clone();
        let url = url.to_string();
        Box::pin(async move {
            let response = http.get(&url).send().await.map_err(|source| {
                ClientError::Request {
                    url: url.clone(),
                    source,
                }
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    url,
                });
            }

            response
                .json()
                .await
                .map_err(|source| ClientError::Body { url, source })
        })
    }
}
