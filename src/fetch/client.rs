//! # HTTP Client Capability
//!
//! The hook never talks to the network directly. It is handed an
//! `Arc<dyn HttpClient>`, so tests can script responses and hold them back
//! without sockets or timers.

use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;

use super::error::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// A request as the hook and the blog API describe it.
///
/// `locator` is either an absolute URL or a path relative to the client's
/// base URL. `body`, when present, is JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub locator: String,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn get(locator: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            locator: locator.into(),
            body: None,
        }
    }

    pub fn post_json<B: serde::Serialize>(
        locator: impl Into<String>,
        body: &B,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            method: Method::Post,
            locator: locator.into(),
            body: Some(serde_json::to_vec(body)?),
        })
    }

    pub fn delete(locator: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            locator: locator.into(),
            body: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx, the same range `fetch`'s `ok` flag covers.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Returns the name of the client (for logs).
    fn name(&self) -> &str;

    /// Sends a request and returns the raw response.
    ///
    /// Only transport failures are errors here. A 404 is a successful
    /// exchange; interpreting the status is the caller's job.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError>;
}

/// Sends `request` and fails with `FetchError::Status` unless the response
/// is 2xx.
pub async fn expect_success(
    client: &dyn HttpClient,
    request: HttpRequest,
) -> Result<HttpResponse, FetchError> {
    let response = client.send(request).await?;
    if !response.is_success() {
        return Err(FetchError::Status(response.status));
    }
    Ok(response)
}

/// Sends `request` and decodes the 2xx body as JSON.
pub async fn fetch_json<T: DeserializeOwned>(
    client: &dyn HttpClient,
    request: HttpRequest,
) -> Result<T, FetchError> {
    let response = expect_success(client, request).await?;
    Ok(serde_json::from_slice(&response.body)?)
}

/// `HttpClient` backed by reqwest, resolving relative locators against a
/// base URL.
pub struct ReqwestClient {
    base_url: String,
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute locators pass through untouched; anything else is joined
    /// onto the base URL with exactly one slash between them.
    pub fn resolve(&self, locator: &str) -> String {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            return locator.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            locator.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    fn name(&self) -> &str {
        "reqwest"
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        let url = self.resolve(&request.locator);
        debug!("{} {}", request.method.as_str(), url);

        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };
        let builder = match request.body {
            Some(body) => builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            warn!("{} {} failed: {}", request.method.as_str(), url, e);
            FetchError::Network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!("{} {} -> {} ({} bytes)", request.method.as_str(), url, status, body.len());
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
