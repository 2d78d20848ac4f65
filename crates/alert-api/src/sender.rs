//! Authorized HTTP dispatch.

use std::time::Duration;

use alert_core::{AlertError, ResponseSnapshot};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Request};
use tracing::{debug, warn};

/// Default timeout for a single API request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A successful response, fully read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// URL the request was sent to.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

impl ApiResponse {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Copy of this response for error reporting.
    pub fn snapshot(&self) -> ResponseSnapshot {
        ResponseSnapshot {
            url: self.url.clone(),
            status: self.status,
            body: self.body.clone(),
        }
    }
}

/// Sends requests, optionally authorized with a raw token.
///
/// Implementations fail with [`AlertError::Request`] on transport errors and
/// on non-success status codes.
#[async_trait]
pub trait HttpSender: Send + Sync {
    async fn send(&self, request: Request, token: Option<&str>) -> Result<ApiResponse, AlertError>;
}

/// [`HttpSender`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestSender {
    http: Client,
}

impl ReqwestSender {
    /// Create a sender with the default request timeout.
    pub fn new() -> Result<Self, AlertError> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a sender with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, AlertError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AlertError::transport(e.to_string()))?;
        Ok(Self { http })
    }

    /// Wrap an existing client.
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpSender for ReqwestSender {
    async fn send(
        &self,
        mut request: Request,
        token: Option<&str>,
    ) -> Result<ApiResponse, AlertError> {
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(token).map_err(|_| {
                AlertError::invalid_argument("authorization_token", "not a valid header value")
            })?;
            value.set_sensitive(true);
            request.headers_mut().insert(AUTHORIZATION, value);
        }

        let url = request.url().to_string();
        debug!("{} {}", request.method(), url);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| AlertError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), url = %url, "Alert API returned non-success status");
            return Err(AlertError::Request {
                status: Some(status.as_u16()),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AlertError::transport(e.to_string()))?;

        Ok(ApiResponse::new(url, status.as_u16(), body))
    }
}
