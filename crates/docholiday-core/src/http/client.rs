//! HTTP transport for the doc.holiday API

use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

/// Production API base URL
pub const DEFAULT_API_URL: &str = "https://api.doc.holiday";

/// Job creation path
pub const JOBS_PATH: &str = "/api/v1/jobs";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("docholiday-action/", env!("CARGO_PKG_VERSION"));

/// Status and body text of one HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body text
    pub body: String,
}

/// One POST of a JSON document with bearer authentication
///
/// An `Err` means no response was received at all; every HTTP status,
/// including errors, comes back as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url`
    async fn post_json(&self, url: &str, token: &str, body: &str) -> Result<RawResponse>;
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a per-attempt timeout of 30 seconds
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &str, token: &str, body: &str) -> Result<RawResponse> {
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, bytes = body.len(), "Received API response");

        Ok(RawResponse { status, body })
    }
}

/// Full job creation URL for a base URL
pub fn jobs_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), JOBS_PATH)
}
