//! Allocation service HTTP client
//!
//! - Endpoint: POST {base_url}/allocate
//! - Health:   GET  {base_url}/health
//! - One request in flight per calculation; no retries

use crate::errors::{AllocatorError, Result};
use crate::request::AllocationRequest;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Default allocation service base URL
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// Default request timeout; the service consults a language model and can be slow
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Anything that can turn an allocation request into a raw response
#[async_trait]
pub trait AllocationService: Send + Sync {
    /// Submit a request, returning the response body on a 2xx status
    async fn allocate(&self, request: &AllocationRequest) -> Result<Value>;

    /// Whether the service reports itself healthy
    async fn health_check(&self) -> Result<bool>;
}

/// reqwest-backed allocation client
#[derive(Debug, Clone)]
pub struct AllocationClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl AllocationClient {
    /// Create client with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(DEFAULT_API_URL, DEFAULT_TIMEOUT)
    }

    /// Create client for `base_url`, trailing slash optional
    pub fn with_config(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AllocatorError::HttpError)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn map_send_error(&self, err: reqwest::Error) -> AllocatorError {
        if err.is_timeout() {
            AllocatorError::Timeout {
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else {
            AllocatorError::HttpError(err)
        }
    }
}

#[async_trait]
impl AllocationService for AllocationClient {
    async fn allocate(&self, request: &AllocationRequest) -> Result<Value> {
        let url = self.endpoint("allocate");
        debug!("POST {} {}", url, serde_json::to_string(request)?);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AllocatorError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        let value: Value = serde_json::from_str(&body)?;
        Ok(value)
    }

    async fn health_check(&self) -> Result<bool> {
        let url = self.endpoint("health");

        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                let body: Value = response.json().await.unwrap_or(Value::Null);
                Ok(body
                    .get("status")
                    .and_then(Value::as_str)
                    .map_or(true, |status| status == "healthy"))
            }
            Ok(response) => {
                debug!("Health check returned HTTP {}", response.status());
                Ok(false)
            }
            Err(e) => {
                debug!("Health check failed: {}", e);
                Ok(false)
            }
        }
    }
}
