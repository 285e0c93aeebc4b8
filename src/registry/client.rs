//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Per-request extra headers
//! - Status code classification (not found, rate limit, other failures)
//!
//! Failed requests are not retried; the error propagates to the caller.

use crate::error::RegistryError;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("upadup/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                RegistryError::network_error(
                    "",
                    "HTTP client",
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { client })
    }

    /// Perform a GET request with extra headers and error context
    pub async fn get_with_context(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        package: &str,
        registry: &str,
    ) -> Result<Response, RegistryError> {
        debug!(url, "GET");
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                RegistryError::timeout(package, registry)
            } else {
                RegistryError::network_error(package, registry, e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || is_exhausted_quota(&response) {
            return Err(RegistryError::RateLimitExceeded {
                registry: registry.to_string(),
            });
        }
        if status == StatusCode::NOT_FOUND {
            return Err(RegistryError::package_not_found(package, registry));
        }
        if !status.is_success() {
            return Err(RegistryError::network_error(
                package,
                registry,
                format!("HTTP {}", status),
            ));
        }

        Ok(response)
    }

    /// Perform a GET request and parse the JSON response
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        package: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let response = self
            .get_with_context(url, headers, package, registry)
            .await?;

        response.json::<T>().await.map_err(|e| {
            RegistryError::invalid_response(
                package,
                registry,
                format!("failed to parse JSON: {}", e),
            )
        })
    }
}

/// GitHub reports an exhausted quota as 403 with `x-ratelimit-remaining: 0`
fn is_exhausted_quota(response: &Response) -> bool {
    response.status() == StatusCode::FORBIDDEN
        && response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            == Some("0")
}
