// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Resilient HTTP client with per-request timeouts, limited retry, and cooperative cancellation.

use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use super::error::{HttpClientError, HttpResult, should_retry_http_error};
use crate::common::consts::{DEFAULT_HTTP_RETRIES, DEFAULT_HTTP_TIMEOUT_SECS};

/// Per-request configuration.
#[derive(Clone, Debug)]
pub struct RequestConfig {
    /// Deadline for one complete exchange (connect, send, receive the full body).
    pub timeout: Duration,
    /// Number of retries after the first attempt fails with a retryable error.
    pub retries: u32,
    /// Additional headers applied to the request.
    pub headers: Vec<(String, String)>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            retries: DEFAULT_HTTP_RETRIES,
            headers: Vec::new(),
        }
    }
}

/// A completed HTTP exchange.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The response status code.
    pub status: u16,
    /// The response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Deserializes the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> HttpResult<T> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}

/// HTTP client for the FuelTrack REST endpoints.
///
/// Wraps a shared [`reqwest::Client`] with a per-exchange timeout, a bounded retry loop for
/// transient failures, and a [`CancellationToken`] that aborts every in-flight request when
/// triggered. Cancellation and timeout are reported as distinct outcomes and never retried.
#[derive(Clone, Debug)]
pub struct ResilientHttpClient {
    client: reqwest::Client,
    base_url: String,
    cancellation_token: CancellationToken,
}

impl ResilientHttpClient {
    /// Creates a new [`ResilientHttpClient`] for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fueltrack/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            cancellation_token: CancellationToken::new(),
        })
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the cancellation token observed by every request on this client.
    #[must_use]
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation_token
    }

    /// Cancels all in-flight and future requests on this client.
    ///
    /// Used at teardown (screen unmount, logout) so no stale response is delivered afterwards.
    pub fn cancel_all_requests(&self) {
        tracing::debug!("Canceling all HTTP requests");
        self.cancellation_token.cancel();
    }

    /// Sends a request to `path`, retrying transient failures per `config`.
    ///
    /// The timeout applies to each attempt individually. Cancellation and timeout abort the
    /// retry loop immediately; transport failures and non-success statuses consume retries.
    ///
    /// # Errors
    ///
    /// Returns the final [`HttpClientError`] once the retry budget is spent, or immediately on
    /// cancellation or timeout.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        config: &RequestConfig,
    ) -> HttpResult<HttpResponse> {
        let url = format!("{}{path}", self.base_url);
        let mut last_error = None;

        for attempt in 0..=config.retries {
            if attempt > 0 {
                tracing::debug!(
                    %url,
                    "Retrying request (attempt {}/{})",
                    attempt + 1,
                    config.retries + 1,
                );
            }

            match self
                .execute_once(method.clone(), &url, body.as_ref(), config)
                .await
            {
                Ok(response) => return Ok(response),
                Err(e) if should_retry_http_error(&e) => {
                    tracing::warn!(%url, "Request attempt failed: {e}");
                    last_error = Some(e);
                }
                Err(e) => {
                    tracing::debug!(%url, "Request aborted: {e}");
                    return Err(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| HttpClientError::Client("Request failed".to_string())))
    }

    /// Convenience for a GET exchange with JSON deserialization of the body.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange fails or the body is not valid JSON for `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        config: &RequestConfig,
    ) -> HttpResult<T> {
        self.request(Method::GET, path, None, config).await?.json()
    }

    async fn execute_once(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
        config: &RequestConfig,
    ) -> HttpResult<HttpResponse> {
        let mut request = self.client.request(method, url);
        for (key, value) in &config.headers {
            request = request.header(key, value);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let exchange = async {
            let response = request
                .send()
                .await
                .map_err(|e| HttpClientError::Network(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| HttpClientError::Network(e.to_string()))?;

            if (200..300).contains(&status) {
                Ok(HttpResponse { status, body })
            } else {
                Err(HttpClientError::Status { status, body })
            }
        };

        tokio::select! {
            () = self.cancellation_token.cancelled() => Err(HttpClientError::Cancelled),
            result = tokio::time::timeout(config.timeout, exchange) => {
                result.map_err(|_| HttpClientError::Timeout(config.timeout))?
            }
        }
    }
}
