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

//! HTTP client error types.

use std::time::Duration;

use thiserror::Error;

/// Error types for the resilient HTTP client.
///
/// Cancellation (explicit or timeout-triggered) is a distinct outcome from other failures so
/// callers can tell an aborted exchange apart from a failed one.
#[derive(Debug, Clone, Error)]
pub enum HttpClientError {
    /// The request was cancelled through the client's cancellation token.
    #[error("Request cancelled")]
    Cancelled,
    /// The per-exchange timer fired before the exchange completed.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    /// Transport-level failure (connection refused, reset, DNS, ...).
    #[error("Network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("HTTP status {status}: {body}")]
    Status {
        /// The response status code.
        status: u16,
        /// The response body, for diagnostics.
        body: String,
    },
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),
    /// Generic client error.
    #[error("Client error: {0}")]
    Client(String),
}

impl From<serde_json::Error> for HttpClientError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}

/// Result type alias for HTTP operations.
pub type HttpResult<T> = Result<T, HttpClientError>;

/// Determines if a failed exchange should be retried.
#[must_use]
pub fn should_retry_http_error(error: &HttpClientError) -> bool {
    match error {
        HttpClientError::Network(_) | HttpClientError::Status { .. } => true,
        HttpClientError::Cancelled
        | HttpClientError::Timeout(_)
        | HttpClientError::Json(_)
        | HttpClientError::Client(_) => false,
    }
}
