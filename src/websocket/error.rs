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

//! Tracking WebSocket client error types.

use thiserror::Error;

/// Error types for the tracking WebSocket client.
///
/// Transport and server failures observed while the connection is live surface on the event
/// stream rather than as errors; this enum covers the fallible public operations only.
#[derive(Debug, Clone, Error)]
pub enum TrackingWsError {
    /// Failed to queue a command for the feed handler.
    #[error("Send error: {0}")]
    Send(String),
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),
    /// Operation timed out.
    #[error("Timeout: {0}")]
    Timeout(String),
}

impl From<serde_json::Error> for TrackingWsError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}

/// Result type alias for tracking WebSocket operations.
pub type TrackingWsResult<T> = Result<T, TrackingWsError>;
