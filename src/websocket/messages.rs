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

//! Data structures for the tracking wire protocol and the public event stream.
//!
//! All frames are JSON text with a `type` discriminator.

use serde::{Deserialize, Serialize};

use super::error::TrackingWsResult;
use crate::common::enums::OrderStatus;

/// Outbound messages sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Authenticates the connection with a user identity.
    Auth {
        #[serde(rename = "userId")]
        user_id: u64,
    },
    /// Subscribes to updates for a specific order.
    TrackOrder {
        #[serde(rename = "orderId")]
        order_id: u64,
    },
}

/// A geographic position reported for a driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Driver position update for a tracked order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverLocationUpdate {
    #[serde(rename = "orderId")]
    pub order_id: u64,
    pub location: GeoLocation,
    /// Human-readable arrival estimate supplied by the server (e.g. "5 min").
    #[serde(rename = "estimatedArrival", default)]
    pub estimated_arrival: Option<String>,
}

/// Order lifecycle status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    #[serde(rename = "orderId")]
    pub order_id: u64,
    pub status: OrderStatus,
}

/// Inbound messages received from the tracking server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The authentication request was accepted.
    AuthSuccess,
    /// Driver position update.
    DriverLocation(DriverLocationUpdate),
    /// Order status change.
    OrderStatusUpdate(OrderStatusUpdate),
    /// Application-level error reported by the server.
    Error { message: String },
}

/// Events delivered to the consumer of [`TrackingWebSocketClient::stream`].
///
/// [`TrackingWebSocketClient::stream`]: crate::websocket::client::TrackingWebSocketClient::stream
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingEvent {
    /// The transport opened.
    Connected,
    /// The transport closed (explicitly or due to failure).
    Disconnected,
    /// Driver position update for the tracked order.
    DriverLocation(DriverLocationUpdate),
    /// Order status change.
    StatusUpdate(OrderStatusUpdate),
    /// Transport or server-reported error; non-fatal to the connection.
    Error(String),
    /// The automatic reconnection budget is exhausted; a manual `connect` is required.
    ReconnectExhausted,
}

/// Parses a raw text frame into a [`ServerMessage`].
///
/// Frames with an unrecognized `type`, or malformed frames, yield an error; callers log and
/// drop them without affecting the connection.
///
/// # Errors
///
/// Returns an error if the frame is not a recognized tracking message.
pub fn parse_server_message(text: &str) -> TrackingWsResult<ServerMessage> {
    serde_json::from_str(text).map_err(Into::into)
}
