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

//! WebSocket client for real-time order tracking.
//!
//! This module provides a two-layer client architecture:
//! - Outer client: orchestrator owning the public operations and shared connection state
//! - Inner handler: I/O boundary running in a dedicated Tokio task, exclusively owning the
//!   transport and all mutable connection state
//!
//! Features:
//! - Authentication and per-order subscription with automatic replay across reconnects
//! - Bounded exponential backoff reconnection
//! - Typed event stream for UI collaborators

pub mod backoff;
pub mod client;
pub mod error;
pub mod handler;
pub mod messages;

pub use backoff::ReconnectBackoff;
pub use client::{TrackingClientConfig, TrackingWebSocketClient};
pub use error::{TrackingWsError, TrackingWsResult};
pub use handler::{HandlerCommand, TrackingFeedHandler};
pub use messages::{
    ClientMessage, DriverLocationUpdate, GeoLocation, OrderStatusUpdate, ServerMessage,
    TrackingEvent,
};
