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

//! Real-time order-tracking client for the FuelTrack delivery platform.
//!
//! This crate provides the two resilience-critical pieces of the FuelTrack client stack:
//!
//! - [`websocket::TrackingWebSocketClient`]: a persistent, authenticating WebSocket connection
//!   that subscribes to per-order driver-location and status updates and delivers them to a
//!   single consumer as a typed [`websocket::TrackingEvent`] stream. Transient transport
//!   failures are recovered automatically with bounded exponential backoff, and the
//!   authentication and order-tracking intents are replayed across reconnects without caller
//!   intervention.
//! - [`http::ResilientHttpClient`]: a request helper with bounded per-exchange timeout, limited
//!   automatic retry, and cooperative cancellation, plus a batching utility that runs
//!   independent operations in bounded concurrency windows.
//!
//! Everything else in the product (order CRUD, payments, map rendering) lives in other layers
//! and consumes these clients through their public surfaces only.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod common;
pub mod http;
pub mod websocket;
