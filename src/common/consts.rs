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

//! Core constants for the FuelTrack client.

/// Path of the tracking WebSocket endpoint on the serving host.
pub const FUELTRACK_WS_PATH: &str = "/ws";

// Reconnection policy defaults
pub const DEFAULT_RECONNECT_DELAY_INITIAL_MS: u64 = 3_000;
pub const DEFAULT_RECONNECT_DELAY_MAX_MS: u64 = 30_000;
pub const DEFAULT_RECONNECT_BACKOFF_FACTOR: f64 = 1.5;
pub const DEFAULT_RECONNECT_MAX_ATTEMPTS: u32 = 5;

// HTTP request defaults
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HTTP_RETRIES: u32 = 1;
