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

//! Enumerations for connection lifecycle and order state.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Lifecycle stage of the tracking connection.
///
/// Stored as an atomic `u8` shared between the client orchestrator and the feed handler;
/// all transitions happen on the handler task.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq)]
pub enum ConnectionState {
    /// No transport; nothing in flight.
    #[default]
    Disconnected = 0,
    /// A transport dial is in progress.
    Connecting = 1,
    /// Transport open, not yet authenticated.
    Connected = 2,
    /// Transport open and the user identity accepted by the server.
    Authenticated = 3,
}

impl ConnectionState {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Connecting,
            2 => Self::Connected,
            3 => Self::Authenticated,
            _ => Self::Disconnected,
        }
    }
}

/// Delivery order lifecycle status as reported by the tracking server.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    DriverAssigned,
    EnRoute,
    Arrived,
    Delivering,
    Completed,
    Cancelled,
    /// Fallback for statuses this client version does not know about.
    #[serde(other)]
    Unknown,
}
