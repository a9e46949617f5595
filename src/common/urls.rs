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

//! URL helpers for the tracking endpoint.

use crate::common::consts::FUELTRACK_WS_PATH;

/// Builds the tracking WebSocket URL from an application origin.
///
/// The secure transport scheme is selected when the origin itself is secure
/// (`https` becomes `wss`, `http` becomes `ws`); `ws`/`wss` origins pass through.
///
/// # Errors
///
/// Returns an error if the origin does not carry a supported scheme.
pub fn ws_url_from_origin(origin: &str) -> anyhow::Result<String> {
    let origin = origin.trim_end_matches('/');

    let base = if let Some(rest) = origin.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = origin.strip_prefix("http://") {
        format!("ws://{rest}")
    } else if origin.starts_with("wss://") || origin.starts_with("ws://") {
        origin.to_string()
    } else {
        anyhow::bail!("Unsupported origin scheme: {origin}");
    };

    Ok(format!("{base}{FUELTRACK_WS_PATH}"))
}
