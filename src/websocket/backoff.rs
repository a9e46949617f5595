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

//! Bounded exponential backoff for reconnection scheduling.

use std::time::Duration;

/// Tracks reconnection attempts and computes the delay before each one.
///
/// The delay before attempt *k* is `min(initial * factor^(k-1), max)`. The attempt counter
/// resets on every successful transport open, so a later disconnect starts the schedule from
/// attempt 1 again.
#[derive(Debug, Clone)]
pub struct ReconnectBackoff {
    delay_initial: Duration,
    delay_max: Duration,
    factor: f64,
    max_attempts: u32,
    attempts: u32,
}

impl ReconnectBackoff {
    /// Creates a new [`ReconnectBackoff`] with the given policy.
    #[must_use]
    pub const fn new(
        delay_initial_ms: u64,
        delay_max_ms: u64,
        factor: f64,
        max_attempts: u32,
    ) -> Self {
        Self {
            delay_initial: Duration::from_millis(delay_initial_ms),
            delay_max: Duration::from_millis(delay_max_ms),
            factor,
            max_attempts,
            attempts: 0,
        }
    }

    /// Consumes one attempt and returns the delay before it, or `None` when the budget is
    /// exhausted.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.attempts >= self.max_attempts {
            return None;
        }
        self.attempts += 1;

        let exp = self.factor.powi(self.attempts as i32 - 1);
        let delay_ms = (self.delay_initial.as_millis() as f64 * exp).round() as u64;
        Some(Duration::from_millis(
            delay_ms.min(self.delay_max.as_millis() as u64),
        ))
    }

    /// Resets the attempt counter; called on every successful transport open.
    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    /// Attempts consumed since the last reset.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Maximum number of attempts before giving up.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Whether the attempt budget is used up.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }
}
