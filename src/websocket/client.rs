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
//! The [`TrackingWebSocketClient`] maintains one logical connection to the tracking endpoint.
//! It is constructed once by the application's composition root and shared; all connection
//! state is owned by the inner feed handler task, which serializes every transition.

use std::{
    fmt::Debug,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU8, Ordering},
    },
    time::Duration,
};

use futures_util::Stream;

use super::{
    error::{TrackingWsError, TrackingWsResult},
    handler::{HandlerCommand, TrackingFeedHandler},
    messages::TrackingEvent,
};
use crate::common::{
    consts::{
        DEFAULT_RECONNECT_BACKOFF_FACTOR, DEFAULT_RECONNECT_DELAY_INITIAL_MS,
        DEFAULT_RECONNECT_DELAY_MAX_MS, DEFAULT_RECONNECT_MAX_ATTEMPTS,
    },
    enums::ConnectionState,
};

/// Configuration for the tracking WebSocket client.
#[derive(Clone, Debug)]
pub struct TrackingClientConfig {
    /// The tracking endpoint URL (see [`crate::common::urls::ws_url_from_origin`]).
    pub url: String,
    /// The initial reconnection delay (milliseconds).
    pub reconnect_delay_initial_ms: u64,
    /// The maximum reconnect delay (milliseconds) for exponential backoff.
    pub reconnect_delay_max_ms: u64,
    /// The exponential backoff factor for reconnection delays.
    pub reconnect_backoff_factor: f64,
    /// The maximum number of reconnection attempts before giving up.
    pub reconnect_max_attempts: u32,
}

impl TrackingClientConfig {
    /// Creates a configuration for `url` with the default reconnection policy.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect_delay_initial_ms: DEFAULT_RECONNECT_DELAY_INITIAL_MS,
            reconnect_delay_max_ms: DEFAULT_RECONNECT_DELAY_MAX_MS,
            reconnect_backoff_factor: DEFAULT_RECONNECT_BACKOFF_FACTOR,
            reconnect_max_attempts: DEFAULT_RECONNECT_MAX_ATTEMPTS,
        }
    }
}

/// WebSocket client for the FuelTrack real-time tracking endpoint.
///
/// Public operations are commands forwarded to the feed handler task; they return once the
/// command is queued, and their effect is deferred or replayed according to the current
/// connection state (see the module docs).
pub struct TrackingWebSocketClient {
    config: TrackingClientConfig,
    signal: Arc<AtomicBool>,
    state: Arc<AtomicU8>,
    cmd_tx: tokio::sync::mpsc::UnboundedSender<HandlerCommand>,
    out_rx: Option<tokio::sync::mpsc::UnboundedReceiver<TrackingEvent>>,
    task_handle: Option<tokio::task::JoinHandle<()>>,
}

impl Debug for TrackingWebSocketClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingWebSocketClient")
            .field("url", &self.config.url)
            .field("connection_state", &self.connection_state())
            .finish_non_exhaustive()
    }
}

impl TrackingWebSocketClient {
    /// Creates a new [`TrackingWebSocketClient`] and spawns its feed handler task.
    ///
    /// The client starts `Disconnected`; call [`connect`](Self::connect) or
    /// [`authenticate`](Self::authenticate) to open the transport.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn new(config: TrackingClientConfig) -> Self {
        let signal = Arc::new(AtomicBool::new(false));
        let state = Arc::new(AtomicU8::new(ConnectionState::Disconnected.as_u8()));
        let (cmd_tx, cmd_rx) = tokio::sync::mpsc::unbounded_channel();
        let (out_tx, out_rx) = tokio::sync::mpsc::unbounded_channel();

        let handler = TrackingFeedHandler::new(
            config.clone(),
            signal.clone(),
            state.clone(),
            cmd_rx,
            out_tx,
        );
        let task_handle = tokio::spawn(handler.run());

        Self {
            config,
            signal,
            state,
            cmd_tx,
            out_rx: Some(out_rx),
            task_handle: Some(task_handle),
        }
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Returns the current connection state.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Relaxed))
    }

    /// Returns whether the transport is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(
            self.connection_state(),
            ConnectionState::Connected | ConnectionState::Authenticated
        )
    }

    /// Returns whether the connection is authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.connection_state() == ConnectionState::Authenticated
    }

    /// Opens the transport.
    ///
    /// Idempotent: a no-op while already connecting, connected, or waiting on a scheduled
    /// reconnect attempt.
    ///
    /// # Errors
    ///
    /// Returns an error if the handler task has stopped.
    pub fn connect(&self) -> TrackingWsResult<()> {
        self.send_command(HandlerCommand::Connect)
    }

    /// Records the user identity and authenticates the connection.
    ///
    /// Sends the authentication message immediately if the transport is open; otherwise opens
    /// the transport first and authenticates once it is. The identity is durable across
    /// reconnects.
    ///
    /// # Errors
    ///
    /// Returns an error if the handler task has stopped.
    pub fn authenticate(&self, user_id: u64) -> TrackingWsResult<()> {
        self.send_command(HandlerCommand::Authenticate { user_id })
    }

    /// Subscribes to updates for `order_id`, replacing any previous target.
    ///
    /// The subscription is asserted on the wire once the connection is authenticated and
    /// replayed automatically after every reconnect.
    ///
    /// # Errors
    ///
    /// Returns an error if the handler task has stopped.
    pub fn track_order(&self, order_id: u64) -> TrackingWsResult<()> {
        self.send_command(HandlerCommand::TrackOrder { order_id })
    }

    /// Closes the transport and clears the remembered identity and order target.
    ///
    /// Cancels any pending reconnect attempt; no further events fire until
    /// [`connect`](Self::connect) or [`authenticate`](Self::authenticate) is called again.
    ///
    /// # Errors
    ///
    /// Returns an error if the handler task has stopped.
    pub fn disconnect(&self) -> TrackingWsResult<()> {
        self.send_command(HandlerCommand::Disconnect)
    }

    /// Waits until the transport is open or the timeout expires.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout expires before the client becomes active.
    pub async fn wait_until_active(&self, timeout_secs: f64) -> TrackingWsResult<()> {
        let timeout = Duration::from_secs_f64(timeout_secs);

        tokio::time::timeout(timeout, async {
            while !self.is_active() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .map_err(|_| {
            TrackingWsError::Timeout(format!(
                "Tracking connection timeout after {timeout_secs} seconds"
            ))
        })
    }

    /// Returns the stream of tracking events.
    ///
    /// The event channel has a single consumer; registering a new consumer means taking the
    /// stream from a fresh client instance.
    ///
    /// # Panics
    ///
    /// Panics if called twice.
    pub fn stream(&mut self) -> impl Stream<Item = TrackingEvent> + 'static {
        let mut rx = self
            .out_rx
            .take()
            .expect("Event stream receiver already taken");

        async_stream::stream! {
            while let Some(event) = rx.recv().await {
                yield event;
            }
        }
    }

    /// Stops the feed handler task for good; used at application shutdown.
    pub async fn close(&mut self) {
        tracing::info!("Closing tracking client");
        self.signal.store(true, Ordering::Relaxed);
        let _ = self.cmd_tx.send(HandlerCommand::Disconnect);

        if let Some(handle) = self.task_handle.take() {
            let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        }
    }

    fn send_command(&self, cmd: HandlerCommand) -> TrackingWsResult<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|e| TrackingWsError::Send(e.to_string()))
    }
}
