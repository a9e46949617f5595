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

//! Tracking feed handler.
//!
//! The handler runs in a dedicated Tokio task as the I/O boundary between the client
//! orchestrator and the network layer. It exclusively owns the WebSocket transport and all
//! mutable connection state (pending identity/order intents, reconnect bookkeeping), so every
//! state transition is serialized on this task.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU8, Ordering},
};

use futures_util::{SinkExt, StreamExt};
use tokio::{net::TcpStream, time::Instant};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite};
use tungstenite::Message;

use super::{
    backoff::ReconnectBackoff,
    client::TrackingClientConfig,
    messages::{ClientMessage, ServerMessage, TrackingEvent, parse_server_message},
};
use crate::common::enums::ConnectionState;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Commands sent from the client to the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerCommand {
    /// Open the transport if not already open or opening.
    Connect,
    /// Record the user identity and authenticate when the transport is open.
    Authenticate { user_id: u64 },
    /// Record the order target and subscribe once authenticated.
    TrackOrder { order_id: u64 },
    /// Close the transport and clear all remembered intents.
    Disconnect,
}

/// Tracking feed handler.
///
/// Runs in a dedicated Tokio task, processing commands, transport frames, and reconnect timers.
#[allow(missing_debug_implementations)] // Transport stream is not Debug
pub struct TrackingFeedHandler {
    config: TrackingClientConfig,
    signal: Arc<AtomicBool>,
    state: Arc<AtomicU8>,
    cmd_rx: tokio::sync::mpsc::UnboundedReceiver<HandlerCommand>,
    out_tx: tokio::sync::mpsc::UnboundedSender<TrackingEvent>,
    ws: Option<WsStream>,
    user_id: Option<u64>,
    order_id: Option<u64>,
    order_tracked: bool,
    backoff: ReconnectBackoff,
    reconnect_at: Option<Instant>,
}

impl TrackingFeedHandler {
    /// Creates a new feed handler.
    #[must_use]
    pub fn new(
        config: TrackingClientConfig,
        signal: Arc<AtomicBool>,
        state: Arc<AtomicU8>,
        cmd_rx: tokio::sync::mpsc::UnboundedReceiver<HandlerCommand>,
        out_tx: tokio::sync::mpsc::UnboundedSender<TrackingEvent>,
    ) -> Self {
        let backoff = ReconnectBackoff::new(
            config.reconnect_delay_initial_ms,
            config.reconnect_delay_max_ms,
            config.reconnect_backoff_factor,
            config.reconnect_max_attempts,
        );

        Self {
            config,
            signal,
            state,
            cmd_rx,
            out_tx,
            ws: None,
            user_id: None,
            order_id: None,
            order_tracked: false,
            backoff,
            reconnect_at: None,
        }
    }

    fn connection_state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Relaxed))
    }

    fn set_state(&self, next: ConnectionState) {
        let prev = self.connection_state();
        if prev != next {
            tracing::debug!("Connection state: {prev} -> {next}");
        }
        self.state.store(next.as_u8(), Ordering::Relaxed);
    }

    fn emit(&self, event: TrackingEvent) {
        // Receiver dropped means no consumer is listening; nothing to do
        let _ = self.out_tx.send(event);
    }

    /// Main processing loop; runs until the stop signal is set or the client is dropped.
    pub async fn run(mut self) {
        loop {
            if self.signal.load(Ordering::Relaxed) {
                tracing::debug!("Stop signal received");
                break;
            }

            let reconnect_at = self.reconnect_at;

            tokio::select! {
                maybe_cmd = self.cmd_rx.recv() => {
                    match maybe_cmd {
                        Some(cmd) => self.process_command(cmd).await,
                        None => {
                            tracing::debug!("Command channel closed, stopping handler");
                            break;
                        }
                    }
                }
                frame = next_frame(self.ws.as_mut()), if self.ws.is_some() => {
                    self.process_frame(frame).await;
                }
                _ = tokio::time::sleep_until(reconnect_at.unwrap_or_else(Instant::now)), if reconnect_at.is_some() => {
                    self.reconnect_at = None;
                    self.try_connect().await;
                }
                // Periodic stop-signal check
                _ = tokio::time::sleep(tokio::time::Duration::from_millis(100)) => {}
            }
        }

        if let Some(mut ws) = self.ws.take() {
            let _ = ws.close(None).await;
        }
        tracing::debug!("Tracking feed handler stopped");
    }

    async fn process_command(&mut self, cmd: HandlerCommand) {
        match cmd {
            HandlerCommand::Connect => {
                if self.ws.is_some() || self.reconnect_at.is_some() {
                    tracing::debug!("Connect ignored: already connected or connecting");
                    return;
                }
                self.try_connect().await;
            }
            HandlerCommand::Authenticate { user_id } => {
                self.user_id = Some(user_id);
                if self.ws.is_some() {
                    self.send_message(&ClientMessage::Auth { user_id }).await;
                } else if self.reconnect_at.is_none() {
                    self.try_connect().await;
                }
            }
            HandlerCommand::TrackOrder { order_id } => {
                self.order_id = Some(order_id);
                self.order_tracked = false;
                if self.connection_state() == ConnectionState::Authenticated {
                    self.send_message(&ClientMessage::TrackOrder { order_id })
                        .await;
                    self.order_tracked = true;
                } else if self.ws.is_none() && self.reconnect_at.is_none() {
                    self.try_connect().await;
                }
            }
            HandlerCommand::Disconnect => {
                tracing::info!("Disconnecting by request");
                self.reconnect_at = None;
                self.user_id = None;
                self.order_id = None;
                self.order_tracked = false;
                if let Some(mut ws) = self.ws.take() {
                    let _ = ws.close(None).await;
                }
                self.set_state(ConnectionState::Disconnected);
                self.emit(TrackingEvent::Disconnected);
            }
        }
    }

    async fn try_connect(&mut self) {
        self.set_state(ConnectionState::Connecting);
        tracing::info!(url = %self.config.url, "Connecting to tracking endpoint");

        match connect_async(self.config.url.as_str()).await {
            Ok((ws, _response)) => {
                self.ws = Some(ws);
                self.order_tracked = false;
                self.backoff.reset();
                self.set_state(ConnectionState::Connected);
                self.emit(TrackingEvent::Connected);
                tracing::info!("Tracking connection established");

                if let Some(user_id) = self.user_id {
                    self.send_message(&ClientMessage::Auth { user_id }).await;
                }
            }
            Err(tungstenite::Error::Url(e)) => {
                // Transport construction failure: not recoverable by retrying
                self.set_state(ConnectionState::Disconnected);
                tracing::error!("Invalid tracking endpoint URL: {e}");
                self.emit(TrackingEvent::Error(format!(
                    "Invalid tracking endpoint URL: {e}"
                )));
            }
            Err(e) => {
                self.set_state(ConnectionState::Disconnected);
                tracing::warn!("Connect failed: {e}");
                self.emit(TrackingEvent::Disconnected);
                self.schedule_reconnect();
            }
        }
    }

    fn schedule_reconnect(&mut self) {
        match self.backoff.next_delay() {
            Some(delay) => {
                tracing::info!(
                    "Scheduling reconnect attempt {}/{} in {delay:?}",
                    self.backoff.attempts(),
                    self.backoff.max_attempts(),
                );
                self.reconnect_at = Some(Instant::now() + delay);
            }
            None => {
                tracing::warn!("Reconnect attempts exhausted; manual connect required");
                self.emit(TrackingEvent::ReconnectExhausted);
            }
        }
    }

    fn on_transport_closed(&mut self) {
        self.ws = None;
        self.order_tracked = false;
        self.set_state(ConnectionState::Disconnected);
        self.emit(TrackingEvent::Disconnected);
        self.schedule_reconnect();
    }

    async fn process_frame(&mut self, frame: Option<Result<Message, tungstenite::Error>>) {
        match frame {
            Some(Ok(Message::Text(text))) => self.process_text(&text).await,
            Some(Ok(Message::Ping(payload))) => {
                if let Some(ws) = self.ws.as_mut()
                    && let Err(e) = ws.send(Message::Pong(payload)).await
                {
                    tracing::warn!("Failed to send pong: {e}");
                }
            }
            Some(Ok(Message::Close(frame))) => {
                tracing::info!("Received close frame: {frame:?}");
                self.on_transport_closed();
            }
            Some(Ok(_)) => {} // Binary/Pong frames carry nothing for us
            Some(Err(e)) => {
                // The stream is dead after a read error, so the close bookkeeping runs here
                tracing::warn!("Transport error: {e}");
                self.emit(TrackingEvent::Error(format!("Transport error: {e}")));
                self.on_transport_closed();
            }
            None => {
                tracing::info!("Transport stream ended");
                self.on_transport_closed();
            }
        }
    }

    async fn process_text(&mut self, text: &str) {
        let msg = match parse_server_message(text) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("Dropping unrecognized message: {e}");
                return;
            }
        };

        match msg {
            ServerMessage::AuthSuccess => {
                self.set_state(ConnectionState::Authenticated);
                tracing::info!("Tracking connection authenticated");

                // Replay the pending order subscription exactly once
                if let Some(order_id) = self.order_id
                    && !self.order_tracked
                {
                    self.send_message(&ClientMessage::TrackOrder { order_id })
                        .await;
                    self.order_tracked = true;
                }
            }
            ServerMessage::DriverLocation(update) => {
                if self.order_id == Some(update.order_id) {
                    self.emit(TrackingEvent::DriverLocation(update));
                } else {
                    tracing::debug!(
                        order_id = update.order_id,
                        "Dropping driver location for untracked order"
                    );
                }
            }
            ServerMessage::OrderStatusUpdate(update) => {
                tracing::debug!(
                    order_id = update.order_id,
                    status = %update.status,
                    "Order status update"
                );
                self.emit(TrackingEvent::StatusUpdate(update));
            }
            ServerMessage::Error { message } => {
                tracing::error!("Tracking server error: {message}");
                self.emit(TrackingEvent::Error(message));
            }
        }
    }

    async fn send_message(&mut self, msg: &ClientMessage) {
        let payload = match serde_json::to_string(msg) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to serialize outbound message: {e}");
                return;
            }
        };

        let Some(ws) = self.ws.as_mut() else {
            tracing::debug!("Not connected; outbound message deferred");
            return;
        };

        tracing::debug!("Sending: {payload}");
        if let Err(e) = ws.send(Message::Text(payload.into())).await {
            tracing::warn!("Send failed: {e}");
            self.emit(TrackingEvent::Error(format!("Send failed: {e}")));
        }
    }
}

async fn next_frame(
    ws: Option<&mut WsStream>,
) -> Option<Result<Message, tungstenite::Error>> {
    match ws {
        Some(ws) => ws.next().await,
        // Guarded out in the select loop; never resolves
        None => std::future::pending().await,
    }
}
