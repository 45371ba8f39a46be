//! WebSocket handler
//!
//! Handles WebSocket connections and message processing.

use crate::connection::Connection;
use crate::events::ServerEvent;
use crate::handlers::{ConnectHandler, DisconnectHandler, MessageDispatcher};
use crate::protocol::{ClientEvent, ProtocolError};
use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use chat_core::ConnectionId;
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, interval_at, Instant, MissedTickBehavior};

/// How long a closing connection may spend flushing its queue
const CLOSE_GRACE: Duration = Duration::from_secs(2);

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket) {
    let id = ConnectionId::generate();
    let heartbeat = state.config().heartbeat;

    // Create message channel for outgoing events
    let (tx, rx) = mpsc::channel::<ServerEvent>(state.config().gateway.outbound_buffer);

    // Register connection
    let connection = state.connection_manager().add_connection(id.clone(), tx);
    ConnectHandler::handle(&mut state.relay().lock(), &id);

    tracing::info!(
        connection_id = %id,
        connections = state.connection_manager().connection_count(),
        "WebSocket connection established"
    );

    let (ws_sink, mut ws_stream) = socket.split();

    // Receive task: decode and dispatch client frames
    let state_recv = state.clone();
    let connection_recv = connection.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            connection_recv.touch();

            match msg {
                Ok(Message::Text(text)) => {
                    handle_text_message(&state_recv, &connection_recv, &text);
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        connection_id = %connection_recv.id(),
                        error = %ProtocolError::Binary,
                        "Ignoring frame"
                    );
                }
                Ok(Message::Ping(_)) => {
                    // Pong is handled automatically by axum
                    tracing::trace!(connection_id = %connection_recv.id(), "Ping received");
                }
                Ok(Message::Pong(_)) => {
                    tracing::trace!(connection_id = %connection_recv.id(), "Pong received");
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(connection_id = %connection_recv.id(), "Client closed connection");
                    return;
                }
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection_recv.id(),
                        error = %e,
                        "WebSocket error"
                    );
                    return;
                }
            }
        }
    });

    // Send task: drain the outbound queue and ping on schedule
    let mut send_task = tokio::spawn(send_loop(id.clone(), ws_sink, rx, heartbeat.ping_interval()));

    // Idle monitor: close connections that stopped talking
    let connection_hb = connection.clone();
    let idle_timeout = heartbeat.idle_timeout();
    let mut heartbeat_task = tokio::spawn(async move {
        let mut check_interval = interval(heartbeat.ping_interval() / 2);
        check_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            check_interval.tick().await;

            let idle = connection_hb.idle_for();
            if idle > idle_timeout {
                tracing::warn!(
                    connection_id = %connection_hb.id(),
                    idle_ms = idle.as_millis(),
                    "Connection timed out (no activity)"
                );
                break;
            }
        }
    });

    // Wait for any task to complete
    let send_finished = tokio::select! {
        _ = &mut recv_task => {
            tracing::debug!(connection_id = %id, "Receive task ended");
            false
        }
        _ = &mut send_task => {
            tracing::debug!(connection_id = %id, "Send task ended");
            true
        }
        _ = &mut heartbeat_task => {
            tracing::debug!(connection_id = %id, "Heartbeat task ended");
            false
        }
    };

    recv_task.abort();
    heartbeat_task.abort();

    cleanup_connection(&state, &connection);

    // Once every handle to the connection is gone the queue closes and the
    // send task flushes what is left, then sends a close frame
    drop(connection);
    if !send_finished && tokio::time::timeout(CLOSE_GRACE, &mut send_task).await.is_err() {
        tracing::debug!(connection_id = %id, "Send task did not finish, aborting");
        send_task.abort();
    }
}

/// Forward queued events to the socket until the queue closes
async fn send_loop(
    id: ConnectionId,
    mut ws_sink: SplitSink<WebSocket, Message>,
    mut rx: mpsc::Receiver<ServerEvent>,
    ping_interval: Duration,
) {
    let mut ping = interval_at(Instant::now() + ping_interval, ping_interval);
    ping.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let outgoing = tokio::select! {
            event = rx.recv() => match event {
                Some(event) => match event.to_json() {
                    Ok(json) => Message::Text(json),
                    Err(e) => {
                        tracing::warn!(connection_id = %id, error = %e, "Failed to encode event");
                        continue;
                    }
                },
                None => break,
            },
            _ = ping.tick() => Message::Ping(Vec::new()),
        };

        if ws_sink.send(outgoing).await.is_err() {
            tracing::debug!(connection_id = %id, "Failed to write to WebSocket");
            break;
        }
    }

    // Close the WebSocket when the queue is closed
    let _ = ws_sink.close().await;
}

/// Handle a text frame from the client
fn handle_text_message(state: &GatewayState, connection: &Connection, text: &str) {
    let event = match ClientEvent::from_json(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(
                connection_id = %connection.id(),
                error = %e,
                "Ignoring frame"
            );
            return;
        }
    };

    tracing::trace!(
        connection_id = %connection.id(),
        event = %event.event_type(),
        "Received event"
    );

    MessageDispatcher::dispatch(state, connection, event);
}

/// Clean up a connection on disconnect
///
/// Announces the departure while the connection is still registered, then
/// drops its outbound queue.
fn cleanup_connection(state: &GatewayState, connection: &Arc<Connection>) {
    let id = connection.id();

    tracing::info!(
        connection_id = %id,
        age_ms = connection.age().as_millis(),
        "Cleaning up connection"
    );

    connection.mark_closed();

    DisconnectHandler::handle(&mut state.relay().lock(), state.connection_manager(), id);

    state.connection_manager().remove_connection(id);
}
