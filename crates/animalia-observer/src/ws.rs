//! `WebSocket` handler for real-time world streaming.
//!
//! Clients connect to `GET /ws/world`, receive the latest stored
//! [`WorldSnapshot`] right away (if any tick has run), and then one
//! JSON-encoded snapshot per tick. All clients share one
//! [`broadcast::Receiver`](tokio::sync::broadcast::Receiver) stream.
//!
//! A client that falls behind skips the lagged frames and resumes from
//! the most recent one.
//!
//! [`WorldSnapshot`]: animalia_types::WorldSnapshot

use std::sync::Arc;

use animalia_types::WorldSnapshot;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming world snapshots.
///
/// # Route
///
/// `GET /ws/world`
pub async fn ws_world(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

async fn send_snapshot(socket: &mut WebSocket, snapshot: &WorldSnapshot) -> bool {
    let json = match serde_json::to_string(snapshot) {
        Ok(j) => j,
        Err(e) => {
            warn!("failed to serialize world snapshot: {e}");
            return true;
        }
    };
    socket.send(Message::Text(json.into())).await.is_ok()
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("WebSocket client connected");

    let mut rx = state.subscribe();

    let latest = state.snapshot.read().await.world.clone();
    if let Some(world) = latest
        && !send_snapshot(&mut socket, &world).await
    {
        debug!("WebSocket client disconnected (initial send failed)");
        return;
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(world) => {
                        if !send_snapshot(&mut socket, &world).await {
                            debug!("WebSocket client disconnected (send failed)");
                            return;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        debug!(skipped = n, "WebSocket client lagged, skipping ahead");
                    }
                    Err(RecvError::Closed) => {
                        debug!("broadcast channel closed, shutting down WebSocket");
                        return;
                    }
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!("WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    // Client text and binary frames are ignored.
                    _ => {}
                }
            }
        }
    }
}
