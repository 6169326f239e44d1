//! Axum router construction for the Observer API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS and request tracing enabled.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::operator;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the Observer server.
///
/// The router includes:
/// - `GET /` -- plain-text greeting
/// - `GET /ws/world` -- `WebSocket` world snapshot stream
/// - `GET /api/world` -- latest world snapshot
/// - `GET /api/entities` -- list entities
/// - `GET /api/entities/{id}` -- single entity
/// - `GET /api/summary` -- last tick summary
/// - `/api/operator/*` -- pause, resume, speed, status, stop
///
/// CORS allows any origin so a locally served web client can connect.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/world", get(ws::ws_world))
        // REST API
        .route("/api/world", get(handlers::get_world))
        .route("/api/entities", get(handlers::list_entities))
        .route("/api/entities/{id}", get(handlers::get_entity))
        .route("/api/summary", get(handlers::get_summary))
        // Operator
        .route("/api/operator/pause", post(operator::pause))
        .route("/api/operator/resume", post(operator::resume))
        .route("/api/operator/speed", post(operator::set_speed))
        .route("/api/operator/status", get(operator::status))
        .route("/api/operator/stop", post(operator::stop))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
