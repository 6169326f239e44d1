//! REST API endpoint handlers for the Observer server.
//!
//! All handlers read from the in-memory [`ObserverSnapshot`] via the
//! shared [`AppState`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Plain-text greeting |
//! | `GET` | `/api/world` | Latest world snapshot |
//! | `GET` | `/api/entities` | List entities, optionally by state |
//! | `GET` | `/api/entities/:id` | Single entity |
//! | `GET` | `/api/summary` | Last tick summary |
//!
//! [`ObserverSnapshot`]: crate::state::ObserverSnapshot

use std::str::FromStr;
use std::sync::Arc;

use animalia_types::{EntityId, EntityState};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;

use crate::error::ObserverError;
use crate::state::AppState;

/// Fixed body of `GET /`.
pub const GREETING: &str = "Hello, world!";

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the `GET /api/entities` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct EntitiesQuery {
    /// Only return entities carrying this state label.
    pub state: Option<EntityState>,
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

/// Liveness greeting.
pub async fn index() -> &'static str {
    GREETING
}

// ---------------------------------------------------------------------------
// GET /api/world
// ---------------------------------------------------------------------------

/// Return the latest world snapshot, or 404 before the first tick.
pub async fn get_world(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.snapshot.read().await;
    let world = snapshot
        .world
        .as_ref()
        .ok_or_else(|| ObserverError::NotFound("no world snapshot yet".to_owned()))?;
    Ok(Json(serde_json::to_value(world.as_ref())?))
}

// ---------------------------------------------------------------------------
// GET /api/entities
// ---------------------------------------------------------------------------

/// List every entity in tick order.
///
/// # Query Parameters
///
/// - `state`: `roaming` | `find_food` | `find_water` | `resting`
pub async fn list_entities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EntitiesQuery>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.snapshot.read().await;

    let entities: Vec<_> = snapshot
        .world
        .iter()
        .flat_map(|w| w.entities.iter())
        .filter(|e| params.state.is_none_or(|wanted| e.state == wanted))
        .collect();

    Ok(Json(serde_json::json!({
        "tick": snapshot.current_tick(),
        "count": entities.len(),
        "entities": entities,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/entities/:id
// ---------------------------------------------------------------------------

/// Return one entity, or 404 if no entity carries the ID.
pub async fn get_entity(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ObserverError> {
    let id = parse_entity_id(&id_str)?;
    let snapshot = state.snapshot.read().await;

    let entity = snapshot
        .world
        .iter()
        .flat_map(|w| w.entities.iter())
        .find(|e| e.id == id)
        .ok_or_else(|| ObserverError::NotFound(format!("entity {id}")))?;

    Ok(Json(serde_json::to_value(entity)?))
}

// ---------------------------------------------------------------------------
// GET /api/summary
// ---------------------------------------------------------------------------

/// Return the last tick summary, or 404 before the first tick.
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.snapshot.read().await;
    let summary = snapshot
        .last_summary
        .as_ref()
        .ok_or_else(|| ObserverError::NotFound("no tick has run yet".to_owned()))?;
    Ok(Json(serde_json::to_value(summary)?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_entity_id(s: &str) -> Result<EntityId, ObserverError> {
    u32::from_str(s)
        .map(EntityId::new)
        .map_err(|e| ObserverError::InvalidId(format!("{s}: {e}")))
}
