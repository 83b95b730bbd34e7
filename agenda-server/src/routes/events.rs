//! Single-event endpoints

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::NaiveDate;
use serde::Deserialize;

use agenda_core::{Event, EventCollection, EventDraft, EventPatch, recurrence, search};

use crate::routes::{ApiError, ApiJson};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/{id}", put(update_event).delete(delete_event))
}

/// Query parameters for `GET /api/events`. All optional; an unfiltered
/// request returns the whole collection.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Free-text search over title, description and location
    pub q: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// GET /api/events - the stored collection, optionally filtered
async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<EventCollection>, ApiError> {
    let mut events = state.store().list().await?;

    if let Some(term) = &query.q {
        events.retain(|e| search::matches_term(e, term));
    }
    if query.from.is_some() || query.to.is_some() {
        events.retain(|e| search::in_range(e, query.from, query.to));
    }

    Ok(Json(EventCollection { events }))
}

/// POST /api/events - create one event
async fn create_event(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<EventDraft>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    draft
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let event = recurrence::expand_single(draft);
    let event = state.store().insert(event).await?;

    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/events/{id} - shallow-merge a patch onto one event
async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<EventPatch>,
) -> Result<Json<Event>, ApiError> {
    patch
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    match state.store().update(&id, &patch).await? {
        Some(event) => Ok(Json(event)),
        None => Err(ApiError::NotFound(format!("Event not found: {id}"))),
    }
}

/// DELETE /api/events/{id} - always 204, existence is not checked
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store().remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
