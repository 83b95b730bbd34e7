//! Batch endpoints: create with recurrence grouping, update, delete

use std::collections::HashSet;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::Deserialize;

use agenda_core::{Event, EventDraft, IdentifiedPatch, recurrence};

use crate::routes::{ApiError, ApiJson};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/events-list",
        post(create_events).put(update_events).delete(delete_events),
    )
}

/// Request body for batch create
#[derive(Deserialize)]
pub struct CreateEventsRequest {
    pub events: Vec<EventDraft>,
}

/// Request body for batch update
#[derive(Deserialize)]
pub struct UpdateEventsRequest {
    pub events: Vec<IdentifiedPatch>,
}

/// Request body for batch delete
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventsRequest {
    pub event_ids: Vec<String>,
}

/// POST /api/events-list - batch create; repeating drafts of the batch
/// share one freshly generated repeat-group id
async fn create_events(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateEventsRequest>,
) -> Result<(StatusCode, Json<Vec<Event>>), ApiError> {
    for draft in &req.events {
        draft
            .validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
    }

    let events = recurrence::expand_batch(req.events);
    let events = state.store().insert_many(events).await?;

    Ok((StatusCode::CREATED, Json(events)))
}

/// PUT /api/events-list - batch update; responds with the pre-patch
/// collection on any match, 404 when nothing matched
async fn update_events(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UpdateEventsRequest>,
) -> Result<Json<Vec<Event>>, ApiError> {
    for identified in &req.events {
        identified
            .patch
            .validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
    }

    match state.store().apply_patches(&req.events).await? {
        Some(before) => Ok(Json(before)),
        None => Err(ApiError::NotFound("Event not found".to_string())),
    }
}

/// DELETE /api/events-list - remove by id set; always 204, absent ids
/// are silently ignored
async fn delete_events(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<DeleteEventsRequest>,
) -> Result<StatusCode, ApiError> {
    let ids: HashSet<String> = req.event_ids.into_iter().collect();
    state.store().remove_many(&ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
