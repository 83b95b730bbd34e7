//! agenda-server - HTTP API over the JSON event store.
//!
//! Endpoints (JSON bodies, camelCase fields):
//! - `GET    /api/events`       - list, with optional `q`/`from`/`to` filters
//! - `POST   /api/events`       - create one event
//! - `PUT    /api/events/{id}`  - merge a patch onto one event
//! - `DELETE /api/events/{id}`  - remove one event (always 204)
//! - `POST   /api/events-list`  - batch create with recurrence grouping
//! - `PUT    /api/events-list`  - batch update
//! - `DELETE /api/events-list`  - batch delete by id set (always 204)

pub mod config;
pub mod routes;
pub mod state;
pub mod store;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::events::router())
        .merge(routes::events_list::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
