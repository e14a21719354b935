// --- File: crates/datepoll_events/src/handlers.rs ---
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use datepoll_common::error::{not_found, DatepollError};
use datepoll_common::models::Event;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::service::{EventDetails, EventService, NewEvent, ResponseInput, ShareLink};
use crate::view::View;

/// Shared state of the event routes.
pub struct EventsState {
    pub service: Arc<EventService>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[derive(Debug, Default, Deserialize)]
pub struct ShareQuery {
    /// Link to the response form instead of the event page.
    #[serde(default)]
    pub respond: bool,
    /// Run the link through the shortener; falls back to the full link.
    #[serde(default)]
    pub shorten: bool,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotLinkResponse {
    pub url: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize, Deserialize)]
pub struct DecodeSnapshotRequest {
    /// Snapshot payload, `#/s/` fragment or full snapshot link.
    pub snapshot: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize, Deserialize)]
pub struct DecodeSnapshotResponse {
    pub event: Option<Event>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub fragment: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize, Deserialize)]
pub struct ViewState {
    pub state: View,
    /// Canonical fragment of `state`.
    pub fragment: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize, Deserialize)]
pub struct LastErrorResponse {
    pub last_error: Option<String>,
}

fn event_not_found(event_id: &str) -> DatepollError {
    not_found(format!("event {}", event_id))
}

/// Create an event.
pub async fn create_event_handler(
    State(state): State<Arc<EventsState>>,
    Json(request): Json<NewEvent>,
) -> Result<(StatusCode, Json<EventDetails>), DatepollError> {
    let event = state.service.create_event(request).await?;
    Ok((StatusCode::CREATED, Json(state.service.details(event))))
}

/// Fetch an event from the store, with tally and links.
pub async fn get_event_handler(
    State(state): State<Arc<EventsState>>,
    Path(event_id): Path<String>,
) -> Result<Json<EventDetails>, DatepollError> {
    let event = state
        .service
        .refresh(&event_id)
        .await?
        .ok_or_else(|| event_not_found(&event_id))?;
    Ok(Json(state.service.details(event)))
}

/// Return the cached copy of an event without touching the store.
pub async fn get_cached_event_handler(
    State(state): State<Arc<EventsState>>,
    Path(event_id): Path<String>,
) -> Result<Json<EventDetails>, DatepollError> {
    let event = state.service.cached_event(&event_id).ok_or_else(|| {
        debug!("Event {} is not cached", event_id);
        event_not_found(&event_id)
    })?;
    Ok(Json(state.service.details(event)))
}

/// Add a response to an event.
pub async fn add_response_handler(
    State(state): State<Arc<EventsState>>,
    Path(event_id): Path<String>,
    Json(request): Json<ResponseInput>,
) -> Result<(StatusCode, Json<EventDetails>), DatepollError> {
    let event = state
        .service
        .add_response(&event_id, request)
        .await?
        .ok_or_else(|| event_not_found(&event_id))?;
    Ok((StatusCode::CREATED, Json(state.service.details(event))))
}

/// Replace a response.
pub async fn update_response_handler(
    State(state): State<Arc<EventsState>>,
    Path((event_id, response_id)): Path<(String, String)>,
    Json(request): Json<ResponseInput>,
) -> Result<Json<EventDetails>, DatepollError> {
    let event = state
        .service
        .update_response(&event_id, &response_id, request)
        .await?
        .ok_or_else(|| not_found(format!("response {} of event {}", response_id, event_id)))?;
    Ok(Json(state.service.details(event)))
}

/// Delete a response.
pub async fn delete_response_handler(
    State(state): State<Arc<EventsState>>,
    Path((event_id, response_id)): Path<(String, String)>,
) -> Result<Json<EventDetails>, DatepollError> {
    let event = state
        .service
        .delete_response(&event_id, &response_id)
        .await?
        .ok_or_else(|| not_found(format!("response {} of event {}", response_id, event_id)))?;
    Ok(Json(state.service.details(event)))
}

/// Identifier link to an event.
pub async fn share_link_handler(
    State(state): State<Arc<EventsState>>,
    Path(event_id): Path<String>,
    Query(query): Query<ShareQuery>,
) -> Result<Json<ShareLink>, DatepollError> {
    let link = state
        .service
        .share_link(&event_id, query.respond, query.shorten)
        .await?
        .ok_or_else(|| event_not_found(&event_id))?;
    Ok(Json(link))
}

/// Self-contained snapshot link of an event.
pub async fn snapshot_link_handler(
    State(state): State<Arc<EventsState>>,
    Path(event_id): Path<String>,
) -> Result<Json<SnapshotLinkResponse>, DatepollError> {
    let url = state
        .service
        .snapshot_link(&event_id)
        .await?
        .ok_or_else(|| event_not_found(&event_id))?;
    Ok(Json(SnapshotLinkResponse { url }))
}

/// Decode a snapshot; `event` is null when it is malformed.
pub async fn decode_snapshot_handler(
    State(state): State<Arc<EventsState>>,
    Json(request): Json<DecodeSnapshotRequest>,
) -> Json<DecodeSnapshotResponse> {
    Json(DecodeSnapshotResponse {
        event: state.service.decode_snapshot(&request.snapshot),
    })
}

/// Parse a location fragment into a view.
pub async fn view_handler(Query(query): Query<ViewQuery>) -> Json<ViewState> {
    let view = View::from_fragment(&query.fragment);
    Json(ViewState {
        fragment: view.fragment(),
        state: view,
    })
}

/// The last transient failure, if the most recent operation failed.
pub async fn last_error_handler(State(state): State<Arc<EventsState>>) -> Json<LastErrorResponse> {
    Json(LastErrorResponse {
        last_error: state.service.last_error(),
    })
}
