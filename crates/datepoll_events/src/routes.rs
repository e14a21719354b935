// --- File: crates/datepoll_events/src/routes.rs ---

use crate::handlers::{
    add_response_handler, create_event_handler, decode_snapshot_handler, delete_response_handler,
    get_cached_event_handler, get_event_handler, last_error_handler, share_link_handler,
    snapshot_link_handler, update_response_handler, view_handler, EventsState,
};
use crate::service::EventService;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

/// Creates a router containing all event routes, relative to `/api`.
pub fn routes(service: Arc<EventService>) -> Router {
    let events_state = Arc::new(EventsState { service });

    Router::new()
        .route("/events", post(create_event_handler))
        .route("/events/{event_id}", get(get_event_handler))
        .route("/events/{event_id}/cached", get(get_cached_event_handler))
        .route("/events/{event_id}/responses", post(add_response_handler))
        .route(
            "/events/{event_id}/responses/{response_id}",
            put(update_response_handler).delete(delete_response_handler),
        )
        .route("/events/{event_id}/share", get(share_link_handler))
        .route("/events/{event_id}/snapshot", get(snapshot_link_handler))
        .route("/snapshots/decode", post(decode_snapshot_handler))
        .route("/view", get(view_handler))
        .route("/status/last-error", get(last_error_handler))
        .with_state(events_state)
}
