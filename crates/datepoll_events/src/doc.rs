// File: crates/datepoll_events/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{
    DecodeSnapshotRequest, DecodeSnapshotResponse, LastErrorResponse, ShareQuery,
    SnapshotLinkResponse, ViewQuery, ViewState,
};
use crate::logic::{SlotTally, TallySummary};
use crate::service::{EventDetails, EventLinks, NewEvent, ResponseInput, ShareLink};
use crate::view::View;
use datepoll_common::models::{Availability, DateCandidate, Event, ParticipantResponse};

#[utoipa::path(
    post,
    path = "/events",
    request_body(content = NewEvent, example = json!({
        "title": "Team Sync",
        "memo": "Quarterly planning",
        "contact": "lead@example.com",
        "candidates": ["Mon 10am", "Tue 2pm"]
    })),
    responses(
        (status = 201, description = "Event created", body = EventDetails),
        (status = 400, description = "Empty title, no candidates or blank label"),
        (status = 500, description = "Store failure")
    ),
    tag = "Events"
)]
fn doc_create_event_handler() {}

#[utoipa::path(
    get,
    path = "/events/{event_id}",
    params(("event_id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Event with tally and links, freshly fetched", body = EventDetails),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "Events"
)]
fn doc_get_event_handler() {}

#[utoipa::path(
    get,
    path = "/events/{event_id}/cached",
    params(("event_id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Cached event with tally and links", body = EventDetails),
        (status = 404, description = "Event not cached")
    ),
    tag = "Events"
)]
fn doc_get_cached_event_handler() {}

#[utoipa::path(
    post,
    path = "/events/{event_id}/responses",
    params(("event_id" = String, Path, description = "Event identifier")),
    request_body(content = ResponseInput, example = json!({
        "name": "Cara",
        "comment": "Only after lunch",
        "availability": {"c-1": "unavailable", "c-2": "available", "c-3": null}
    })),
    responses(
        (status = 201, description = "Response added; organizer is notified", body = EventDetails),
        (status = 400, description = "Blank name"),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "Responses"
)]
fn doc_add_response_handler() {}

#[utoipa::path(
    put,
    path = "/events/{event_id}/responses/{response_id}",
    params(
        ("event_id" = String, Path, description = "Event identifier"),
        ("response_id" = String, Path, description = "Response identifier")
    ),
    request_body = ResponseInput,
    responses(
        (status = 200, description = "Response replaced", body = EventDetails),
        (status = 400, description = "Blank name"),
        (status = 404, description = "Event or response not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "Responses"
)]
fn doc_update_response_handler() {}

#[utoipa::path(
    delete,
    path = "/events/{event_id}/responses/{response_id}",
    params(
        ("event_id" = String, Path, description = "Event identifier"),
        ("response_id" = String, Path, description = "Response identifier")
    ),
    responses(
        (status = 200, description = "Response deleted", body = EventDetails),
        (status = 404, description = "Event or response not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "Responses"
)]
fn doc_delete_response_handler() {}

#[utoipa::path(
    get,
    path = "/events/{event_id}/share",
    params(("event_id" = String, Path, description = "Event identifier"), ShareQuery),
    responses(
        (status = 200, description = "Identifier link", body = ShareLink,
         example = json!({"url": "https://poll.example/#/event/3f2c/respond", "shortened": false})),
        (status = 404, description = "Event not found")
    ),
    tag = "Links"
)]
fn doc_share_link_handler() {}

#[utoipa::path(
    get,
    path = "/events/{event_id}/snapshot",
    params(("event_id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Self-contained snapshot link", body = SnapshotLinkResponse),
        (status = 404, description = "Event not found")
    ),
    tag = "Links"
)]
fn doc_snapshot_link_handler() {}

#[utoipa::path(
    post,
    path = "/snapshots/decode",
    request_body = DecodeSnapshotRequest,
    responses(
        (status = 200, description = "Decoded event, null when malformed", body = DecodeSnapshotResponse)
    ),
    tag = "Links"
)]
fn doc_decode_snapshot_handler() {}

#[utoipa::path(
    get,
    path = "/view",
    params(ViewQuery),
    responses(
        (status = 200, description = "View selected by the fragment", body = ViewState,
         example = json!({"state": {"view": "responding", "event_id": "3f2c"}, "fragment": "#/event/3f2c/respond"}))
    ),
    tag = "View"
)]
fn doc_view_handler() {}

#[utoipa::path(
    get,
    path = "/status/last-error",
    responses(
        (status = 200, description = "Message of the last transient failure", body = LastErrorResponse)
    ),
    tag = "Status"
)]
fn doc_last_error_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_create_event_handler,
        doc_get_event_handler,
        doc_get_cached_event_handler,
        doc_add_response_handler,
        doc_update_response_handler,
        doc_delete_response_handler,
        doc_share_link_handler,
        doc_snapshot_link_handler,
        doc_decode_snapshot_handler,
        doc_view_handler,
        doc_last_error_handler
    ),
    components(
        schemas(
            Availability, DateCandidate, ParticipantResponse, Event,
            SlotTally, TallySummary,
            NewEvent, ResponseInput, EventLinks, EventDetails, ShareLink,
            SnapshotLinkResponse, DecodeSnapshotRequest, DecodeSnapshotResponse,
            View, ViewState, LastErrorResponse
        )
    ),
    tags(
        (name = "Events", description = "Create and read scheduling polls"),
        (name = "Responses", description = "Participant availability"),
        (name = "Links", description = "Share and snapshot links"),
        (name = "View", description = "Fragment routing"),
        (name = "Status", description = "Service status")
    ),
    servers(
        (url = "/api", description = "Datepoll API server")
    )
)]
pub struct EventsApiDoc;
