//! Shareable links.
//!
//! Identifier links point at an event held in the store:
//! `<base>#/event/<id>` and `<base>#/event/<id>/respond`.
//!
//! Snapshot links carry the whole event in the fragment as URL-safe base64
//! (no padding) of its JSON form: `<base>#/s/<payload>`. They are an export
//! and import format only; the store stays authoritative.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use datepoll_common::models::{Availability, AvailabilityMap, DateCandidate, Event, ParticipantResponse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

const EVENT_PREFIX: &str = "/event/";
const RESPOND_SUFFIX: &str = "/respond";
const SNAPSHOT_PREFIX: &str = "#/s/";

/// `base` with any fragment removed.
fn strip_fragment(base: &str) -> &str {
    base.split('#').next().unwrap_or(base)
}

/// Fragment addressing an event, with the leading `#`.
pub fn event_fragment(event_id: &str, respond: bool) -> String {
    format!(
        "#{}{}{}",
        EVENT_PREFIX,
        urlencoding::encode(event_id),
        if respond { RESPOND_SUFFIX } else { "" }
    )
}

/// Link to an event, or to its response form when `respond` is set.
pub fn event_link(base: &str, event_id: &str, respond: bool) -> String {
    format!("{}{}", strip_fragment(base), event_fragment(event_id, respond))
}

/// Parse an event fragment back into `(event_id, respond)`.
///
/// Accepts the fragment with or without its leading `#`, or a whole link.
pub fn parse_event_fragment(fragment: &str) -> Option<(String, bool)> {
    let path = match fragment.split_once('#') {
        Some((_, after)) => after,
        None => fragment,
    };
    parse_event_path(path)
}

/// Parse the path part of an event fragment, `/event/<id>[/respond]`.
///
/// Anything before `/event/`, including a second `#`, is rejected.
pub fn parse_event_path(path: &str) -> Option<(String, bool)> {
    let rest = path.strip_prefix(EVENT_PREFIX)?;
    let (encoded, respond) = match rest.strip_suffix(RESPOND_SUFFIX) {
        Some(id) => (id, true),
        None => (rest, false),
    };
    if encoded.is_empty() || encoded.contains(['/', '#']) {
        return None;
    }
    let event_id = urlencoding::decode(encoded).ok()?.into_owned();
    Some((event_id, respond))
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotCandidate {
    id: String,
    label: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotParticipant {
    id: String,
    name: String,
    #[serde(default)]
    comment: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    availability: BTreeMap<String, Option<Availability>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    id: String,
    title: String,
    #[serde(default)]
    memo: String,
    #[serde(default)]
    contact: Option<String>,
    created_at: DateTime<Utc>,
    candidates: Vec<SnapshotCandidate>,
    #[serde(default)]
    participants: Vec<SnapshotParticipant>,
}

impl From<&Event> for Snapshot {
    fn from(event: &Event) -> Self {
        Snapshot {
            id: event.id.clone(),
            title: event.title.clone(),
            memo: event.memo.clone(),
            contact: event.contact.clone(),
            created_at: event.created_at,
            candidates: event
                .candidates
                .iter()
                .map(|c| SnapshotCandidate {
                    id: c.id.clone(),
                    label: c.label.clone(),
                })
                .collect(),
            participants: event
                .participants
                .iter()
                .map(|p| SnapshotParticipant {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    comment: p.comment.clone(),
                    created_at: p.created_at,
                    availability: p
                        .availability
                        .iter()
                        .map(|(k, v)| (k.clone(), Some(*v)))
                        .collect(),
                })
                .collect(),
        }
    }
}

impl From<Snapshot> for Event {
    fn from(snapshot: Snapshot) -> Self {
        let event_id = snapshot.id;
        let candidates = snapshot
            .candidates
            .into_iter()
            .zip(0i64..)
            .map(|(c, position)| DateCandidate {
                id: c.id,
                event_id: event_id.clone(),
                label: c.label,
                sort_position: position,
            })
            .collect();
        let participants = snapshot
            .participants
            .into_iter()
            .map(|p| ParticipantResponse {
                id: p.id,
                name: p.name,
                comment: p.comment,
                created_at: p.created_at,
                availability: p
                    .availability
                    .into_iter()
                    .filter_map(|(k, v)| v.map(|v| (k, v)))
                    .collect::<AvailabilityMap>(),
            })
            .collect();

        Event {
            id: event_id,
            title: snapshot.title,
            memo: snapshot.memo,
            contact: snapshot.contact,
            created_at: snapshot.created_at,
            candidates,
            participants,
        }
    }
}

/// Encode an event as a snapshot payload.
pub fn encode_snapshot(event: &Event) -> String {
    // Serializing plain strings, timestamps and maps with string keys cannot fail.
    let json = serde_json::to_vec(&Snapshot::from(event)).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Link carrying the whole event.
pub fn snapshot_link(base: &str, event: &Event) -> String {
    format!(
        "{}{}{}",
        strip_fragment(base),
        SNAPSHOT_PREFIX,
        encode_snapshot(event)
    )
}

/// Decode a snapshot payload, a `#/s/` fragment or a full snapshot link.
///
/// Anything malformed yields `None`.
pub fn decode_snapshot(text: &str) -> Option<Event> {
    let text = text.trim();
    let payload = match text.find(SNAPSHOT_PREFIX) {
        Some(pos) => &text[pos + SNAPSHOT_PREFIX.len()..],
        None => text,
    };

    let bytes = match URL_SAFE_NO_PAD.decode(payload) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("Snapshot is not valid base64: {}", e);
            return None;
        }
    };
    let json = match String::from_utf8(bytes) {
        Ok(json) => json,
        Err(e) => {
            debug!("Snapshot is not valid UTF-8: {}", e);
            return None;
        }
    };
    match serde_json::from_str::<Snapshot>(&json) {
        Ok(snapshot) => Some(snapshot.into()),
        Err(e) => {
            debug!("Snapshot is not a valid event: {}", e);
            None
        }
    }
}
