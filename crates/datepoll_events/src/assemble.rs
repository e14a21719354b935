//! Joins the three stored record sets into one [`Event`].

use datepoll_common::models::{
    AvailabilityMap, CandidateRecord, DateCandidate, Event, EventRecord, ParticipantResponse,
    StoredResponse,
};
use datepoll_common::services::{EventStore, StoreError};
use std::collections::HashSet;
use tracing::debug;

/// Build the denormalized event from its records.
///
/// Candidates are ordered by stored sort position and responses by creation
/// time, both stably. Availability rows without a value or pointing at an
/// unknown candidate are dropped.
pub fn assemble(
    header: EventRecord,
    mut candidates: Vec<CandidateRecord>,
    mut responses: Vec<StoredResponse>,
) -> Event {
    candidates.sort_by_key(|c| c.sort_position);
    responses.sort_by_key(|r| r.record.created_at);

    let known: HashSet<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
    let participants = responses
        .into_iter()
        .map(|stored| {
            let availability: AvailabilityMap = stored
                .availability
                .into_iter()
                .filter(|a| known.contains(a.candidate_id.as_str()))
                .filter_map(|a| a.value.map(|v| (a.candidate_id, v)))
                .collect();
            ParticipantResponse {
                id: stored.record.id,
                name: stored.record.name,
                comment: stored.record.comment,
                created_at: stored.record.created_at,
                availability,
            }
        })
        .collect();

    let candidates = candidates
        .into_iter()
        .map(|c| DateCandidate {
            id: c.id,
            event_id: c.event_id,
            label: c.label,
            sort_position: c.sort_position,
        })
        .collect();

    Event {
        id: header.id,
        title: header.title,
        memo: header.memo,
        contact: header.contact,
        created_at: header.created_at,
        candidates,
        participants,
    }
}

/// Fetch and assemble one event.
///
/// A missing header yields `Ok(None)`. Candidates and responses are fetched
/// concurrently once the header is known to exist.
pub async fn fetch_event(store: &dyn EventStore, event_id: &str) -> Result<Option<Event>, StoreError> {
    let header = match store.fetch_event(event_id).await {
        Ok(header) => header,
        Err(StoreError::NotFound(_)) => {
            debug!("Event {} not found", event_id);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let (candidates, responses) = tokio::try_join!(
        store.fetch_candidates(event_id),
        store.fetch_responses(event_id)
    )?;

    Ok(Some(assemble(header, candidates, responses)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryEventStore;
    use chrono::{Duration, TimeZone, Utc};
    use datepoll_common::models::{Availability, AvailabilityRecord, ResponseRecord};

    fn header() -> EventRecord {
        EventRecord {
            id: "ev".to_string(),
            title: "Offsite".to_string(),
            memo: String::new(),
            contact: None,
            created_at: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
        }
    }

    fn candidate(id: &str, position: i64) -> CandidateRecord {
        CandidateRecord {
            id: id.to_string(),
            event_id: "ev".to_string(),
            label: format!("label {}", id),
            sort_position: position,
        }
    }

    fn stored(id: &str, minute: i64, rows: &[(&str, Option<Availability>)]) -> StoredResponse {
        StoredResponse {
            record: ResponseRecord {
                id: id.to_string(),
                event_id: "ev".to_string(),
                name: id.to_uppercase(),
                comment: String::new(),
                created_at: Utc.with_ymd_and_hms(2025, 2, 2, 0, 0, 0).unwrap()
                    + Duration::minutes(minute),
            },
            availability: rows
                .iter()
                .map(|(candidate_id, value)| AvailabilityRecord {
                    response_id: id.to_string(),
                    candidate_id: candidate_id.to_string(),
                    value: *value,
                })
                .collect(),
        }
    }

    #[test]
    fn test_orders_by_position_not_label() {
        let event = assemble(
            header(),
            vec![candidate("z", 0), candidate("a", 2), candidate("m", 1)],
            vec![],
        );
        let ids: Vec<&str> = event.candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "m", "a"]);
    }

    #[test]
    fn test_orders_responses_by_creation_time() {
        let event = assemble(
            header(),
            vec![candidate("c", 0)],
            vec![stored("late", 10, &[]), stored("early", 1, &[])],
        );
        assert_eq!(event.participants[0].id, "early");
        assert_eq!(event.participants[1].id, "late");
    }

    #[test]
    fn test_drops_null_and_orphaned_availability() {
        let event = assemble(
            header(),
            vec![candidate("c1", 0), candidate("c2", 1)],
            vec![stored(
                "r",
                0,
                &[
                    ("c1", Some(Availability::Maybe)),
                    ("c2", None),
                    ("gone", Some(Availability::Available)),
                ],
            )],
        );
        let availability = &event.participants[0].availability;
        assert_eq!(availability.len(), 1);
        assert_eq!(availability.get("c1"), Some(&Availability::Maybe));
    }

    #[tokio::test]
    async fn test_fetch_missing_event_is_none() {
        let store = InMemoryEventStore::new();
        assert_eq!(fetch_event(&store, "missing").await, Ok(None));
    }

    #[tokio::test]
    async fn test_fetch_joins_records() {
        let store = InMemoryEventStore::new();
        store.insert_event(header()).await.unwrap();
        store
            .insert_candidates(vec![candidate("c2", 1), candidate("c1", 0)])
            .await
            .unwrap();
        let response = stored("r", 0, &[("c2", Some(Availability::Available))]);
        store.insert_response(response.record).await.unwrap();
        store
            .insert_availability(response.availability)
            .await
            .unwrap();

        let event = fetch_event(&store, "ev").await.unwrap().unwrap();
        assert_eq!(event.candidates[0].id, "c1");
        assert_eq!(
            event.participants[0].availability.get("c2"),
            Some(&Availability::Available)
        );
    }
}
