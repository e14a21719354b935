//! In-memory event store.
//!
//! Used when no database is configured and as the store behind the service
//! tests. Behaves like the SQL store: not-found on single-row operations,
//! candidates ordered by sort position, responses by creation time.

use datepoll_common::models::{
    AvailabilityRecord, CandidateRecord, EventRecord, ResponseRecord, StoredResponse,
};
use datepoll_common::services::{BoxFuture, EventStore, StoreError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Tables {
    events: HashMap<String, EventRecord>,
    candidates: Vec<CandidateRecord>,
    responses: Vec<ResponseRecord>,
    availability: Vec<AvailabilityRecord>,
}

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    tables: Mutex<Tables>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventStore for InMemoryEventStore {
    fn insert_event(&self, event: EventRecord) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            let mut tables = self.tables();
            if tables.events.contains_key(&event.id) {
                return Err(StoreError::Io(format!("duplicate event id {}", event.id)));
            }
            tables.events.insert(event.id.clone(), event);
            Ok(())
        })
    }

    fn insert_candidates(&self, candidates: Vec<CandidateRecord>) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            self.tables().candidates.extend(candidates);
            Ok(())
        })
    }

    fn insert_response(&self, response: ResponseRecord) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            self.tables().responses.push(response);
            Ok(())
        })
    }

    fn update_response(&self, response: ResponseRecord) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            let mut tables = self.tables();
            let existing = tables
                .responses
                .iter_mut()
                .find(|r| r.id == response.id)
                .ok_or_else(|| StoreError::NotFound(format!("response {}", response.id)))?;
            existing.name = response.name;
            existing.comment = response.comment;
            Ok(())
        })
    }

    fn delete_response(&self, response_id: &str) -> BoxFuture<'_, (), StoreError> {
        let response_id = response_id.to_string();
        Box::pin(async move {
            let mut tables = self.tables();
            let before = tables.responses.len();
            tables.responses.retain(|r| r.id != response_id);
            if tables.responses.len() == before {
                return Err(StoreError::NotFound(format!("response {}", response_id)));
            }
            Ok(())
        })
    }

    fn insert_availability(
        &self,
        records: Vec<AvailabilityRecord>,
    ) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            self.tables().availability.extend(records);
            Ok(())
        })
    }

    fn delete_availability(&self, response_id: &str) -> BoxFuture<'_, (), StoreError> {
        let response_id = response_id.to_string();
        Box::pin(async move {
            self.tables()
                .availability
                .retain(|a| a.response_id != response_id);
            Ok(())
        })
    }

    fn fetch_event(&self, event_id: &str) -> BoxFuture<'_, EventRecord, StoreError> {
        let event_id = event_id.to_string();
        Box::pin(async move {
            self.tables()
                .events
                .get(&event_id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(format!("event {}", event_id)))
        })
    }

    fn fetch_candidates(&self, event_id: &str) -> BoxFuture<'_, Vec<CandidateRecord>, StoreError> {
        let event_id = event_id.to_string();
        Box::pin(async move {
            let mut candidates: Vec<CandidateRecord> = self
                .tables()
                .candidates
                .iter()
                .filter(|c| c.event_id == event_id)
                .cloned()
                .collect();
            candidates.sort_by_key(|c| c.sort_position);
            Ok(candidates)
        })
    }

    fn fetch_responses(&self, event_id: &str) -> BoxFuture<'_, Vec<StoredResponse>, StoreError> {
        let event_id = event_id.to_string();
        Box::pin(async move {
            let tables = self.tables();
            let mut responses: Vec<StoredResponse> = tables
                .responses
                .iter()
                .filter(|r| r.event_id == event_id)
                .map(|r| StoredResponse {
                    record: r.clone(),
                    availability: tables
                        .availability
                        .iter()
                        .filter(|a| a.response_id == r.id)
                        .cloned()
                        .collect(),
                })
                .collect();
            responses.sort_by_key(|r| r.record.created_at);
            Ok(responses)
        })
    }
}
