//! Event service: every event operation, from validation through the store
//! round trips to the cache and the last-error slot.

use chrono::Utc;
use datepoll_common::error::{internal_error, validation_error, DatepollError};
use datepoll_common::models::{
    Availability, AvailabilityRecord, CandidateRecord, Event, EventRecord, ResponseRecord,
};
use datepoll_common::services::{
    EventStore, LinkShortener, NewResponseNotice, NotificationService, ServiceFactory, StoreError,
};
use datepoll_notify::{dispatch_new_response, shorten_or_original};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::assemble;
use crate::cache::{EventCache, LastError};
use crate::link;
use crate::logic::{tally_event, TallySummary};

/// Request body for creating an event.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(default)]
    pub memo: String,
    /// Organizer e-mail address; enables new-response notifications.
    #[serde(default)]
    pub contact: Option<String>,
    /// Candidate labels in display order.
    pub candidates: Vec<String>,
}

/// Request body for adding or replacing a response.
///
/// A `null` availability value is accepted and means no opinion.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResponseInput {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub availability: BTreeMap<String, Option<Availability>>,
}

/// Links to an event.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLinks {
    pub view: String,
    pub respond: String,
}

/// An event together with its tally and links.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    pub event: Event,
    pub tally: TallySummary,
    pub links: EventLinks,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    pub url: String,
    /// Whether `url` came back from the shortener.
    pub shortened: bool,
}

fn trimmed_non_empty(value: &str, field: &str) -> Result<String, DatepollError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(validation_error(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

fn availability_records(response_id: &str, input: &ResponseInput) -> Vec<AvailabilityRecord> {
    input
        .availability
        .iter()
        .map(|(candidate_id, value)| AvailabilityRecord {
            response_id: response_id.to_string(),
            candidate_id: candidate_id.clone(),
            value: *value,
        })
        .collect()
}

pub struct EventService {
    store: Arc<dyn EventStore>,
    cache: Arc<EventCache>,
    last_error: Arc<LastError>,
    notifier: Option<Arc<dyn NotificationService>>,
    shortener: Option<Arc<dyn LinkShortener>>,
    base_url: String,
}

impl EventService {
    pub fn new(
        store: Arc<dyn EventStore>,
        cache: Arc<EventCache>,
        last_error: Arc<LastError>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            cache,
            last_error,
            notifier: None,
            shortener: None,
            base_url: base_url.into(),
        }
    }

    /// Build a service with fresh cache and error slot from a service factory.
    pub fn from_factory(factory: &dyn ServiceFactory, base_url: impl Into<String>) -> Self {
        let mut service = Self::new(
            factory.event_store(),
            Arc::new(EventCache::new()),
            Arc::new(LastError::new()),
            base_url,
        );
        service.notifier = factory.notification_service();
        service.shortener = factory.link_shortener();
        service
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationService>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_shortener(mut self, shortener: Arc<dyn LinkShortener>) -> Self {
        self.shortener = Some(shortener);
        self
    }

    pub fn cache(&self) -> &EventCache {
        &self.cache
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Message of the most recent transient failure, if the last operation failed.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.get()
    }

    /// Record the outcome of an operation in the last-error slot.
    fn finish<T>(
        &self,
        operation: &str,
        result: Result<T, DatepollError>,
    ) -> Result<T, DatepollError> {
        if let Err(e) = &result {
            if e.is_transient() {
                error!("{} failed: {}", operation, e);
                self.last_error.set(e.to_string());
            } else {
                debug!("{} rejected: {}", operation, e);
            }
        }
        result
    }

    /// Fetch an event from the store and replace its cache entry.
    ///
    /// `Ok(None)` when the event doesn't exist.
    pub async fn refresh(&self, event_id: &str) -> Result<Option<Event>, DatepollError> {
        self.last_error.clear();
        let result = self.fetch_and_cache(event_id).await;
        self.finish("refresh", result)
    }

    async fn fetch_and_cache(&self, event_id: &str) -> Result<Option<Event>, DatepollError> {
        let fetched = assemble::fetch_event(self.store.as_ref(), event_id).await?;
        if let Some(event) = &fetched {
            self.cache.upsert(event.clone());
        }
        Ok(fetched)
    }

    /// Cached copy of an event; never touches the store.
    pub fn cached_event(&self, event_id: &str) -> Option<Event> {
        self.cache.get(event_id)
    }

    /// Create an event with its candidates in the given order.
    pub async fn create_event(&self, new_event: NewEvent) -> Result<Event, DatepollError> {
        self.last_error.clear();
        let result = self.create_event_inner(new_event).await;
        self.finish("create_event", result)
    }

    async fn create_event_inner(&self, new_event: NewEvent) -> Result<Event, DatepollError> {
        let title = trimmed_non_empty(&new_event.title, "title")?;
        if new_event.candidates.is_empty() {
            return Err(validation_error("at least one date candidate is required"));
        }
        let labels = new_event
            .candidates
            .iter()
            .map(|label| trimmed_non_empty(label, "candidate label"))
            .collect::<Result<Vec<_>, _>>()?;
        let contact = new_event
            .contact
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let event_id = Uuid::new_v4().to_string();
        let header = EventRecord {
            id: event_id.clone(),
            title,
            memo: new_event.memo,
            contact,
            created_at: Utc::now(),
        };
        let candidates = labels
            .into_iter()
            .zip(0i64..)
            .map(|(label, position)| CandidateRecord {
                id: Uuid::new_v4().to_string(),
                event_id: event_id.clone(),
                label,
                sort_position: position,
            })
            .collect();

        self.store.insert_event(header).await?;
        self.store.insert_candidates(candidates).await?;
        info!("Created event {}", event_id);

        self.fetch_and_cache(&event_id)
            .await?
            .ok_or_else(|| internal_error(format!("event {} vanished after creation", event_id)))
    }

    /// Add a response and tell the organizer about it.
    ///
    /// `Ok(None)` when the event doesn't exist.
    pub async fn add_response(
        &self,
        event_id: &str,
        input: ResponseInput,
    ) -> Result<Option<Event>, DatepollError> {
        self.last_error.clear();
        let result = self.add_response_inner(event_id, input).await;
        self.finish("add_response", result)
    }

    async fn add_response_inner(
        &self,
        event_id: &str,
        input: ResponseInput,
    ) -> Result<Option<Event>, DatepollError> {
        let name = trimmed_non_empty(&input.name, "name")?;
        let header = match self.store.fetch_event(event_id).await {
            Ok(header) => header,
            Err(StoreError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let response_id = Uuid::new_v4().to_string();
        let record = ResponseRecord {
            id: response_id.clone(),
            event_id: event_id.to_string(),
            name: name.clone(),
            comment: input.comment.clone(),
            created_at: Utc::now(),
        };
        self.store.insert_response(record).await?;
        self.store
            .insert_availability(availability_records(&response_id, &input))
            .await?;
        info!("Added response {} to event {}", response_id, event_id);

        if let (Some(notifier), Some(contact)) = (&self.notifier, &header.contact) {
            dispatch_new_response(
                notifier.clone(),
                NewResponseNotice {
                    to: contact.clone(),
                    event_title: header.title.clone(),
                    participant_name: name,
                    event_url: link::event_link(&self.base_url, event_id, false),
                },
            );
        }

        self.fetch_and_cache(event_id).await
    }

    /// Replace name, comment and availability of a response.
    ///
    /// `Ok(None)` when the event doesn't exist or has no such response.
    pub async fn update_response(
        &self,
        event_id: &str,
        response_id: &str,
        input: ResponseInput,
    ) -> Result<Option<Event>, DatepollError> {
        self.last_error.clear();
        let result = self.update_response_inner(event_id, response_id, input).await;
        self.finish("update_response", result)
    }

    async fn update_response_inner(
        &self,
        event_id: &str,
        response_id: &str,
        input: ResponseInput,
    ) -> Result<Option<Event>, DatepollError> {
        let name = trimmed_non_empty(&input.name, "name")?;
        let Some(created_at) = self.existing_response(event_id, response_id).await? else {
            return Ok(None);
        };

        let record = ResponseRecord {
            id: response_id.to_string(),
            event_id: event_id.to_string(),
            name,
            comment: input.comment.clone(),
            created_at,
        };
        self.store.update_response(record).await?;
        self.store.delete_availability(response_id).await?;
        self.store
            .insert_availability(availability_records(response_id, &input))
            .await?;
        info!("Updated response {} of event {}", response_id, event_id);

        self.fetch_and_cache(event_id).await
    }

    /// Delete a response and its availability.
    ///
    /// `Ok(None)` when the event doesn't exist or has no such response.
    pub async fn delete_response(
        &self,
        event_id: &str,
        response_id: &str,
    ) -> Result<Option<Event>, DatepollError> {
        self.last_error.clear();
        let result = self.delete_response_inner(event_id, response_id).await;
        self.finish("delete_response", result)
    }

    async fn delete_response_inner(
        &self,
        event_id: &str,
        response_id: &str,
    ) -> Result<Option<Event>, DatepollError> {
        if self.existing_response(event_id, response_id).await?.is_none() {
            return Ok(None);
        }

        self.store.delete_availability(response_id).await?;
        self.store.delete_response(response_id).await?;
        info!("Deleted response {} of event {}", response_id, event_id);

        self.fetch_and_cache(event_id).await
    }

    /// Creation time of `response_id` if it belongs to `event_id`.
    async fn existing_response(
        &self,
        event_id: &str,
        response_id: &str,
    ) -> Result<Option<chrono::DateTime<Utc>>, DatepollError> {
        let event = assemble::fetch_event(self.store.as_ref(), event_id).await?;
        Ok(event
            .as_ref()
            .and_then(|e| e.participant(response_id))
            .map(|p| p.created_at))
    }

    /// Cached event, or a fresh fetch when it isn't cached yet.
    async fn cached_or_fetched(&self, event_id: &str) -> Result<Option<Event>, DatepollError> {
        match self.cache.get(event_id) {
            Some(event) => Ok(Some(event)),
            None => self.fetch_and_cache(event_id).await,
        }
    }

    /// Identifier link to an event, optionally shortened.
    pub async fn share_link(
        &self,
        event_id: &str,
        respond: bool,
        shorten: bool,
    ) -> Result<Option<ShareLink>, DatepollError> {
        self.last_error.clear();
        let result = match self.cached_or_fetched(event_id).await {
            Ok(Some(_)) => {
                let url = link::event_link(&self.base_url, event_id, respond);
                if shorten {
                    let short = shorten_or_original(self.shortener.as_deref(), &url).await;
                    let shortened = short != url;
                    Ok(Some(ShareLink {
                        url: short,
                        shortened,
                    }))
                } else {
                    Ok(Some(ShareLink {
                        url,
                        shortened: false,
                    }))
                }
            }
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        };
        self.finish("share_link", result)
    }

    /// Self-contained snapshot link of an event.
    pub async fn snapshot_link(&self, event_id: &str) -> Result<Option<String>, DatepollError> {
        self.last_error.clear();
        let result = self
            .cached_or_fetched(event_id)
            .await
            .map(|event| event.map(|e| link::snapshot_link(&self.base_url, &e)));
        self.finish("snapshot_link", result)
    }

    /// Decode a snapshot payload or link. Malformed input yields `None`.
    pub fn decode_snapshot(&self, text: &str) -> Option<Event> {
        link::decode_snapshot(text)
    }

    /// Tally and links for an event.
    pub fn details(&self, event: Event) -> EventDetails {
        let links = EventLinks {
            view: link::event_link(&self.base_url, &event.id, false),
            respond: link::event_link(&self.base_url, &event.id, true),
        };
        EventDetails {
            tally: tally_event(&event),
            links,
            event,
        }
    }
}
