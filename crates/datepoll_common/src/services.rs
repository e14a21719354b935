//! Service abstractions for the event store and external collaborators.
//!
//! These traits decouple the event logic from the concrete SQL store and the
//! third-party HTTP services, so each can be swapped for an in-memory or mock
//! implementation in tests.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{AvailabilityRecord, CandidateRecord, EventRecord, ResponseRecord, StoredResponse};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// Failures reported by an [`EventStore`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A single-row lookup, update or delete by identifier found nothing.
    #[error("not found: {0}")]
    NotFound(String),
    /// Any other store failure.
    #[error("{0}")]
    Io(String),
}

/// The remote event store: three related record sets accessed with CRUD calls.
pub trait EventStore: Send + Sync {
    /// Insert an event header.
    fn insert_event(&self, event: EventRecord) -> BoxFuture<'_, (), StoreError>;

    /// Insert the date candidates of an event.
    fn insert_candidates(&self, candidates: Vec<CandidateRecord>) -> BoxFuture<'_, (), StoreError>;

    /// Insert a participant response header.
    fn insert_response(&self, response: ResponseRecord) -> BoxFuture<'_, (), StoreError>;

    /// Replace name and comment of an existing response.
    fn update_response(&self, response: ResponseRecord) -> BoxFuture<'_, (), StoreError>;

    /// Delete a response header.
    fn delete_response(&self, response_id: &str) -> BoxFuture<'_, (), StoreError>;

    /// Insert per-candidate availability rows.
    fn insert_availability(
        &self,
        records: Vec<AvailabilityRecord>,
    ) -> BoxFuture<'_, (), StoreError>;

    /// Delete every availability row of a response.
    fn delete_availability(&self, response_id: &str) -> BoxFuture<'_, (), StoreError>;

    /// Fetch an event header by identifier.
    fn fetch_event(&self, event_id: &str) -> BoxFuture<'_, EventRecord, StoreError>;

    /// Fetch the candidates of an event, ordered by stored sort position.
    fn fetch_candidates(&self, event_id: &str) -> BoxFuture<'_, Vec<CandidateRecord>, StoreError>;

    /// Fetch the responses of an event ordered by creation time, joined with availability.
    fn fetch_responses(&self, event_id: &str) -> BoxFuture<'_, Vec<StoredResponse>, StoreError>;
}

/// Payload of the "new response" notification sent to the organizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResponseNotice {
    /// Organizer contact address.
    pub to: String,
    pub event_title: String,
    pub participant_name: String,
    /// Link back to the event.
    pub event_url: String,
}

/// A notification relay that can tell an organizer about new responses.
pub trait NotificationService: Send + Sync {
    /// Notify the organizer of a new response.
    fn notify_new_response(&self, notice: NewResponseNotice) -> BoxFuture<'_, (), BoxedError>;
}

/// A link-shortening service.
pub trait LinkShortener: Send + Sync {
    /// Shorten a URL.
    fn shorten(&self, url: &str) -> BoxFuture<'_, String, BoxedError>;
}

/// A factory for creating service instances.
///
/// The backend builds one of these from the configuration and hands the
/// services to the event routes.
pub trait ServiceFactory: Send + Sync {
    /// The event store; always available.
    fn event_store(&self) -> Arc<dyn EventStore>;

    /// The notification relay, when enabled.
    fn notification_service(&self) -> Option<Arc<dyn NotificationService>>;

    /// The link shortener, when enabled.
    fn link_shortener(&self) -> Option<Arc<dyn LinkShortener>>;
}
