//! Event, date candidate and participant response models.
//!
//! Two families live here: the denormalized [`Event`] handed to clients, and the
//! flat record types ([`EventRecord`], [`CandidateRecord`], [`ResponseRecord`],
//! [`AvailabilityRecord`]) that mirror the three stored record sets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One invitee's answer for one date candidate.
///
/// "No opinion" is modelled as the absence of a value, never as a variant.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Maybe,
    Unavailable,
}

impl Availability {
    /// Weight of this answer in the tally score.
    pub fn score(self) -> u32 {
        match self {
            Availability::Available => 2,
            Availability::Maybe => 1,
            Availability::Unavailable => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Maybe => "maybe",
            Availability::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Availability::Available),
            "maybe" => Ok(Availability::Maybe),
            "unavailable" => Ok(Availability::Unavailable),
            other => Err(format!("unknown availability value: {}", other)),
        }
    }
}

/// Mapping from date-candidate id to the participant's answer.
pub type AvailabilityMap = BTreeMap<String, Availability>;

/// One proposed time slot.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCandidate {
    pub id: String,
    pub event_id: String,
    /// Pre-formatted label such as "Mon 10am"; never parsed.
    pub label: String,
    /// Explicit ordering position within the event.
    pub sort_position: i64,
}

/// One invitee's submitted availability set.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantResponse {
    pub id: String,
    pub name: String,
    pub comment: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub created_at: DateTime<Utc>,
    pub availability: AvailabilityMap,
}

/// The denormalized event: header, ordered candidates and responses.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub memo: String,
    /// Organizer e-mail address for new-response notifications.
    pub contact: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub created_at: DateTime<Utc>,
    pub candidates: Vec<DateCandidate>,
    pub participants: Vec<ParticipantResponse>,
}

impl Event {
    /// Looks up a candidate by id.
    pub fn candidate(&self, candidate_id: &str) -> Option<&DateCandidate> {
        self.candidates.iter().find(|c| c.id == candidate_id)
    }

    /// Looks up a participant response by id.
    pub fn participant(&self, response_id: &str) -> Option<&ParticipantResponse> {
        self.participants.iter().find(|p| p.id == response_id)
    }
}

// --- Stored record sets ---

/// Row of the events table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub memo: String,
    pub contact: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row of the date candidates table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    pub id: String,
    pub event_id: String,
    pub label: String,
    pub sort_position: i64,
}

/// Row of the participant responses table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRecord {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Row of the per-candidate availability table. A `None` value means no opinion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRecord {
    pub response_id: String,
    pub candidate_id: String,
    pub value: Option<Availability>,
}

/// A response row joined with its availability rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResponse {
    pub record: ResponseRecord,
    pub availability: Vec<AvailabilityRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_serializes_lowercase() {
        let json = serde_json::to_string(&Availability::Unavailable).unwrap();
        assert_eq!(json, "\"unavailable\"");
        assert_eq!("maybe".parse::<Availability>(), Ok(Availability::Maybe));
        assert!("perhaps".parse::<Availability>().is_err());
    }

    #[test]
    fn test_scores() {
        assert_eq!(Availability::Available.score(), 2);
        assert_eq!(Availability::Maybe.score(), 1);
        assert_eq!(Availability::Unavailable.score(), 0);
    }
}
