//! Availability tally engine.
//!
//! Scores every date candidate from the participants' answers:
//! `available` counts 2, `maybe` counts 1, `unavailable` and no answer count 0.

use datepoll_common::models::{Availability, DateCandidate, Event, ParticipantResponse};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-candidate counts and score.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTally {
    pub candidate_id: String,
    pub label: String,
    pub available: u32,
    pub maybe: u32,
    pub unavailable: u32,
    pub score: u32,
}

impl SlotTally {
    fn empty(candidate: &DateCandidate) -> Self {
        Self {
            candidate_id: candidate.id.clone(),
            label: candidate.label.clone(),
            available: 0,
            maybe: 0,
            unavailable: 0,
            score: 0,
        }
    }

    fn count(&mut self, value: Availability) {
        match value {
            Availability::Available => self.available += 1,
            Availability::Maybe => self.maybe += 1,
            Availability::Unavailable => self.unavailable += 1,
        }
        self.score += value.score();
    }
}

/// Tally of a whole event.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallySummary {
    /// One entry per candidate, in candidate order.
    pub slots: Vec<SlotTally>,
    /// Ids of every candidate reaching the maximum score; empty when it is 0.
    pub best: Vec<String>,
    pub max_score: u32,
}

impl TallySummary {
    pub fn is_best(&self, candidate_id: &str) -> bool {
        self.best.iter().any(|id| id == candidate_id)
    }
}

/// Tally `participants` over `candidates`.
///
/// Candidates nobody answered still get an all-zero entry. Answers for ids
/// that are not in `candidates` are ignored.
pub fn tally(candidates: &[DateCandidate], participants: &[ParticipantResponse]) -> TallySummary {
    let mut slots: Vec<SlotTally> = candidates.iter().map(SlotTally::empty).collect();
    let index: HashMap<&str, usize> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id.as_str(), i))
        .collect();

    for participant in participants {
        for (candidate_id, value) in &participant.availability {
            if let Some(&i) = index.get(candidate_id.as_str()) {
                slots[i].count(*value);
            }
        }
    }

    let max_score = slots.iter().map(|s| s.score).max().unwrap_or(0);
    let best = if max_score == 0 {
        Vec::new()
    } else {
        slots
            .iter()
            .filter(|s| s.score == max_score)
            .map(|s| s.candidate_id.clone())
            .collect()
    };

    TallySummary {
        slots,
        best,
        max_score,
    }
}

pub fn tally_event(event: &Event) -> TallySummary {
    tally(&event.candidates, &event.participants)
}
