#[cfg(test)]
mod tests {
    use crate::logic::tally;
    use chrono::{TimeZone, Utc};
    use datepoll_common::models::{Availability, DateCandidate, ParticipantResponse};
    use proptest::prelude::*;

    fn candidates(count: usize) -> Vec<DateCandidate> {
        (0..count)
            .map(|i| DateCandidate {
                id: format!("c{}", i),
                event_id: "ev".to_string(),
                label: format!("Slot {}", i),
                sort_position: i as i64,
            })
            .collect()
    }

    fn availability_strategy() -> impl Strategy<Value = Option<Availability>> {
        prop_oneof![
            Just(None),
            Just(Some(Availability::Available)),
            Just(Some(Availability::Maybe)),
            Just(Some(Availability::Unavailable)),
        ]
    }

    // Rows of answers; column i is the answer for candidate "c{i}"
    fn answers_strategy(
        max_candidates: usize,
        max_participants: usize,
    ) -> impl Strategy<Value = (usize, Vec<Vec<Option<Availability>>>)> {
        (1..=max_candidates).prop_flat_map(move |n| {
            (
                Just(n),
                prop::collection::vec(
                    prop::collection::vec(availability_strategy(), n),
                    0..=max_participants,
                ),
            )
        })
    }

    fn participants(rows: &[Vec<Option<Availability>>]) -> Vec<ParticipantResponse> {
        rows.iter()
            .enumerate()
            .map(|(p, row)| ParticipantResponse {
                id: format!("p{}", p),
                name: format!("Participant {}", p),
                comment: String::new(),
                created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
                availability: row
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| v.map(|v| (format!("c{}", i), v)))
                    .collect(),
            })
            .collect()
    }

    proptest! {
        // Counts only include participants who answered
        #[test]
        fn test_counts_never_exceed_answers((n, rows) in answers_strategy(6, 12)) {
            let summary = tally(&candidates(n), &participants(&rows));
            prop_assert_eq!(summary.slots.len(), n);
            for (i, slot) in summary.slots.iter().enumerate() {
                let answered = rows.iter().filter(|row| row[i].is_some()).count() as u32;
                prop_assert_eq!(slot.available + slot.maybe + slot.unavailable, answered);
                prop_assert_eq!(slot.score, 2 * slot.available + slot.maybe);
            }
        }

        // The best set is exactly the slots at a positive maximum
        #[test]
        fn test_best_set_matches_max((n, rows) in answers_strategy(6, 12)) {
            let summary = tally(&candidates(n), &participants(&rows));
            let max = summary.slots.iter().map(|s| s.score).max().unwrap_or(0);
            prop_assert_eq!(summary.max_score, max);
            if max == 0 {
                prop_assert!(summary.best.is_empty());
            } else {
                let expected: Vec<String> = summary
                    .slots
                    .iter()
                    .filter(|s| s.score == max)
                    .map(|s| s.candidate_id.clone())
                    .collect();
                prop_assert_eq!(&summary.best, &expected);
            }
        }

        // Raising one answer never lowers the slot's score
        #[test]
        fn test_score_monotonic(
            (n, rows) in answers_strategy(4, 8),
            pick in any::<prop::sample::Index>(),
            column in any::<prop::sample::Index>(),
        ) {
            prop_assume!(!rows.is_empty());
            let p = pick.index(rows.len());
            let c = column.index(n);
            let before = tally(&candidates(n), &participants(&rows)).slots[c].score;

            let old = rows[p][c];
            let mut upgraded = rows.clone();
            upgraded[p][c] = Some(Availability::Maybe);
            let as_maybe = tally(&candidates(n), &participants(&upgraded)).slots[c].score;
            upgraded[p][c] = Some(Availability::Available);
            let as_available = tally(&candidates(n), &participants(&upgraded)).slots[c].score;

            match old {
                None | Some(Availability::Unavailable) => {
                    prop_assert_eq!(as_maybe, before + 1);
                    prop_assert_eq!(as_available, before + 2);
                }
                Some(Availability::Maybe) => {
                    prop_assert_eq!(as_maybe, before);
                    prop_assert_eq!(as_available, before + 1);
                }
                Some(Availability::Available) => {
                    prop_assert_eq!(as_available, before);
                    prop_assert!(as_maybe < before);
                }
            }
        }
    }
}
