//! Unit leaderboard computation.
//!
//! Ranks every user who completed at least one assignment in scope by the
//! average time between an assignment being published and the user marking
//! it complete. Smaller average latency ranks higher.
//!
//! The functions here are pure: callers fetch the assignment and completion
//! snapshots (see `classroom-db`) and pass them in. The same computation over
//! all units yields the overall leaderboard.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// Number of most-recent completions carried on each [`RankingEntry`].
pub const RECENT_COMPLETIONS_LIMIT: usize = 3;

// ---------------------------------------------------------------------------
// Input records
// ---------------------------------------------------------------------------

/// An assignment as seen by the ranking computation.
#[derive(Debug, Clone)]
pub struct AssignmentRecord {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
}

/// A completion joined with the completing user's display fields.
#[derive(Debug, Clone)]
pub struct CompletionRecord {
    pub user_id: DbId,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub assignment_id: DbId,
    pub completed_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Output records
// ---------------------------------------------------------------------------

/// One completion shown on a leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentCompletion {
    pub assignment_id: DbId,
    pub title: String,
    pub completed_at: Timestamp,
    /// Time from assignment creation to this completion.
    pub latency_ms: i64,
}

/// One user's standing on a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    /// 1-based; contiguous across the result even when averages tie.
    pub position: u32,
    pub user_id: DbId,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub completion_count: u32,
    /// Sum of per-completion latencies, saturating at `i64::MAX`.
    pub total_latency_ms: i64,
    /// `total_latency_ms / completion_count`, truncated.
    pub average_latency_ms: i64,
    /// Newest first, at most [`RECENT_COMPLETIONS_LIMIT`] items.
    pub recent_completions: Vec<RecentCompletion>,
}

/// Result of a ranking computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnitRankings {
    pub entries: Vec<RankingEntry>,
    /// Completions skipped because their assignment was not in the snapshot.
    pub unresolved_completions: usize,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Per-user running state while grouping completions.
#[derive(Debug)]
struct UserAccumulator {
    user_name: String,
    user_avatar: Option<String>,
    completions: Vec<RecentCompletion>,
    total_latency_ms: i64,
}

impl UserAccumulator {
    fn new(record: &CompletionRecord) -> Self {
        Self {
            user_name: record.user_name.clone(),
            user_avatar: record.user_avatar.clone(),
            completions: Vec::new(),
            total_latency_ms: 0,
        }
    }

    /// The running total saturates at `i64::MAX` instead of overflowing.
    fn push(&mut self, completion: RecentCompletion) {
        self.total_latency_ms = self.total_latency_ms.saturating_add(completion.latency_ms);
        self.completions.push(completion);
    }

    fn into_entry(mut self, user_id: DbId) -> RankingEntry {
        let count = self.completions.len();

        self.completions.sort_by(|a, b| {
            b.completed_at
                .cmp(&a.completed_at)
                .then(a.assignment_id.cmp(&b.assignment_id))
        });
        self.completions.truncate(RECENT_COMPLETIONS_LIMIT);

        RankingEntry {
            position: 0,
            user_id,
            user_name: self.user_name,
            user_avatar: self.user_avatar,
            completion_count: count as u32,
            total_latency_ms: self.total_latency_ms,
            average_latency_ms: self.total_latency_ms / count as i64,
            recent_completions: self.completions,
        }
    }
}

/// Milliseconds between assignment creation and completion, floored at zero.
pub fn completion_latency_ms(created_at: Timestamp, completed_at: Timestamp) -> i64 {
    (completed_at - created_at).num_milliseconds().max(0)
}

/// Compute the leaderboard for one snapshot of assignments and completions.
///
/// Completions referencing an assignment absent from `assignments` are
/// dropped and counted in [`UnitRankings::unresolved_completions`]. Entries
/// are ordered by exact average latency ascending, ties broken by ascending
/// user id, and numbered from 1.
pub fn compute_rankings(
    assignments: &[AssignmentRecord],
    completions: &[CompletionRecord],
) -> UnitRankings {
    if assignments.is_empty() {
        return UnitRankings::default();
    }

    let by_id: HashMap<DbId, &AssignmentRecord> =
        assignments.iter().map(|a| (a.id, a)).collect();

    let mut groups: BTreeMap<DbId, UserAccumulator> = BTreeMap::new();
    let mut unresolved = 0usize;

    for record in completions {
        let Some(assignment) = by_id.get(&record.assignment_id) else {
            unresolved += 1;
            continue;
        };

        groups
            .entry(record.user_id)
            .or_insert_with(|| UserAccumulator::new(record))
            .push(RecentCompletion {
                assignment_id: assignment.id,
                title: assignment.title.clone(),
                completed_at: record.completed_at,
                latency_ms: completion_latency_ms(assignment.created_at, record.completed_at),
            });
    }

    let mut entries: Vec<RankingEntry> = groups
        .into_iter()
        .map(|(user_id, acc)| acc.into_entry(user_id))
        .collect();

    entries.sort_by(compare_entries);

    for (index, entry) in entries.iter_mut().enumerate() {
        entry.position = index as u32 + 1;
    }

    UnitRankings {
        entries,
        unresolved_completions: unresolved,
    }
}

/// Order by `total / count` without truncation, then by user id.
fn compare_entries(a: &RankingEntry, b: &RankingEntry) -> Ordering {
    let lhs = a.total_latency_ms as i128 * b.completion_count as i128;
    let rhs = b.total_latency_ms as i128 * a.completion_count as i128;
    lhs.cmp(&rhs).then(a.user_id.cmp(&b.user_id))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
    }

    fn assignment(id: DbId, created_at: Timestamp) -> AssignmentRecord {
        AssignmentRecord {
            id,
            title: format!("Assignment {id}"),
            created_at,
        }
    }

    fn completion(user_id: DbId, assignment_id: DbId, completed_at: Timestamp) -> CompletionRecord {
        CompletionRecord {
            user_id,
            user_name: format!("user-{user_id}"),
            user_avatar: None,
            assignment_id,
            completed_at,
        }
    }

    const HOUR_MS: i64 = 3_600_000;

    // -- Scenarios ---------------------------------------------------------

    #[test]
    fn single_user_averages_two_latencies() {
        let assignments = vec![
            assignment(1, t0()),
            assignment(2, t0() + Duration::hours(1)),
        ];
        let completions = vec![
            completion(7, 1, t0() + Duration::hours(2)),
            completion(7, 2, t0() + Duration::minutes(90)),
        ];

        let result = compute_rankings(&assignments, &completions);

        assert_eq!(result.entries.len(), 1);
        let entry = &result.entries[0];
        assert_eq!(entry.user_id, 7);
        assert_eq!(entry.position, 1);
        assert_eq!(entry.completion_count, 2);
        assert_eq!(entry.average_latency_ms, HOUR_MS + 15 * 60_000);
        assert_eq!(result.unresolved_completions, 0);
    }

    #[test]
    fn faster_user_ranks_first() {
        let assignments = vec![assignment(1, t0()), assignment(2, t0())];
        let completions = vec![
            completion(20, 1, t0() + Duration::hours(2)),
            completion(20, 2, t0() + Duration::hours(2)),
            completion(10, 1, t0() + Duration::hours(1)),
            completion(10, 2, t0() + Duration::hours(1)),
        ];

        let result = compute_rankings(&assignments, &completions);

        let order: Vec<(DbId, u32)> = result
            .entries
            .iter()
            .map(|e| (e.user_id, e.position))
            .collect();
        assert_eq!(order, vec![(10, 1), (20, 2)]);
        assert_eq!(result.entries[0].average_latency_ms, HOUR_MS);
        assert_eq!(result.entries[1].average_latency_ms, 2 * HOUR_MS);
    }

    #[test]
    fn assignments_without_completions_yield_empty() {
        let assignments = vec![assignment(1, t0()), assignment(2, t0())];
        let result = compute_rankings(&assignments, &[]);
        assert!(result.entries.is_empty());
        assert_eq!(result.unresolved_completions, 0);
    }

    #[test]
    fn unresolved_completion_is_dropped() {
        let assignments = vec![assignment(1, t0())];
        let completions = vec![
            completion(1, 1, t0() + Duration::hours(1)),
            completion(2, 99, t0() + Duration::hours(1)),
            completion(3, 1, t0() + Duration::hours(3)),
        ];

        let result = compute_rankings(&assignments, &completions);

        let users: Vec<DbId> = result.entries.iter().map(|e| e.user_id).collect();
        assert_eq!(users, vec![1, 3]);
        assert_eq!(result.unresolved_completions, 1);
        assert_eq!(result.entries[1].average_latency_ms, 3 * HOUR_MS);
    }

    #[test]
    fn user_with_only_unresolved_completions_is_absent() {
        let assignments = vec![assignment(1, t0())];
        let completions = vec![completion(5, 2, t0()), completion(5, 3, t0())];

        let result = compute_rankings(&assignments, &completions);

        assert!(result.entries.is_empty());
        assert_eq!(result.unresolved_completions, 2);
    }

    #[test]
    fn empty_assignment_set_short_circuits() {
        let completions = vec![completion(1, 1, t0())];
        let result = compute_rankings(&[], &completions);
        assert!(result.entries.is_empty());
        assert_eq!(result.unresolved_completions, 0);
    }

    // -- Ordering and positions -------------------------------------------

    #[test]
    fn equal_averages_break_ties_by_user_id() {
        let assignments = vec![assignment(1, t0())];
        let completions = vec![
            completion(30, 1, t0() + Duration::hours(1)),
            completion(4, 1, t0() + Duration::hours(1)),
            completion(17, 1, t0() + Duration::hours(1)),
        ];

        let result = compute_rankings(&assignments, &completions);

        let order: Vec<(DbId, u32)> = result
            .entries
            .iter()
            .map(|e| (e.user_id, e.position))
            .collect();
        assert_eq!(order, vec![(4, 1), (17, 2), (30, 3)]);
    }

    #[test]
    fn truncation_does_not_reorder_distinct_averages() {
        // User 1: (1 + 2) / 2 = 1.5ms, truncated to 1.
        // User 2: (1 + 1 + 2) / 3 = 1.33ms, truncated to 1.
        // Exact comparison must put user 2 first despite the larger id.
        let assignments = vec![assignment(1, t0()), assignment(2, t0()), assignment(3, t0())];
        let ms = Duration::milliseconds;
        let completions = vec![
            completion(1, 1, t0() + ms(1)),
            completion(1, 2, t0() + ms(2)),
            completion(2, 1, t0() + ms(1)),
            completion(2, 2, t0() + ms(1)),
            completion(2, 3, t0() + ms(2)),
        ];

        let result = compute_rankings(&assignments, &completions);

        let users: Vec<DbId> = result.entries.iter().map(|e| e.user_id).collect();
        assert_eq!(users, vec![2, 1]);
        assert_eq!(result.entries[0].average_latency_ms, 1);
        assert_eq!(result.entries[1].average_latency_ms, 1);
    }

    #[test]
    fn results_are_sorted_with_contiguous_positions() {
        let assignments: Vec<_> = (1..=4).map(|id| assignment(id, t0())).collect();
        let mut completions = Vec::new();
        for user in 1..=6_i64 {
            for a in 1..=(user % 4 + 1) {
                let minutes = (user * 37 + a * 11) % 300;
                completions.push(completion(user, a, t0() + Duration::minutes(minutes)));
            }
        }

        let result = compute_rankings(&assignments, &completions);

        assert_eq!(result.entries.len(), 6);
        for pair in result.entries.windows(2) {
            assert!(pair[0].average_latency_ms <= pair[1].average_latency_ms);
        }
        for (i, entry) in result.entries.iter().enumerate() {
            assert_eq!(entry.position as usize, i + 1);
        }
    }

    // -- Latency -----------------------------------------------------------

    #[test]
    fn average_is_exact_integer_mean() {
        let assignments = vec![assignment(1, t0()), assignment(2, t0()), assignment(3, t0())];
        let completions = vec![
            completion(1, 1, t0() + Duration::milliseconds(1_000)),
            completion(1, 2, t0() + Duration::milliseconds(2_000)),
            completion(1, 3, t0() + Duration::milliseconds(6_000)),
        ];

        let entry = &compute_rankings(&assignments, &completions).entries[0];

        assert_eq!(entry.total_latency_ms, 9_000);
        assert_eq!(entry.average_latency_ms, 3_000);
    }

    #[test]
    fn completion_before_creation_counts_as_zero() {
        let assignments = vec![assignment(1, t0())];
        let completions = vec![completion(1, 1, t0() - Duration::minutes(5))];

        let entry = &compute_rankings(&assignments, &completions).entries[0];

        assert_eq!(entry.average_latency_ms, 0);
        assert_eq!(entry.recent_completions[0].latency_ms, 0);
    }

    // -- Recent completions ------------------------------------------------

    #[test]
    fn recent_completions_capped_and_newest_first() {
        let assignments: Vec<_> = (1..=5).map(|id| assignment(id, t0())).collect();
        let completions: Vec<_> = (1..=5)
            .map(|id| completion(1, id, t0() + Duration::hours(id)))
            .collect();

        let entry = &compute_rankings(&assignments, &completions).entries[0];

        assert_eq!(entry.completion_count, 5);
        let recent: Vec<DbId> = entry
            .recent_completions
            .iter()
            .map(|c| c.assignment_id)
            .collect();
        assert_eq!(recent, vec![5, 4, 3]);
        assert_eq!(entry.recent_completions[0].latency_ms, 5 * HOUR_MS);
        assert_eq!(entry.recent_completions[0].title, "Assignment 5");
    }

    #[test]
    fn recent_completions_sharing_a_timestamp_order_by_assignment_id() {
        let assignments: Vec<_> = (1..=4).map(|id| assignment(id, t0())).collect();
        let same_moment = t0() + Duration::hours(3);
        let completions = vec![
            completion(1, 4, same_moment),
            completion(1, 2, same_moment),
            completion(1, 3, same_moment),
            completion(1, 1, t0() + Duration::hours(1)),
        ];

        let entry = &compute_rankings(&assignments, &completions).entries[0];

        let recent: Vec<DbId> = entry
            .recent_completions
            .iter()
            .map(|c| c.assignment_id)
            .collect();
        assert_eq!(recent, vec![2, 3, 4]);
    }

    #[test]
    fn recent_completions_shorter_than_cap() {
        let assignments = vec![assignment(1, t0()), assignment(2, t0())];
        let completions = vec![
            completion(1, 1, t0() + Duration::hours(1)),
            completion(1, 2, t0() + Duration::hours(2)),
        ];

        let entry = &compute_rankings(&assignments, &completions).entries[0];

        assert_eq!(entry.recent_completions.len(), 2);
    }

    #[test]
    fn total_latency_saturates_instead_of_overflowing() {
        let record = completion(1, 1, t0());
        let mut acc = UserAccumulator::new(&record);
        for assignment_id in 1..=2 {
            acc.push(RecentCompletion {
                assignment_id,
                title: format!("Assignment {assignment_id}"),
                completed_at: t0(),
                latency_ms: i64::MAX,
            });
        }

        let entry = acc.into_entry(1);

        assert_eq!(entry.total_latency_ms, i64::MAX);
        assert_eq!(entry.average_latency_ms, i64::MAX / 2);
    }

    #[test]
    fn display_fields_come_from_first_completion() {
        let assignments = vec![assignment(1, t0())];
        let mut record = completion(3, 1, t0() + Duration::hours(1));
        record.user_name = "Ada".into();
        record.user_avatar = Some("avatars/ada.png".into());

        let entry = &compute_rankings(&assignments, &[record]).entries[0];

        assert_eq!(entry.user_name, "Ada");
        assert_eq!(entry.user_avatar.as_deref(), Some("avatars/ada.png"));
    }

    #[test]
    fn serializes_timestamps_as_rfc3339() {
        let assignments = vec![assignment(1, t0())];
        let completions = vec![completion(1, 1, t0() + Duration::hours(1))];

        let result = compute_rankings(&assignments, &completions);
        let json = serde_json::to_value(&result.entries[0]).unwrap();

        assert_eq!(
            json["recent_completions"][0]["completed_at"],
            "2026-03-02T10:00:00Z"
        );
        assert_eq!(json["average_latency_ms"], HOUR_MS);
    }
}
