//! Greedy interval-to-lane partitioning within a single group.
//!
//! Classic interval partitioning: processing intervals in non-decreasing
//! start order, each goes into the lowest-indexed lane whose last occupant
//! ends on or before the interval's start. The number of lanes used equals
//! the maximum number of mutually overlapping intervals, which is optimal
//! for interval graph coloring.
//!
//! A lane is transient: it exists only as "the end date of its last
//! occupant" for the duration of one group's computation.

use std::borrow::Borrow;

use chrono::NaiveDate;
use lobboard_core::{BoardError, Interval};

/// Assign each interval to a lane.
///
/// Returns one lane index per interval, in input order. Ties on start date
/// keep input order, so re-renders over identical data are stable.
///
/// Same-day adjacency is not overlap: an interval may start on the exact
/// day the previous occupant of its lane ends.
///
/// # Errors
///
/// All intervals must share one `group_key`; mixing groups is a bug in the
/// caller, not bad data, and fails loudly.
pub fn pack_lanes(intervals: &[Interval]) -> Result<Vec<usize>, BoardError> {
    if let Some(first) = intervals.first() {
        for interval in &intervals[1..] {
            if interval.group_key != first.group_key {
                return Err(BoardError::MixedGroups {
                    expected: first.group_key.clone(),
                    found: interval.group_key.clone(),
                });
            }
        }
    }
    Ok(pack_unchecked(intervals))
}

/// Packing without the single-group check, for callers that bucket
/// intervals by group themselves. Accepts owned or borrowed intervals so
/// per-render bucketing never has to clone.
pub(crate) fn pack_unchecked<T: Borrow<Interval>>(intervals: &[T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by_key(|&i| intervals[i].borrow().start); // stable: input order on ties

    let mut lane_ends: Vec<NaiveDate> = Vec::new();
    let mut assignment = vec![0usize; intervals.len()];

    for &i in &order {
        let interval = intervals[i].borrow();
        let lane = lane_ends
            .iter()
            .position(|&end| end <= interval.start)
            .unwrap_or_else(|| {
                lane_ends.push(interval.end);
                lane_ends.len() - 1
            });
        lane_ends[lane] = interval.end;
        assignment[i] = lane;
    }

    assignment
}

/// Number of lanes used by an assignment.
pub fn lane_count(assignment: &[usize]) -> usize {
    assignment.iter().max().map_or(0, |&max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn interval(id: &str, start: NaiveDate, end: NaiveDate) -> Interval {
        Interval::checked(id, "FLOOR 1", id, start, end).unwrap()
    }

    /// A and B overlap, C starts after A ends and reuses A's lane.
    #[test]
    fn overlapping_pair_then_reuse() {
        let intervals = vec![
            interval("A", date(2026, 1, 1), date(2026, 1, 5)),
            interval("B", date(2026, 1, 3), date(2026, 1, 8)),
            interval("C", date(2026, 1, 6), date(2026, 1, 10)),
        ];
        let lanes = pack_lanes(&intervals).unwrap();
        assert_eq!(lanes, vec![0, 1, 0]);
        assert_eq!(lane_count(&lanes), 2);
    }

    #[test]
    fn same_day_adjacency_reuses_lane() {
        // B starts the exact day A ends: touching, not overlapping
        let intervals = vec![
            interval("A", date(2026, 1, 1), date(2026, 1, 5)),
            interval("B", date(2026, 1, 5), date(2026, 1, 9)),
        ];
        let lanes = pack_lanes(&intervals).unwrap();
        assert_eq!(lanes, vec![0, 0]);
    }

    /// Fully identical spans must split into two lanes.
    #[test]
    fn identical_spans_take_distinct_lanes() {
        let intervals = vec![
            interval("A", date(2026, 1, 1), date(2026, 1, 5)),
            interval("B", date(2026, 1, 1), date(2026, 1, 5)),
        ];
        let lanes = pack_lanes(&intervals).unwrap();
        assert_eq!(lanes, vec![0, 1]);
    }

    #[test]
    fn single_day_interval_occupies_a_lane() {
        let intervals = vec![interval("A", date(2026, 1, 3), date(2026, 1, 3))];
        let lanes = pack_lanes(&intervals).unwrap();
        assert_eq!(lanes, vec![0]);
        assert_eq!(lane_count(&lanes), 1);
    }

    #[test]
    fn zero_length_span_frees_its_lane_same_day() {
        // With end <= start admitting reuse, a zero-length occupant's lane
        // is open again on its own day. Inherited same-day adjacency rule.
        let intervals = vec![
            interval("A", date(2026, 1, 3), date(2026, 1, 3)),
            interval("B", date(2026, 1, 3), date(2026, 1, 3)),
        ];
        let lanes = pack_lanes(&intervals).unwrap();
        assert_eq!(lanes, vec![0, 0]);
    }

    #[test]
    fn unsorted_input_packs_by_start_order() {
        let intervals = vec![
            interval("late", date(2026, 1, 6), date(2026, 1, 10)),
            interval("early", date(2026, 1, 1), date(2026, 1, 5)),
            interval("mid", date(2026, 1, 3), date(2026, 1, 8)),
        ];
        let lanes = pack_lanes(&intervals).unwrap();
        // early -> lane 0, mid -> lane 1, late reuses lane 0 (early ends
        // Jan 5 <= Jan 6)
        assert_eq!(lanes, vec![0, 0, 1]);
    }

    #[test]
    fn equal_starts_keep_input_order() {
        let intervals = vec![
            interval("first", date(2026, 1, 1), date(2026, 1, 4)),
            interval("second", date(2026, 1, 1), date(2026, 1, 9)),
            interval("third", date(2026, 1, 1), date(2026, 1, 2)),
        ];
        let lanes = pack_lanes(&intervals).unwrap();
        assert_eq!(lanes, vec![0, 1, 2]);
    }

    #[test]
    fn packing_borrowed_matches_owned() {
        let intervals = vec![
            interval("A", date(2026, 1, 1), date(2026, 1, 5)),
            interval("B", date(2026, 1, 3), date(2026, 1, 8)),
            interval("C", date(2026, 1, 6), date(2026, 1, 10)),
        ];
        let refs: Vec<&Interval> = intervals.iter().collect();
        assert_eq!(pack_unchecked(&refs), pack_unchecked(&intervals));
    }

    #[test]
    fn empty_input_is_fine() {
        let lanes = pack_lanes(&[]).unwrap();
        assert!(lanes.is_empty());
        assert_eq!(lane_count(&lanes), 0);
    }

    #[test]
    fn mixed_groups_fail_loudly() {
        let a = interval("A", date(2026, 1, 1), date(2026, 1, 5));
        let mut b = interval("B", date(2026, 1, 2), date(2026, 1, 6));
        b.group_key = "FLOOR 2".into();
        let err = pack_lanes(&[a, b]).unwrap_err();
        assert!(matches!(err, BoardError::MixedGroups { .. }));
    }

    /// No-overlap invariant plus lane-count minimality over a denser case.
    #[test]
    fn packing_is_optimal_and_overlap_free() {
        let intervals = vec![
            interval("a", date(2026, 1, 1), date(2026, 1, 10)),
            interval("b", date(2026, 1, 2), date(2026, 1, 4)),
            interval("c", date(2026, 1, 4), date(2026, 1, 7)),
            interval("d", date(2026, 1, 5), date(2026, 1, 6)),
            interval("e", date(2026, 1, 8), date(2026, 1, 12)),
            interval("f", date(2026, 1, 11), date(2026, 1, 15)),
        ];
        let lanes = pack_lanes(&intervals).unwrap();

        // No two intervals in the same lane may share a day
        for i in 0..intervals.len() {
            for j in (i + 1)..intervals.len() {
                if lanes[i] == lanes[j] {
                    let (a, b) = (&intervals[i], &intervals[j]);
                    assert!(
                        a.end <= b.start || b.end <= a.start,
                        "{} and {} overlap in lane {}",
                        a.id,
                        b.id,
                        lanes[i]
                    );
                }
            }
        }

        // Lane count equals the maximum number of intervals alive at any
        // single day (sampling every day of the range)
        let mut max_alive = 0usize;
        let mut day = date(2026, 1, 1);
        while day <= date(2026, 1, 15) {
            let alive = intervals
                .iter()
                .filter(|iv| iv.start <= day && day < iv.end)
                .count();
            max_alive = max_alive.max(alive);
            day = day + chrono::Days::new(1);
        }
        assert_eq!(lane_count(&lanes), max_alive);
    }
}
