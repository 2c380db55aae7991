//! One-dimensional interval arithmetic along a wall axis.

use std::cmp::Ordering;

use super::CONTAINMENT_EPSILON;

/// A closed interval `(start, end)` with `start <= end`.
pub type Interval = (f64, f64);

/// Returns the overlap of two intervals, or `None` when they share less than
/// [`CONTAINMENT_EPSILON`] of length.
#[must_use]
pub fn overlap(a: Interval, b: Interval) -> Option<Interval> {
    let lo = a.0.max(b.0);
    let hi = a.1.min(b.1);
    (hi - lo > CONTAINMENT_EPSILON).then_some((lo, hi))
}

/// Merges overlapping or touching intervals and returns the sorted union.
pub fn merge_intervals(intervals: &mut [Interval]) -> Vec<Interval> {
    if intervals.is_empty() {
        return Vec::new();
    }
    intervals.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    let mut merged: Vec<Interval> = vec![intervals[0]];
    for &(lo, hi) in &intervals[1..] {
        match merged.last_mut() {
            Some(last) if lo <= last.1 + CONTAINMENT_EPSILON => last.1 = last.1.max(hi),
            _ => merged.push((lo, hi)),
        }
    }
    merged
}

/// Removes every interval in `holes` from `range`.
///
/// Returns the uncovered pieces in ascending order. Pieces shorter than
/// [`CONTAINMENT_EPSILON`] are dropped.
#[must_use]
pub fn subtract_intervals(range: Interval, holes: &[Interval]) -> Vec<Interval> {
    let mut holes = holes.to_vec();
    let holes = merge_intervals(&mut holes);

    let mut pieces = Vec::new();
    let mut cursor = range.0;
    for (lo, hi) in holes {
        if hi <= cursor || lo >= range.1 {
            continue;
        }
        if lo - cursor > CONTAINMENT_EPSILON {
            pieces.push((cursor, lo));
        }
        cursor = cursor.max(hi);
    }
    if range.1 - cursor > CONTAINMENT_EPSILON {
        pieces.push((cursor, range.1));
    }
    pieces
}

/// Returns `true` if `value` lies inside `interval` (inclusive, with slack).
#[must_use]
pub fn contains(interval: Interval, value: f64) -> bool {
    value >= interval.0 - CONTAINMENT_EPSILON && value <= interval.1 + CONTAINMENT_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn merge_touching_and_overlapping() {
        let mut spans = vec![(4.0, 6.0), (0.0, 2.0), (2.0, 3.0), (5.0, 8.0)];
        let merged = merge_intervals(&mut spans);
        assert_eq!(merged.len(), 2);
        assert_abs_diff_eq!(merged[0].1, 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(merged[1].0, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(merged[1].1, 8.0, epsilon = 1e-9);
    }

    #[test]
    fn subtract_middle_hole() {
        let pieces = subtract_intervals((0.0, 10.0), &[(3.0, 5.0)]);
        assert_eq!(pieces, vec![(0.0, 3.0), (5.0, 10.0)]);
    }

    #[test]
    fn subtract_covering_hole_leaves_nothing() {
        assert!(subtract_intervals((2.0, 4.0), &[(0.0, 5.0)]).is_empty());
    }

    #[test]
    fn subtract_holes_outside_range() {
        let pieces = subtract_intervals((0.0, 4.0), &[(-3.0, -1.0), (6.0, 7.0)]);
        assert_eq!(pieces, vec![(0.0, 4.0)]);
    }

    #[test]
    fn overlap_requires_positive_length() {
        assert!(overlap((0.0, 2.0), (2.0, 4.0)).is_none());
        assert_eq!(overlap((0.0, 3.0), (2.0, 4.0)), Some((2.0, 3.0)));
    }
}
