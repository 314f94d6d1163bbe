//! Weather sampling strategy.
//!
//! Weather is fetched for a sparse set of waypoints and spread over the
//! denser set of legs by proportional index, without re-querying per leg.

use crate::models::Coordinate;

/// Pick the weather sample for a leg by proportional position.
///
/// `floor(leg_index / leg_count · sample_count)`, clamped to the last sample.
/// Returns `None` when there are no samples.
pub fn sample_index(leg_index: usize, leg_count: usize, sample_count: usize) -> Option<usize> {
    if sample_count == 0 {
        return None;
    }
    if leg_count == 0 {
        return Some(0);
    }
    // Integer form of the floor; avoids float drift on exact multiples.
    let index = leg_index.saturating_mul(sample_count) / leg_count;
    Some(index.min(sample_count - 1))
}

/// Waypoints to fetch weather for: every `stride`-th one, at most `max_samples`.
pub fn sample_waypoints(waypoints: &[Coordinate], stride: usize, max_samples: usize) -> Vec<Coordinate> {
    let stride = stride.max(1);
    waypoints
        .iter()
        .step_by(stride)
        .take(max_samples)
        .copied()
        .collect()
}
