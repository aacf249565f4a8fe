//! Marker budgeting with regional balance.
//!
//! When clustering still leaves more markers than the zoom tier allows, the
//! markers are bucketed into coarse regions and each region gets an equal
//! share of the budget (the first regions seen absorb the remainder, one
//! slot each). Within a region the most recent markers win.
//!
//! Slots a small region cannot fill are not handed to other regions, so the
//! result can fall short of the budget.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use hazard_types::Marker;

use crate::config::BudgetPolicy;
use crate::grid::{CellKey, group_by_first_encounter};

/// Trim `markers` to the budget for `zoom` using the default policy.
pub fn limit(markers: Vec<Marker>, zoom: f64) -> Vec<Marker> {
    limit_with(markers, zoom, &BudgetPolicy::default())
}

/// Trim `markers` to the budget for `zoom`.
///
/// Lists already within budget are returned unchanged.
pub fn limit_with(markers: Vec<Marker>, zoom: f64, policy: &BudgetPolicy) -> Vec<Marker> {
    let max = policy.max_markers(zoom);
    if markers.len() <= max {
        return markers;
    }

    let input = markers.len();
    let regions = group_by_first_encounter(markers, |m| {
        CellKey::for_region(m.point(), policy.region_degrees)
    });
    let shares = allocate(max, regions.len());

    let mut selected = Vec::with_capacity(max);
    for (mut region, share) in regions.into_iter().zip(shares) {
        // Stable: equal timestamps keep encounter order.
        region.sort_by_key(|m| Reverse(recency(m)));
        region.truncate(share);
        selected.append(&mut region);
    }

    tracing::debug!(
        zoom,
        max,
        input,
        kept = selected.len(),
        "trimmed markers to budget"
    );
    selected
}

/// Split `max` slots across `regions`: `max / regions` each, plus one for the
/// first `max % regions` regions.
pub fn allocate(max: usize, regions: usize) -> Vec<usize> {
    let per_region = max.checked_div(regions).unwrap_or(0);
    let remainder = max.checked_rem(regions).unwrap_or(0);
    (0..regions)
        .map(|i| {
            if i < remainder {
                per_region.saturating_add(1)
            } else {
                per_region
            }
        })
        .collect()
}

/// Sort key for sampling.
///
/// Clusters carry no observation time of their own and rank with undated
/// events, as the epoch, so they are trimmed before any dated single.
fn recency(marker: &Marker) -> DateTime<Utc> {
    match marker {
        Marker::Single(event) => event.observed_at().unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        Marker::Cluster(_) => DateTime::<Utc>::UNIX_EPOCH,
    }
}
