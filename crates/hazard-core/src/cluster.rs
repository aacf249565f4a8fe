//! Zoom-adaptive grid clustering.
//!
//! Events are bucketed into a lat/lon grid whose cells grow as the map zooms
//! out. Sparse cells stay literal. Dense cells are cut into contiguous chunks
//! so every dense cell still shows at least two markers, each chunk drawn at
//! the centroid of its members.
//!
//! Cell membership and chunk boundaries depend only on the input order and
//! the zoom, so the same input always yields the same markers.

use hazard_types::{ClusterMarker, Marker, PlacedEvent};

use crate::config::ClusterPolicy;
use crate::grid::{CellKey, group_by_first_encounter};

/// Smallest chunk a dense cell is split into.
pub const MIN_CHUNK_SIZE: usize = 2;

/// Cluster `events` for display at `zoom` using the default policy.
pub fn cluster(events: Vec<PlacedEvent>, zoom: f64) -> Vec<Marker> {
    cluster_with(events, zoom, &ClusterPolicy::default())
}

/// Cluster `events` for display at `zoom`.
///
/// At or above `policy.disable_at_zoom` each event becomes its own marker,
/// in input order.
pub fn cluster_with(events: Vec<PlacedEvent>, zoom: f64, policy: &ClusterPolicy) -> Vec<Marker> {
    if policy.is_disabled_at(zoom) {
        return events.into_iter().map(Marker::Single).collect();
    }

    let grid = policy.grid_size(zoom);
    let cells = group_by_first_encounter(events, |e| CellKey::for_grid(e.point, grid));
    let cell_count = cells.len();

    let mut markers = Vec::new();
    for members in cells {
        emit_cell(members, policy, &mut markers);
    }

    tracing::trace!(
        zoom,
        grid,
        cells = cell_count,
        markers = markers.len(),
        "clustered events"
    );
    markers
}

/// Chunk size for a dense cell of `member_count` events.
pub fn chunk_size(member_count: usize, policy: &ClusterPolicy) -> usize {
    member_count
        .checked_div(policy.min_markers_per_cell)
        .unwrap_or(member_count)
        .max(MIN_CHUNK_SIZE)
}

fn emit_cell(members: Vec<PlacedEvent>, policy: &ClusterPolicy, out: &mut Vec<Marker>) {
    if members.len() <= policy.sparse_cell_max {
        out.extend(members.into_iter().map(Marker::Single));
        return;
    }

    let size = chunk_size(members.len(), policy);
    let mut rest = members.into_iter().peekable();
    while rest.peek().is_some() {
        let chunk: Vec<PlacedEvent> = rest.by_ref().take(size).collect();
        out.extend(chunk_marker(chunk));
    }
}

fn chunk_marker(mut chunk: Vec<PlacedEvent>) -> Option<Marker> {
    if chunk.len() == 1 {
        return chunk.pop().map(Marker::Single);
    }
    ClusterMarker::from_members(chunk).map(Marker::Cluster)
}
