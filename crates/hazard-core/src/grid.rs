//! Grid keys and first-encounter grouping shared by clustering and budgeting.
//!
//! Keys are integer cell indices rather than the floored coordinates they
//! stand for, so membership never depends on float formatting or hashing.
//! Groups come back in the order their first member was seen.

use std::collections::BTreeMap;

use hazard_types::GeoPoint;

/// Index of a grid cell: `(floor(lat * k), floor(lon * k))` for `k` cells per
/// unit of the chosen scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    /// Row index.
    pub lat_index: i64,
    /// Column index.
    pub lon_index: i64,
}

impl CellKey {
    /// Cell of `point` on a grid with `cells_per_degree` cells per degree.
    ///
    /// The cell corresponds to the corner
    /// `(floor(lat * g) / g, floor(lon * g) / g)`.
    pub fn for_grid(point: GeoPoint, cells_per_degree: u32) -> Self {
        let g = f64::from(cells_per_degree);
        Self {
            lat_index: floor_index(point.lat * g),
            lon_index: floor_index(point.lon * g),
        }
    }

    /// Region of `point` for regions `degrees` wide:
    /// `(floor(lat / d), floor(lon / d))`.
    pub fn for_region(point: GeoPoint, degrees: f64) -> Self {
        Self {
            lat_index: floor_index(point.lat / degrees),
            lon_index: floor_index(point.lon / degrees),
        }
    }
}

/// Floor to an integer index. Inputs are finite degrees scaled by small
/// factors, far inside the `i64` range.
#[allow(clippy::cast_possible_truncation)]
fn floor_index(value: f64) -> i64 {
    value.floor() as i64
}

/// Group `items` by `key`, preserving first-encounter order of the groups and
/// input order within each group.
pub fn group_by_first_encounter<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<Vec<T>>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut slots: BTreeMap<K, usize> = BTreeMap::new();
    let mut groups: Vec<Vec<T>> = Vec::new();
    for item in items {
        let k = key(&item);
        let slot = *slots.entry(k).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len().saturating_sub(1)
        });
        if let Some(group) = groups.get_mut(slot) {
            group.push(item);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_cell_matches_floored_corner() {
        // floor(38.9 * 6) / 6 = 233 / 6, floor(-77.04 * 6) / 6 = -463 / 6
        let key = CellKey::for_grid(GeoPoint::new(-77.04, 38.9), 6);
        assert_eq!(key.lat_index, 233);
        assert_eq!(key.lon_index, -463);
    }

    #[test]
    fn negative_coordinates_floor_downwards() {
        let key = CellKey::for_grid(GeoPoint::new(-0.1, -0.1), 2);
        assert_eq!(key, CellKey { lat_index: -1, lon_index: -1 });

        let zero = CellKey::for_grid(GeoPoint::new(-0.0, 0.0), 2);
        assert_eq!(zero, CellKey { lat_index: 0, lon_index: 0 });
    }

    #[test]
    fn region_key_uses_ten_degree_buckets() {
        let key = CellKey::for_region(GeoPoint::new(-122.4, 37.8), 10.0);
        assert_eq!(key, CellKey { lat_index: 3, lon_index: -13 });
    }

    #[test]
    fn groups_keep_first_encounter_order() {
        let groups = group_by_first_encounter(vec![5, 1, 8, 3, 6, 11], |n| n % 5);
        assert_eq!(groups, vec![vec![5], vec![1, 6, 11], vec![8, 3]]);
    }

    #[test]
    fn grouping_empty_input_is_empty() {
        let groups = group_by_first_encounter(Vec::<u8>::new(), |n| *n);
        assert!(groups.is_empty());
    }
}
