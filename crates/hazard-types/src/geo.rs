//! Geographic points.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A WGS84 position in decimal degrees.
///
/// Feeds deliver coordinates as `[lon, lat]`; the field order here follows
/// that convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GeoPoint {
    /// Longitude in degrees, east positive.
    pub lon: f64,
    /// Latitude in degrees, north positive.
    pub lat: f64,
}

impl GeoPoint {
    /// Create a point from longitude and latitude.
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Whether both components are finite numbers.
    pub const fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Hover label such as `38.91 °N 77.04 °W`.
    pub fn label(&self) -> String {
        let ns = if self.lat < 0.0 { "S" } else { "N" };
        let ew = if self.lon < 0.0 { "W" } else { "E" };
        format!(
            "{:.2} °{ns} {:.2} °{ew}",
            self.lat.abs(),
            self.lon.abs()
        )
    }

    /// Arithmetic mean of a set of points, summed in iteration order.
    ///
    /// Returns `None` for an empty set.
    pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Self>) -> Option<Self> {
        let mut count: u32 = 0;
        let mut lon_sum = 0.0_f64;
        let mut lat_sum = 0.0_f64;
        for p in points {
            count = count.saturating_add(1);
            lon_sum += p.lon;
            lat_sum += p.lat;
        }
        if count == 0 {
            return None;
        }
        let n = f64::from(count);
        Some(Self::new(lon_sum / n, lat_sum / n))
    }
}
