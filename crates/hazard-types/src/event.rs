//! Disaster events as delivered by the feed, and their validated form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::category::CategoryId;
use crate::geo::GeoPoint;

/// A single reported disaster occurrence.
///
/// Feeds are partial: an event may arrive without a category or without a
/// usable position. Such events are kept in the catalog but never placed on
/// the map; see [`Event::place`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Event {
    /// Feed identifier, e.g. `EONET_6512`.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Primary category, if the feed supplied one.
    pub category_id: Option<CategoryId>,
    /// The feed's own name for the primary category.
    #[serde(default)]
    pub category_title: Option<String>,
    /// Most recent reported position.
    pub coordinates: Option<GeoPoint>,
    /// Time of the most recent observation.
    pub observed_at: Option<DateTime<Utc>>,
    /// Link to the reporting source.
    pub source_url: Option<String>,
}

impl Event {
    /// Validate the event for map placement.
    ///
    /// Returns `None` when the category or coordinates are missing, or when
    /// the coordinates are not finite.
    pub fn place(self) -> Option<PlacedEvent> {
        let category_id = self.category_id.clone()?;
        let point = self.coordinates.filter(GeoPoint::is_finite)?;
        Some(PlacedEvent {
            event: self,
            category_id,
            point,
        })
    }

    /// Whether [`Event::place`] would accept this event.
    pub fn is_placeable(&self) -> bool {
        self.category_id.is_some() && self.coordinates.is_some_and(|p| p.is_finite())
    }
}

/// An event that has a category and a finite position.
///
/// Only placed events enter clustering and budgeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlacedEvent {
    /// The underlying feed event.
    pub event: Event,
    /// Its category.
    pub category_id: CategoryId,
    /// Its position.
    pub point: GeoPoint,
}

impl PlacedEvent {
    /// Observation time, if known.
    pub const fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.event.observed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(category: Option<&str>, coordinates: Option<GeoPoint>) -> Event {
        Event {
            id: "EONET_1".to_owned(),
            title: "Test fire".to_owned(),
            category_id: category.map(CategoryId::from),
            category_title: None,
            coordinates,
            observed_at: None,
            source_url: None,
        }
    }

    #[test]
    fn complete_event_is_placed() {
        let placed = event(Some("wildfires"), Some(GeoPoint::new(-120.5, 38.2))).place();
        assert!(placed.is_some());
        if let Some(p) = placed {
            assert_eq!(p.category_id.as_str(), "wildfires");
            assert_eq!(p.point, GeoPoint::new(-120.5, 38.2));
        }
    }

    #[test]
    fn missing_category_is_rejected() {
        let e = event(None, Some(GeoPoint::new(1.0, 1.0)));
        assert!(!e.is_placeable());
        assert!(e.place().is_none());
    }

    #[test]
    fn missing_or_nan_coordinates_are_rejected() {
        assert!(event(Some("floods"), None).place().is_none());
        let nan = event(Some("floods"), Some(GeoPoint::new(f64::NAN, 3.0)));
        assert!(!nan.is_placeable());
        assert!(nan.place().is_none());
    }

    #[test]
    fn zero_coordinates_are_valid() {
        assert!(event(Some("floods"), Some(GeoPoint::new(0.0, 0.0))).is_placeable());
    }
}
