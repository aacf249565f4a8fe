//! The session's event snapshot and the counts shown in the filter panel.

use std::collections::BTreeMap;

use hazard_types::{CATEGORIES, CategoryId, Event, PlacedEvent};
use serde::{Deserialize, Serialize};

/// Immutable list of events loaded for the current session.
///
/// The catalog keeps every record the feed delivered, including ones that
/// cannot be placed; those are skipped by [`EventCatalog::placed`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventCatalog {
    events: Vec<Event>,
}

impl EventCatalog {
    /// Wrap a loaded event list.
    pub const fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Every event, in feed order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of events, placeable or not.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the feed delivered nothing.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Placeable events whose category passes `keep`, in feed order.
    pub fn placed<F>(&self, mut keep: F) -> Vec<PlacedEvent>
    where
        F: FnMut(&CategoryId) -> bool,
    {
        self.events
            .iter()
            .filter(|e| e.category_id.as_ref().is_some_and(&mut keep))
            .filter_map(|e| e.clone().place())
            .collect()
    }

    /// Per-category counts of placeable events for the filter panel.
    pub fn counts(&self) -> CategoryCounts {
        let mut per_category: BTreeMap<CategoryId, usize> = CATEGORIES
            .iter()
            .map(|c| (c.category_id(), 0))
            .collect();
        let mut total: usize = 0;
        for category_id in self
            .events
            .iter()
            .filter(|e| e.is_placeable())
            .filter_map(|e| e.category_id.as_ref())
        {
            if let Some(n) = per_category.get_mut(category_id) {
                *n = n.saturating_add(1);
            }
            total = total.saturating_add(1);
        }
        CategoryCounts {
            per_category,
            total,
        }
    }
}

impl From<Vec<Event>> for EventCatalog {
    fn from(events: Vec<Event>) -> Self {
        Self::new(events)
    }
}

/// Event counts displayed next to the filter checkboxes.
///
/// Counts ignore the current filter so unchecked categories still show how
/// many events they hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    /// Placeable events per known category, zero-filled.
    pub per_category: BTreeMap<CategoryId, usize>,
    /// All placeable events, including categories outside the table.
    pub total: usize,
}

impl CategoryCounts {
    /// Count for one category; zero when unknown.
    pub fn get(&self, id: &CategoryId) -> usize {
        self.per_category.get(id).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use hazard_types::GeoPoint;

    use super::*;

    fn event(id: &str, category: Option<&str>, point: Option<(f64, f64)>) -> Event {
        Event {
            id: id.to_owned(),
            title: id.to_owned(),
            category_id: category.map(CategoryId::from),
            category_title: None,
            coordinates: point.map(|(lon, lat)| GeoPoint::new(lon, lat)),
            observed_at: None,
            source_url: None,
        }
    }

    fn catalog() -> EventCatalog {
        EventCatalog::from(vec![
            event("a", Some("wildfires"), Some((1.0, 1.0))),
            event("b", Some("wildfires"), Some((2.0, 2.0))),
            event("c", Some("floods"), None),
            event("d", None, Some((3.0, 3.0))),
            event("e", Some("manmade"), Some((4.0, 4.0))),
            event("f", Some("volcanoes"), Some((5.0, 5.0))),
        ])
    }

    #[test]
    fn placed_drops_invalid_and_filtered_events() {
        let c = catalog();
        assert_eq!(c.len(), 6);

        let all = c.placed(|_| true);
        let ids: Vec<&str> = all.iter().map(|p| p.event.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "e", "f"]);

        let fires = c.placed(|id| id.as_str() == "wildfires");
        assert_eq!(fires.len(), 2);
    }

    #[test]
    fn counts_are_zero_filled_and_skip_invalid() {
        let counts = catalog().counts();
        assert_eq!(counts.per_category.len(), CATEGORIES.len());
        assert_eq!(counts.get(&CategoryId::new("wildfires")), 2);
        assert_eq!(counts.get(&CategoryId::new("floods")), 0);
        assert_eq!(counts.get(&CategoryId::new("snow")), 0);
        assert_eq!(counts.get(&CategoryId::new("manmade")), 0);
        // a, b, e, f
        assert_eq!(counts.total, 4);
    }

    #[test]
    fn empty_catalog() {
        let c = EventCatalog::default();
        assert!(c.is_empty());
        assert!(c.placed(|_| true).is_empty());
        assert_eq!(c.counts().total, 0);
    }
}
