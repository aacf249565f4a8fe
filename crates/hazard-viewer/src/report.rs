//! The JSON snapshot printed by the viewer: filter panel rows, marker
//! descriptors, and the info popup for the first marker.

use hazard_core::MapViewModel;
use hazard_types::{CATEGORIES, CategoryId, GeoPoint, MarkerDescriptor, MarkerInfo};
use serde::Serialize;

/// One checkbox row of the filter panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelRow {
    /// Category id.
    pub id: CategoryId,
    /// Display name.
    pub name: &'static str,
    /// CSS class of the checkbox icon.
    pub icon_class: &'static str,
    /// Whether the checkbox is ticked.
    pub checked: bool,
    /// Placeable events in this category.
    pub count: usize,
}

/// Everything the map front end would render for the current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewReport {
    /// Current zoom.
    pub zoom: f64,
    /// Map center.
    pub center: GeoPoint,
    /// State of the "All Disasters" checkbox.
    pub show_all: bool,
    /// Per-category rows in table order.
    pub panel: Vec<PanelRow>,
    /// Placeable events across all categories.
    pub total_events: usize,
    /// Events that passed the filter.
    pub visible_events: usize,
    /// Markers to draw.
    pub markers: Vec<MarkerDescriptor>,
    /// Popup for the first marker, if any.
    pub selected: Option<MarkerInfo>,
}

impl ViewReport {
    /// Snapshot the view model.
    pub fn capture(view: &MapViewModel, center: GeoPoint) -> Self {
        let filter = view.filter();
        let counts = view.counts();
        let panel = CATEGORIES
            .iter()
            .map(|c| {
                let id = c.category_id();
                PanelRow {
                    checked: filter.is_checked(&id),
                    count: counts.get(&id),
                    name: c.name,
                    icon_class: c.panel_icon_class,
                    id,
                }
            })
            .collect();

        Self {
            zoom: view.zoom(),
            center,
            show_all: filter.show_all(),
            panel,
            total_events: counts.total,
            visible_events: view.visible_events(),
            markers: view.descriptors(),
            selected: view.select(0),
        }
    }
}
