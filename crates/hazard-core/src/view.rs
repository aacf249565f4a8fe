//! The map view model: filter, cluster, and budget recomputed on every change.
//!
//! [`MapViewModel`] owns the event snapshot, the filter state, and the current
//! zoom. Any change to one of them reruns the whole pipeline synchronously:
//!
//! 1. keep placeable events whose category is visible
//! 2. cluster them for the zoom
//! 3. trim the markers to the zoom's budget
//!
//! The pipeline functions are pure; the view model only caches the last
//! result so the host can read it between changes.

use std::collections::BTreeSet;

use hazard_types::{CategoryId, Marker, MarkerDescriptor, MarkerInfo, category};

use crate::budget;
use crate::catalog::{CategoryCounts, EventCatalog};
use crate::cluster;
use crate::config::{BudgetPolicy, ClusterPolicy, MapConfig};
use crate::filter::CategoryFilter;

/// Run the full pipeline once.
///
/// Only categories in the static table can be visible.
pub fn compute_markers(
    catalog: &EventCatalog,
    filter: &CategoryFilter,
    zoom: f64,
    clustering: &ClusterPolicy,
    budgeting: &BudgetPolicy,
) -> Vec<Marker> {
    run_pipeline(catalog, filter, zoom, clustering, budgeting).markers
}

struct PipelineOutput {
    visible_categories: usize,
    visible_events: usize,
    clustered: usize,
    markers: Vec<Marker>,
}

fn run_pipeline(
    catalog: &EventCatalog,
    filter: &CategoryFilter,
    zoom: f64,
    clustering: &ClusterPolicy,
    budgeting: &BudgetPolicy,
) -> PipelineOutput {
    let known = category::known_ids();
    let visible: BTreeSet<CategoryId> = filter.visible_categories(&known);
    let events = catalog.placed(|id| visible.contains(id));
    let visible_events = events.len();
    let clustered = cluster::cluster_with(events, zoom, clustering);
    let clustered_count = clustered.len();
    PipelineOutput {
        visible_categories: visible.len(),
        visible_events,
        clustered: clustered_count,
        markers: budget::limit_with(clustered, zoom, budgeting),
    }
}

/// Map state as seen by the filter panel and the map widget.
#[derive(Debug, Clone)]
pub struct MapViewModel {
    catalog: EventCatalog,
    filter: CategoryFilter,
    zoom: f64,
    clustering: ClusterPolicy,
    budgeting: BudgetPolicy,
    markers: Vec<Marker>,
    counts: CategoryCounts,
    visible_events: usize,
}

impl MapViewModel {
    /// Build a view model over `catalog` with default policies, showing every
    /// category at `zoom`.
    pub fn new(catalog: EventCatalog, zoom: f64) -> Self {
        Self::with_policies(
            catalog,
            CategoryFilter::new(),
            zoom,
            ClusterPolicy::default(),
            BudgetPolicy::default(),
        )
    }

    /// Build a view model from configuration: initial zoom, initial filter,
    /// and both policies.
    pub fn from_config(catalog: EventCatalog, config: &MapConfig) -> Self {
        Self::with_policies(
            catalog,
            config.filter.to_filter(),
            config.view.zoom,
            config.clustering.clone(),
            config.budget.clone(),
        )
    }

    /// Build a view model from explicit parts.
    pub fn with_policies(
        catalog: EventCatalog,
        filter: CategoryFilter,
        zoom: f64,
        clustering: ClusterPolicy,
        budgeting: BudgetPolicy,
    ) -> Self {
        let counts = catalog.counts();
        let mut model = Self {
            catalog,
            filter,
            zoom,
            clustering,
            budgeting,
            markers: Vec::new(),
            counts,
            visible_events: 0,
        };
        model.recompute();
        model
    }

    /// Replace the event snapshot, e.g. when the feed finishes loading.
    pub fn set_events(&mut self, catalog: EventCatalog) {
        self.counts = catalog.counts();
        self.catalog = catalog;
        self.recompute();
    }

    /// React to a viewport zoom change. Repeating the current zoom is a no-op.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.to_bits() == self.zoom.to_bits() {
            return;
        }
        self.zoom = zoom;
        self.recompute();
    }

    /// The "All Disasters" checkbox.
    pub fn set_all_mode(&mut self, enabled: bool) {
        self.filter.set_all_mode(enabled);
        self.recompute();
    }

    /// The "Clear All" button.
    pub fn clear_all(&mut self) {
        self.filter.clear_all();
        self.recompute();
    }

    /// A single category checkbox.
    pub fn toggle_category(&mut self, id: &CategoryId, checked: bool) {
        self.filter.toggle_category(id, checked);
        self.recompute();
    }

    /// Current filter state.
    pub const fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Current zoom.
    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    /// The loaded events.
    pub const fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    /// Markers to draw, after filtering, clustering, and budgeting.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Widget descriptors for [`Self::markers`].
    pub fn descriptors(&self) -> Vec<MarkerDescriptor> {
        self.markers.iter().map(Marker::descriptor).collect()
    }

    /// Filter-panel counts.
    pub const fn counts(&self) -> &CategoryCounts {
        &self.counts
    }

    /// Number of events that passed the category filter.
    pub const fn visible_events(&self) -> usize {
        self.visible_events
    }

    /// Info payload for the marker at `index` in [`Self::markers`].
    pub fn select(&self, index: usize) -> Option<MarkerInfo> {
        self.markers.get(index).map(Marker::info)
    }

    /// Info payload for the marker with render key `key`.
    pub fn select_key(&self, key: &str) -> Option<MarkerInfo> {
        self.markers
            .iter()
            .find(|m| m.key() == key)
            .map(Marker::info)
    }

    fn recompute(&mut self) {
        let out = run_pipeline(
            &self.catalog,
            &self.filter,
            self.zoom,
            &self.clustering,
            &self.budgeting,
        );
        self.visible_events = out.visible_events;
        self.markers = out.markers;

        tracing::debug!(
            zoom = self.zoom,
            show_all = self.filter.show_all(),
            visible_categories = out.visible_categories,
            visible_events = self.visible_events,
            clustered = out.clustered,
            markers = self.markers.len(),
            "recomputed map markers"
        );
    }
}

#[cfg(test)]
mod tests {
    use hazard_types::{Event, GeoPoint};

    use super::*;

    fn event(id: &str, category: &str, lon: f64, lat: f64) -> Event {
        Event {
            id: id.to_owned(),
            title: format!("{category} {id}"),
            category_id: Some(CategoryId::new(category)),
            category_title: None,
            coordinates: Some(GeoPoint::new(lon, lat)),
            observed_at: None,
            source_url: Some(format!("https://example.org/{id}")),
        }
    }

    fn catalog() -> EventCatalog {
        EventCatalog::from(vec![
            event("f1", "wildfires", 20.01, 10.01),
            event("f2", "wildfires", 20.02, 10.02),
            event("f3", "wildfires", 20.03, 10.03),
            event("f4", "wildfires", 20.04, 10.04),
            event("v1", "volcanoes", -70.0, -30.0),
            event("x1", "manmade", 5.0, 5.0),
        ])
    }

    #[test]
    fn initial_state_shows_known_categories() {
        let vm = MapViewModel::new(catalog(), 3.0);
        // Four fires in one cell become two pairs; the volcano stays single.
        let counts: Vec<usize> = vm.markers().iter().map(Marker::count).collect();
        assert_eq!(counts, vec![2, 2, 1]);
        assert_eq!(vm.visible_events(), 5);
        assert_eq!(vm.counts().total, 6);
        assert_eq!(vm.counts().get(&CategoryId::new("wildfires")), 4);
    }

    #[test]
    fn zoom_change_recomputes() {
        let mut vm = MapViewModel::new(catalog(), 3.0);
        vm.set_zoom(9.0);
        assert_eq!(vm.markers().len(), 5);
        assert!(vm.markers().iter().all(|m| !m.is_cluster()));
        vm.set_zoom(9.0);
        assert_eq!(vm.markers().len(), 5);
    }

    #[test]
    fn filter_changes_recompute() {
        let mut vm = MapViewModel::new(catalog(), 3.0);
        vm.toggle_category(&CategoryId::new("wildfires"), false);
        assert_eq!(vm.markers().len(), 1);
        assert_eq!(vm.visible_events(), 1);

        vm.clear_all();
        assert!(vm.markers().is_empty());

        vm.toggle_category(&CategoryId::new("wildfires"), true);
        assert_eq!(vm.visible_events(), 4);

        vm.set_all_mode(true);
        assert_eq!(vm.visible_events(), 5);
        // Panel counts do not depend on the filter.
        assert_eq!(vm.counts().total, 6);
    }

    #[test]
    fn selecting_a_cluster_surfaces_members() {
        let vm = MapViewModel::new(catalog(), 3.0);
        let info = vm.select(0);
        assert!(info.is_some());
        let Some(info) = info else { return };
        assert_eq!(info.title, "2 disasters in this area");
        assert_eq!(info.count, 2);
        assert_eq!(info.learn_url, "https://example.org/f1");
        let ids: Vec<&str> = info.members.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["f1", "f2"]);

        assert!(vm.select(99).is_none());
        assert_eq!(vm.select_key("v1-1").map(|i| i.title), Some("volcanoes v1".to_owned()));
    }

    #[test]
    fn set_events_replaces_snapshot() {
        let mut vm = MapViewModel::new(EventCatalog::default(), 5.0);
        assert!(vm.markers().is_empty());
        assert_eq!(vm.counts().total, 0);

        vm.set_events(catalog());
        assert_eq!(vm.counts().total, 6);
        assert!(!vm.markers().is_empty());
    }

    #[test]
    fn view_model_matches_pure_pipeline() {
        let mut filter = CategoryFilter::new();
        filter.toggle_category(&CategoryId::new("volcanoes"), false);
        let vm = MapViewModel::with_policies(
            catalog(),
            filter.clone(),
            4.5,
            ClusterPolicy::default(),
            BudgetPolicy::default(),
        );
        let direct = compute_markers(
            &catalog(),
            &filter,
            4.5,
            &ClusterPolicy::default(),
            &BudgetPolicy::default(),
        );
        assert_eq!(vm.markers(), direct.as_slice());
    }

    #[test]
    fn descriptors_follow_markers() {
        let vm = MapViewModel::new(catalog(), 3.0);
        let d = vm.descriptors();
        assert_eq!(d.len(), vm.markers().len());
        assert_eq!(d.first().map(|x| x.icon_class.as_str()), Some("location-icon fire"));
        assert_eq!(d.first().map(|x| x.title.as_str()), Some("2 Wildfires"));
    }
}
