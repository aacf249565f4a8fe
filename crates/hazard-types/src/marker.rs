//! Map markers produced by clustering, and the payloads handed to the map
//! widget and the info popup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::category::{self, CategoryId};
use crate::event::{Event, PlacedEvent};
use crate::geo::GeoPoint;

/// Placeholder link used when no member event has a source URL.
pub const MISSING_SOURCE_URL: &str = "#";

/// A synthetic marker standing in for several nearby events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ClusterMarker {
    /// Title shown on hover, e.g. `3 Wildfires`.
    pub representative_title: String,
    /// Category of the first member.
    pub category_id: CategoryId,
    /// Arithmetic mean of the member positions.
    pub point: GeoPoint,
    /// Members in encounter order. Always at least two.
    pub members: Vec<PlacedEvent>,
}

impl ClusterMarker {
    /// Build a cluster from a chunk of events.
    ///
    /// The title names the first member's category as the feed spelled it,
    /// falling back to the table name and then to `Disasters`.
    ///
    /// Returns `None` for an empty chunk.
    pub fn from_members(members: Vec<PlacedEvent>) -> Option<Self> {
        let point = GeoPoint::centroid(members.iter().map(|m| &m.point))?;
        let first = members.first()?;
        let category_id = first.category_id.clone();
        let category_name = first
            .event
            .category_title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| category::display_name(&category_id));
        let representative_title = format!("{} {category_name}", members.len());
        Some(Self {
            representative_title,
            category_id,
            point,
            members,
        })
    }
}

/// One marker on the map: a single event or a cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Marker {
    /// One event drawn at its own position.
    Single(PlacedEvent),
    /// Several events drawn at their centroid.
    Cluster(ClusterMarker),
}

impl Marker {
    /// Position the marker is drawn at.
    pub const fn point(&self) -> GeoPoint {
        match self {
            Self::Single(e) => e.point,
            Self::Cluster(c) => c.point,
        }
    }

    /// Category used for the icon.
    pub const fn category_id(&self) -> &CategoryId {
        match self {
            Self::Single(e) => &e.category_id,
            Self::Cluster(c) => &c.category_id,
        }
    }

    /// Number of events represented.
    pub fn count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Cluster(c) => c.members.len(),
        }
    }

    /// Events represented, in encounter order.
    pub fn members(&self) -> &[PlacedEvent] {
        match self {
            Self::Single(e) => core::slice::from_ref(e),
            Self::Cluster(c) => &c.members,
        }
    }

    /// Hover title.
    pub fn title(&self) -> &str {
        match self {
            Self::Single(e) => &e.event.title,
            Self::Cluster(c) => &c.representative_title,
        }
    }

    /// Recency used when sampling: the latest member observation.
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.members().iter().filter_map(PlacedEvent::observed_at).max()
    }

    /// Source link of the first member.
    pub fn source_url(&self) -> Option<&str> {
        self.members()
            .first()
            .and_then(|m| m.event.source_url.as_deref())
    }

    /// Stable render key: first member id plus count.
    pub fn key(&self) -> String {
        let id = self.members().first().map_or("", |m| m.event.id.as_str());
        format!("{id}-{}", self.count())
    }

    /// Whether this marker aggregates several events.
    pub const fn is_cluster(&self) -> bool {
        matches!(self, Self::Cluster(_))
    }

    /// Descriptor for the map widget.
    pub fn descriptor(&self) -> MarkerDescriptor {
        let point = self.point();
        MarkerDescriptor {
            key: self.key(),
            point,
            label: point.label(),
            title: self.title().to_owned(),
            category_id: self.category_id().clone(),
            icon_class: category::icon_class(self.category_id()).to_owned(),
            count: self.count(),
        }
    }

    /// Payload for the info popup shown when the marker is selected.
    pub fn info(&self) -> MarkerInfo {
        let point = self.point();
        let title = match self {
            Self::Single(e) => e.event.title.clone(),
            Self::Cluster(c) => format!("{} disasters in this area", c.members.len()),
        };
        MarkerInfo {
            key: self.key(),
            title,
            point,
            label: point.label(),
            learn_url: self.source_url().unwrap_or(MISSING_SOURCE_URL).to_owned(),
            count: self.count(),
            members: self.members().iter().map(|m| m.event.clone()).collect(),
        }
    }
}

/// What the map widget needs to draw one marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MarkerDescriptor {
    /// Stable render key.
    pub key: String,
    /// Position.
    pub point: GeoPoint,
    /// Formatted position, e.g. `38.91 °N 77.04 °W`.
    pub label: String,
    /// Hover title.
    pub title: String,
    /// Category used for the icon.
    pub category_id: CategoryId,
    /// CSS class of the icon.
    pub icon_class: String,
    /// Number of events represented.
    pub count: usize,
}

/// Drill-down payload for a selected marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MarkerInfo {
    /// Stable render key of the selected marker.
    pub key: String,
    /// Event title, or `N disasters in this area` for clusters.
    pub title: String,
    /// Marker position.
    pub point: GeoPoint,
    /// Formatted position.
    pub label: String,
    /// Source link, or [`MISSING_SOURCE_URL`].
    pub learn_url: String,
    /// Number of events represented.
    pub count: usize,
    /// Every represented event.
    pub members: Vec<Event>,
}
