//! Disaster categories.
//!
//! Category identifiers follow the EONET v3 string IDs (`wildfires`,
//! `severeStorms`, ...). The set of categories the map knows how to draw is a
//! fixed lookup table, [`CATEGORIES`], in filter-panel display order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Icon class used for categories that are not in [`CATEGORIES`].
pub const FALLBACK_ICON_CLASS: &str = "location-icon other";

/// Display name used for cluster titles when the category is unknown.
pub const FALLBACK_CATEGORY_NAME: &str = "Disasters";

/// Identifier of a disaster category, e.g. `"wildfires"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct CategoryId(pub String);

impl CategoryId {
    /// Create a category identifier from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Look up the static table entry for this identifier.
    pub fn category(&self) -> Option<&'static DisasterCategory> {
        lookup(&self.0)
    }
}

impl core::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// One entry of the static category table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisasterCategory {
    /// EONET category identifier.
    pub id: &'static str,
    /// Human-readable name shown in the filter panel.
    pub name: &'static str,
    /// CSS class of the marker icon on the map.
    pub icon_class: &'static str,
    /// CSS class of the icon next to the filter-panel checkbox. Landslides
    /// and sea/lake ice use the bare base class there.
    pub panel_icon_class: &'static str,
}

impl DisasterCategory {
    /// The identifier as an owned [`CategoryId`].
    pub fn category_id(&self) -> CategoryId {
        CategoryId::new(self.id)
    }
}

/// Every category the map renders, in display order.
pub const CATEGORIES: &[DisasterCategory] = &[
    DisasterCategory {
        id: "drought",
        name: "Drought",
        icon_class: "location-icon drought",
        panel_icon_class: "location-icon drought",
    },
    DisasterCategory {
        id: "dustHaze",
        name: "Dust and Haze",
        icon_class: "location-icon dust",
        panel_icon_class: "location-icon dust",
    },
    DisasterCategory {
        id: "wildfires",
        name: "Wildfires",
        icon_class: "location-icon fire",
        panel_icon_class: "location-icon fire",
    },
    DisasterCategory {
        id: "floods",
        name: "Floods",
        icon_class: "location-icon flood",
        panel_icon_class: "location-icon flood",
    },
    DisasterCategory {
        id: "severeStorms",
        name: "Severe Storms",
        icon_class: "location-icon storm",
        panel_icon_class: "location-icon storm",
    },
    DisasterCategory {
        id: "volcanoes",
        name: "Volcanoes",
        icon_class: "location-icon volcano",
        panel_icon_class: "location-icon volcano",
    },
    DisasterCategory {
        id: "waterColor",
        name: "Water Color",
        icon_class: "location-icon water-color",
        panel_icon_class: "location-icon water-color",
    },
    DisasterCategory {
        id: "landslides",
        name: "Landslides",
        icon_class: "location-icon landslide",
        panel_icon_class: "location-icon",
    },
    DisasterCategory {
        id: "seaLakeIce",
        name: "Sea, Lake Ice",
        icon_class: "location-icon ice",
        panel_icon_class: "location-icon",
    },
    DisasterCategory {
        id: "earthquakes",
        name: "Earthquakes",
        icon_class: "location-icon earthquake",
        panel_icon_class: "location-icon earthquake",
    },
    DisasterCategory {
        id: "snow",
        name: "Snow",
        icon_class: "location-icon snow",
        panel_icon_class: "location-icon snow",
    },
    DisasterCategory {
        id: "tempExtremes",
        name: "Extreme Temp",
        icon_class: "location-icon temperature",
        panel_icon_class: "location-icon temperature",
    },
];

/// Find a category by its identifier.
pub fn lookup(id: &str) -> Option<&'static DisasterCategory> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// All known category identifiers, in display order.
pub fn known_ids() -> Vec<CategoryId> {
    CATEGORIES.iter().map(DisasterCategory::category_id).collect()
}

/// Marker icon class for a category, falling back to [`FALLBACK_ICON_CLASS`].
pub fn icon_class(id: &CategoryId) -> &'static str {
    id.category().map_or(FALLBACK_ICON_CLASS, |c| c.icon_class)
}

/// Display name for a category, falling back to [`FALLBACK_CATEGORY_NAME`].
pub fn display_name(id: &CategoryId) -> &'static str {
    id.category().map_or(FALLBACK_CATEGORY_NAME, |c| c.name)
}
