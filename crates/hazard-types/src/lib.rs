//! Shared type definitions for the hazard map.
//!
//! This crate is the single source of truth for the data model shared by the
//! clustering core, the feed loader, and the map front end. Types flow
//! downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`category`] -- Category identifiers and the static category table
//! - [`geo`] -- Geographic points, centroids, and hover labels
//! - [`event`] -- Feed events and their validated, placeable form
//! - [`marker`] -- Single and cluster markers, widget descriptors, info payloads

pub mod category;
pub mod event;
pub mod geo;
pub mod marker;

// Re-export all public types at crate root for convenience.
pub use category::{CATEGORIES, CategoryId, DisasterCategory};
pub use event::{Event, PlacedEvent};
pub use geo::GeoPoint;
pub use marker::{ClusterMarker, Marker, MarkerDescriptor, MarkerInfo};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the front-end facing types.

    #[test]
    fn export_bindings() {
        // Files are written to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::category::CategoryId::export_all();
        let _ = crate::geo::GeoPoint::export_all();
        let _ = crate::event::Event::export_all();
        let _ = crate::event::PlacedEvent::export_all();
        let _ = crate::marker::ClusterMarker::export_all();
        let _ = crate::marker::Marker::export_all();
        let _ = crate::marker::MarkerDescriptor::export_all();
        let _ = crate::marker::MarkerInfo::export_all();
    }
}
