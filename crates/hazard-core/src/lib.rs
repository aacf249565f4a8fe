//! Category filtering, spatial clustering, and marker budgeting for the
//! hazard map.
//!
//! This crate turns an unbounded list of disaster events into a
//! zoom-adaptive, geographically balanced set of map markers. It is
//! synchronous and free of I/O apart from configuration loading; the event
//! feed arrives as an immutable snapshot.
//!
//! # Modules
//!
//! - [`filter`] -- [`CategoryFilter`], the two-mode checkbox state.
//! - [`grid`] -- Integer cell keys and first-encounter grouping.
//! - [`cluster`] -- Grid clustering with a minimum of two markers per dense
//!   cell.
//! - [`budget`] -- Per-zoom marker caps with region-balanced,
//!   most-recent-first sampling.
//! - [`catalog`] -- [`EventCatalog`] and the filter-panel counts.
//! - [`view`] -- [`MapViewModel`], which composes the pipeline and
//!   recomputes it on every change.
//! - [`config`] -- `hazard-map.yaml` loading and policy validation.

pub mod budget;
pub mod catalog;
pub mod cluster;
pub mod config;
pub mod filter;
pub mod grid;
pub mod view;

// Re-export primary types at crate root.
pub use catalog::{CategoryCounts, EventCatalog};
pub use config::{BudgetPolicy, ClusterPolicy, ConfigError, MapConfig, ZoomTier};
pub use filter::CategoryFilter;
pub use view::{MapViewModel, compute_markers};
