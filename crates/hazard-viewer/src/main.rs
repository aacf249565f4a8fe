//! Host binary for the hazard map.
//!
//! Wires the feed loader to the map view model and prints what the map
//! front end would render as JSON on stdout. Logs go to stderr.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `HAZARD_MAP_CONFIG` or `hazard-map.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Load the event feed once (local file if configured, else HTTP)
//! 4. Build the view model at the configured zoom and filter
//! 5. Print the view report

mod error;
mod report;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use hazard_core::config::FeedConfig;
use hazard_core::{EventCatalog, MapConfig, MapViewModel};
use hazard_types::Event;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::ViewerError;
use crate::report::ViewReport;

/// Default config file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "hazard-map.yaml";

/// Application entry point for the viewer.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the report cannot be
/// written. An unreachable feed is not an error.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(
        zoom = config.view.zoom,
        show_all = config.filter.show_all,
        feed_url = config.feed.url,
        feed_path = ?config.feed.path,
        "hazard-viewer starting"
    );

    // 3. Load the feed.
    let events = load_events(&config.feed).await;
    info!(events = events.len(), "Feed loaded");

    // 4. Build the view model.
    let view = MapViewModel::from_config(EventCatalog::new(events), &config);
    info!(
        visible_events = view.visible_events(),
        markers = view.markers().len(),
        "Markers computed"
    );

    // 5. Print the report.
    let report = ViewReport::capture(&view, config.view.center);
    write_report(&report)?;

    Ok(())
}

/// Load configuration from `HAZARD_MAP_CONFIG` or `hazard-map.yaml`.
///
/// A missing file means defaults, with environment overrides still applied.
fn load_config() -> Result<MapConfig, ViewerError> {
    let config_path = std::env::var("HAZARD_MAP_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if config_path.exists() {
        Ok(MapConfig::from_file(&config_path)?)
    } else {
        let mut config = MapConfig::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }
}

/// Load events from the configured source. A local path wins over the URL.
async fn load_events(feed: &FeedConfig) -> Vec<Event> {
    match &feed.path {
        Some(path) => hazard_feed::load_file(path),
        None => hazard_feed::fetch(&feed.url, Duration::from_millis(feed.timeout_ms)).await,
    }
}

fn write_report(report: &ViewReport) -> Result<(), ViewerError> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, report)?;
    writeln!(out)?;
    Ok(())
}
