//! EONET v3 document parsing and normalization into [`Event`]s.
//!
//! The feed is `{ "events": [ ... ] }` where each record carries a list of
//! categories, a list of sources, and a time series of geometries. One
//! [`Event`] is produced per record:
//!
//! - category: the first category id and its title
//! - coordinates and timestamp: the *last* geometry entry
//! - source link: the first source URL
//!
//! Only `Point` geometries with two finite numbers yield coordinates.
//! Records that do not deserialize are skipped, so one bad entry never
//! costs the whole feed.

use chrono::{DateTime, Utc};
use hazard_types::{CategoryId, Event, GeoPoint};
use serde::Deserialize;

use crate::error::FeedError;

/// Top-level document. A missing `events` key reads as an empty feed.
#[derive(Debug, Deserialize)]
struct RawFeed {
    #[serde(default)]
    events: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    id: String,
    title: String,
    #[serde(default)]
    categories: Vec<RawCategory>,
    #[serde(default)]
    sources: Vec<RawSource>,
    #[serde(default)]
    geometry: Vec<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    id: String,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(default)]
    date: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    coordinates: serde_json::Value,
}

/// Parse a feed document, skipping malformed records.
///
/// # Errors
///
/// Returns [`FeedError::Json`] if `text` is not a JSON object of the
/// expected top-level shape.
pub fn parse_document(text: &str) -> Result<Vec<Event>, FeedError> {
    let feed: RawFeed = serde_json::from_str(text)?;
    let total = feed.events.len();

    let events: Vec<Event> = feed
        .events
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<RawEvent>(value) {
            Ok(raw) => Some(normalize(raw)),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed feed record");
                None
            }
        })
        .collect();

    tracing::debug!(
        records = total,
        events = events.len(),
        "parsed feed document"
    );
    Ok(events)
}

/// Parse a feed document, degrading to an empty list when it is unusable.
pub fn parse_feed(text: &str) -> Vec<Event> {
    parse_document(text).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "feed document unusable, showing no events");
        Vec::new()
    })
}

fn normalize(raw: RawEvent) -> Event {
    let latest = raw.geometry.last();
    let (category_id, category_title) = raw
        .categories
        .into_iter()
        .next()
        .map_or((None, None), |c| (Some(CategoryId::new(c.id)), c.title));
    Event {
        id: raw.id,
        title: raw.title,
        category_id,
        category_title,
        coordinates: latest.and_then(point_of),
        observed_at: latest
            .and_then(|g| g.date.as_deref())
            .and_then(parse_date),
        source_url: raw.sources.into_iter().next().and_then(|s| s.url),
    }
}

/// `[lon, lat]` of a `Point` geometry. Other geometry types have no single
/// position and are dropped.
fn point_of(geometry: &RawGeometry) -> Option<GeoPoint> {
    if geometry.kind.as_deref() != Some("Point") {
        return None;
    }
    let coords = geometry.coordinates.as_array()?;
    let lon = coords.first()?.as_f64()?;
    let lat = coords.get(1)?.as_f64()?;
    let point = GeoPoint::new(lon, lat);
    point.is_finite().then_some(point)
}

fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}
