//! Feed sources: a local file or a one-shot HTTP fetch.
//!
//! Both loaders hand back a plain `Vec<Event>`. Any failure is logged and
//! degrades to an empty list, so the map simply shows no events.

use std::path::Path;
use std::time::Duration;

use hazard_types::Event;

use crate::eonet::parse_document;
use crate::error::FeedError;

/// Read and parse a feed document saved on disk.
pub fn load_file(path: &Path) -> Vec<Event> {
    match try_load_file(path) {
        Ok(events) => {
            tracing::info!(path = %path.display(), events = events.len(), "loaded feed file");
            events
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "feed file unavailable, showing no events");
            Vec::new()
        }
    }
}

fn try_load_file(path: &Path) -> Result<Vec<Event>, FeedError> {
    let text = std::fs::read_to_string(path)?;
    parse_document(&text)
}

/// Fetch the feed once from `url`, giving up after `timeout`.
pub async fn fetch(url: &str, timeout: Duration) -> Vec<Event> {
    match try_fetch(url, timeout).await {
        Ok(events) => {
            tracing::info!(url, events = events.len(), "fetched feed");
            events
        }
        Err(e) => {
            tracing::warn!(url, error = %e, "feed fetch failed, showing no events");
            Vec::new()
        }
    }
}

async fn try_fetch(url: &str, timeout: Duration) -> Result<Vec<Event>, FeedError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status {
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    parse_document(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_no_events() {
        let events = load_file(Path::new("/nonexistent/hazard-feed/events.json"));
        assert!(events.is_empty());
    }

    #[test]
    fn io_errors_surface_internally() {
        let result = try_load_file(Path::new("/nonexistent/hazard-feed/events.json"));
        assert!(matches!(result, Err(FeedError::Io { .. })));
    }

    #[tokio::test]
    async fn unreachable_server_yields_no_events() {
        // Port 9 (discard) is not served on loopback; the connection is refused.
        let events = fetch("http://127.0.0.1:9/api/v3/events", Duration::from_secs(2)).await;
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn invalid_url_yields_no_events() {
        let events = fetch("not a url", Duration::from_secs(1)).await;
        assert!(events.is_empty());
    }
}
