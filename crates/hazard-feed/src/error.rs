//! Error types for the feed loader.
//!
//! These never cross the crate boundary as failures: the public loaders log
//! them and hand the core an empty event list instead.

/// Errors that can occur while loading the event feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Failed to read a feed document from disk.
    #[error("failed to read feed file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The document is not valid JSON or has the wrong shape.
    #[error("failed to parse feed JSON: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The HTTP request could not be sent or its body could not be read.
    #[error("feed request failed: {source}")]
    Http {
        /// The underlying HTTP client error.
        #[from]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("feed server returned HTTP {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },
}
