//! Error types for the viewer binary.

/// Top-level error for the viewer binary.
///
/// Feed failures never appear here: the loader degrades to an empty map.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: hazard_core::ConfigError,
    },

    /// The report could not be serialized.
    #[error("report serialization failed: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// Writing the report to stdout failed.
    #[error("output error: {source}")]
    Output {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
