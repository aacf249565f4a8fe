//! EONET event feed loader for the hazard map.
//!
//! Turns a NASA EONET v3 events document into the immutable `Vec<Event>`
//! snapshot the map core works on. Loading never fails from the caller's
//! point of view: network errors, bad status codes, unreadable files, and
//! malformed documents all yield an empty list and a `warn!` log line.
//!
//! # Modules
//!
//! - [`eonet`] -- Document parsing and per-record normalization.
//! - [`load`] -- File and HTTP sources.
//! - [`error`] -- [`FeedError`], the loader's internal failure type.

pub mod eonet;
pub mod error;
pub mod load;

pub use eonet::{parse_document, parse_feed};
pub use error::FeedError;
pub use load::{fetch, load_file};
