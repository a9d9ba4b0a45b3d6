//! Rocket specification and launch-site weather acquisition.
//!
//! Fetches the SpaceX rocket catalog, resolves an approximate rocket name
//! to the closest catalog entry, and persists a normalized SI-unit
//! specification for the flight software. A sibling job fetches current
//! weather at the launch site the same way.

pub mod config;
pub mod ingest;
pub mod jobs;
pub mod logging;
pub mod model;
pub mod output;
pub mod resolve;
