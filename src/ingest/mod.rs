/// Upstream data acquisition.
///
/// Submodules:
/// - `fetch`: retrying JSON GET shared by every upstream.
/// - `spacex`: SpaceX rocket catalog.
/// - `open_meteo`: current weather at the launch site.

pub mod fetch;
pub mod open_meteo;
pub mod spacex;
