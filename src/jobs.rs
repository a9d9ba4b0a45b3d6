//! One-shot acquisition jobs run by the binaries.
//!
//! Each job is a single linear pass: fetch → transform → persist. A fetch
//! failure ends the job before any transform; any failure ends it before
//! anything is written, so a previous output file survives a bad run.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{self, DEFAULT_ROCKET_SPECS_PATH, DEFAULT_WEATHER_PATH};
use crate::ingest::fetch::{self, HttpGet, RetryPolicy};
use crate::ingest::open_meteo::{self, OPEN_METEO_API_BASE};
use crate::ingest::spacex::{Catalog, SPACEX_ROCKETS_URL};
use crate::logging::{self, Source};
use crate::model::{Coordinates, ExtractError, FetchError, OutputError, ResolveError, RocketSpec, WeatherReading};
use crate::output;
use crate::resolve;

#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Rocket '{name}' not found: no close match in catalog")]
    NotFound { name: String },
    #[error("Malformed upstream payload: {0}")]
    Malformed(#[from] ExtractError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

impl From<ResolveError> for JobError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound { name } => JobError::NotFound { name },
            ResolveError::Malformed(e) => JobError::Malformed(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Rocket specifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RocketSpecsJob {
    pub rocket_name: String,
    pub catalog_url: String,
    pub output_path: PathBuf,
    pub policy: RetryPolicy,
}

impl RocketSpecsJob {
    /// Default endpoint and output path, overridable with `SPACEX_API_URL`
    /// and `ROCKET_SPECS_PATH`.
    pub fn from_env(rocket_name: String) -> Self {
        Self {
            rocket_name,
            catalog_url: config::env_or("SPACEX_API_URL", SPACEX_ROCKETS_URL),
            output_path: config::env_or("ROCKET_SPECS_PATH", DEFAULT_ROCKET_SPECS_PATH).into(),
            policy: RetryPolicy::default(),
        }
    }
}

/// Fetch the catalog, resolve `job.rocket_name`, and persist the result.
pub fn run_rocket_specs<C: HttpGet + ?Sized>(client: &C, job: &RocketSpecsJob) -> Result<RocketSpec, JobError> {
    logging::info(Source::SpaceX, None, &format!("Fetching specs for rocket: {}...", job.rocket_name));

    let fetched = fetch::fetch_json(client, &job.catalog_url, &job.policy, Source::SpaceX)?;
    let catalog = Catalog::from_payload(fetched.payload)?;
    logging::debug(Source::SpaceX, None, &format!("Catalog holds {} rocket(s)", catalog.len()));

    let spec = resolve::resolve(&job.rocket_name, &catalog)?;
    if spec.name != job.rocket_name {
        logging::info(
            Source::SpaceX,
            Some(&job.rocket_name),
            &format!("Closest catalog match: {}", spec.name),
        );
    }
    if spec.fuel_kg.is_unknown() {
        logging::warn(Source::SpaceX, Some(&spec.name), "No fuel mass published or estimated; recorded as Unknown");
    }

    output::write_json_atomic(&job.output_path, &spec)?;
    logging::info(
        Source::Output,
        None,
        &format!("Rocket specs saved: {}", job.output_path.display()),
    );
    Ok(spec)
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherJob {
    pub site: Coordinates,
    pub api_base: String,
    pub output_path: PathBuf,
    pub policy: RetryPolicy,
}

impl WeatherJob {
    /// Default endpoint and output path, overridable with `OPEN_METEO_API_URL`
    /// and `WEATHER_DATA_PATH`.
    pub fn from_env(site: Coordinates) -> Self {
        Self {
            site,
            api_base: config::env_or("OPEN_METEO_API_URL", OPEN_METEO_API_BASE),
            output_path: config::env_or("WEATHER_DATA_PATH", DEFAULT_WEATHER_PATH).into(),
            policy: RetryPolicy::default(),
        }
    }
}

/// Fetch current conditions at `job.site` and persist them.
pub fn run_weather<C: HttpGet + ?Sized>(client: &C, job: &WeatherJob) -> Result<WeatherReading, JobError> {
    logging::info(
        Source::OpenMeteo,
        None,
        &format!("Fetching weather data for coordinates: {}...", job.site),
    );

    let url = open_meteo::build_current_url(&job.api_base, &job.site);
    let fetched = fetch::fetch_json(client, &url, &job.policy, Source::OpenMeteo)?;
    let reading = open_meteo::parse_current(&fetched.payload)?;

    output::write_json_atomic(&job.output_path, &reading)?;
    logging::info(
        Source::Output,
        None,
        &format!("Weather data saved: {}", job.output_path.display()),
    );
    Ok(reading)
}
