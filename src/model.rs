/// Core data types for the rocket specification service.
///
/// This module defines the shared domain model imported by all other modules:
/// the normalized records we persist, the fuel-mass sentinel, and the error
/// enums each stage of the pipeline can produce. It contains no I/O.

use serde::de::{self, Deserializer, Unexpected};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Unit conversion factors
// ---------------------------------------------------------------------------

/// The catalog reports thrust in kilonewtons; we persist newtons.
pub const KILONEWTONS_TO_NEWTONS: f64 = 1000.0;

/// The catalog reports propellant in metric tons; we persist kilograms.
pub const TONS_TO_KILOGRAMS: f64 = 1000.0;

/// Marker written in place of a fuel mass that could not be determined.
pub const UNKNOWN_SENTINEL: &str = "Unknown";

// ---------------------------------------------------------------------------
// Rocket specification
// ---------------------------------------------------------------------------

/// Propellant mass of a vehicle, in kilograms, or the explicit unknown marker.
///
/// Serializes as a bare number or as the string `"Unknown"`, so a consumer of
/// the persisted file can never mistake a missing value for a real zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FuelMass {
    Kilograms(f64),
    Unknown,
}

impl FuelMass {
    /// Converts an optional tonnage into a fuel mass. The sentinel is never scaled.
    pub fn from_tons(tons: Option<f64>) -> Self {
        match tons {
            Some(t) => FuelMass::Kilograms(t * TONS_TO_KILOGRAMS),
            None => FuelMass::Unknown,
        }
    }

    pub fn kilograms(&self) -> Option<f64> {
        match self {
            FuelMass::Kilograms(kg) => Some(*kg),
            FuelMass::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, FuelMass::Unknown)
    }
}

impl fmt::Display for FuelMass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuelMass::Kilograms(kg) => write!(f, "{} kg", kg),
            FuelMass::Unknown => write!(f, "{}", UNKNOWN_SENTINEL),
        }
    }
}

impl Serialize for FuelMass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FuelMass::Kilograms(kg) => serializer.serialize_f64(*kg),
            FuelMass::Unknown => serializer.serialize_str(UNKNOWN_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for FuelMass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Kilograms(f64),
            Marker(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Kilograms(kg) => Ok(FuelMass::Kilograms(kg)),
            Repr::Marker(marker) if marker == UNKNOWN_SENTINEL => Ok(FuelMass::Unknown),
            Repr::Marker(other) => Err(de::Error::invalid_value(
                Unexpected::Str(&other),
                &"a number of kilograms or \"Unknown\"",
            )),
        }
    }
}

/// First- and second-stage burn durations, in seconds.
///
/// Either may be `None` when the catalog publishes an explicit `null`
/// (vehicles that have not flown a full profile yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnTimes {
    pub first_stage: Option<f64>,
    pub second_stage: Option<f64>,
}

/// A single rocket's specification, flattened and converted to SI units.
///
/// Field names on the wire match the document the flight software reads
/// (`thrust_N`, `ISP_sea_level`, ...), hence the renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocketSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub rocket_type: String,
    pub height_m: f64,
    pub diameter_m: f64,
    pub mass_kg: f64,
    pub stages: u32,
    pub boosters: u32,
    pub cost_per_launch: f64,
    pub success_rate_pct: f64,
    pub first_flight: String,
    pub company: String,
    pub country: String,
    #[serde(rename = "thrust_N")]
    pub thrust_n: f64,
    #[serde(rename = "thrust_vacuum_N")]
    pub thrust_vacuum_n: f64,
    #[serde(rename = "ISP_sea_level")]
    pub isp_sea_level: f64,
    #[serde(rename = "ISP_vacuum")]
    pub isp_vacuum: f64,
    pub fuel_kg: FuelMass,
    pub engine_type: String,
    pub engine_version: String,
    pub engine_count: u32,
    /// Payload configuration name (e.g. "leo", "gto") to capacity in kg.
    pub payload_weights: std::collections::BTreeMap<String, f64>,
    pub landing_legs: u32,
    pub reusable: bool,
    pub burn_time_sec: BurnTimes,
    pub flickr_images: Vec<String>,
    pub wikipedia: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// WGS84 position used for the weather lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Current surface conditions at the launch site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    #[serde(rename = "temperature_C")]
    pub temperature_c: f64,
    pub wind_speed_mps: f64,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fetching a JSON document over HTTP.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Non-2xx HTTP response.
    #[error("HTTP error: {0}")]
    HttpStatus(u16),
    /// The per-attempt timeout elapsed before a response arrived.
    #[error("Request timed out: {0}")]
    Timeout(String),
    /// Connection, DNS, TLS or body-read failure.
    #[error("Request failed: {0}")]
    Request(String),
    /// A 2xx response whose body is not valid JSON.
    #[error("Parse error: {0}")]
    InvalidJson(String),
    /// Every attempt in the retry budget failed.
    #[error("Could not fetch {url} after {attempts} attempt(s): {last_error}")]
    Exhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },
}

/// A field of an upstream JSON document was absent or had the wrong shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("Missing field: {path}")]
    MissingField { path: String },
    #[error("Wrong type at {path}: expected {expected}, found {found}")]
    WrongType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl ExtractError {
    pub fn path(&self) -> &str {
        match self {
            ExtractError::MissingField { path } | ExtractError::WrongType { path, .. } => path,
        }
    }
}

/// Outcomes of resolving a rocket name against a catalog, other than success.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// No catalog name reached the similarity cutoff.
    #[error("Rocket '{name}' not found: no close match in catalog")]
    NotFound { name: String },
    /// The matched record (or the catalog itself) is not shaped as expected.
    #[error("Malformed upstream payload: {0}")]
    Malformed(#[from] ExtractError),
}

/// Errors writing a result document to disk.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {}: {}", .path.display(), .source)]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}
