/// Program configuration.
///
/// The rocket and weather utilities share one configuration file with the
/// flight software (`program_configuration.json` by default; a `.toml` file
/// with the same keys also works). Every loader here degrades to a
/// documented default instead of failing, so callers can rely on getting a
/// usable value. Why a default was used is kept in `SettingOrigin` and
/// logged as a warning.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::ingest::open_meteo::DEFAULT_LAUNCH_SITE;
use crate::logging::{self, Source};
use crate::model::Coordinates;

pub const DEFAULT_CONFIG_PATH: &str = "program_configuration.json";
/// Fallback rocket when the configuration does not name one.
pub const DEFAULT_ROCKET_NAME: &str = "Falcon 9";

pub const DEFAULT_ROCKET_SPECS_PATH: &str = "scripts/api_data/rocket_specs.json";
pub const DEFAULT_WEATHER_PATH: &str = "scripts/api_data/weather_conditions.json";

// ---------------------------------------------------------------------------
// Setting provenance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultReason {
    FileMissing,
    ParseFailed(String),
    KeyMissing(&'static str),
    InvalidValue { key: &'static str, detail: String },
}

impl fmt::Display for DefaultReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultReason::FileMissing => write!(f, "config file not found"),
            DefaultReason::ParseFailed(e) => write!(f, "failed to parse config file: {}", e),
            DefaultReason::KeyMissing(key) => write!(f, "'{}' not set", key),
            DefaultReason::InvalidValue { key, detail } => write!(f, "invalid '{}': {}", key, detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingOrigin {
    File,
    Default(DefaultReason),
}

/// A configuration value and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Setting<T> {
    pub value: T,
    pub origin: SettingOrigin,
}

impl<T> Setting<T> {
    fn from_file(value: T) -> Self {
        Self { value, origin: SettingOrigin::File }
    }

    fn defaulted(value: T, reason: DefaultReason) -> Self {
        Self { value, origin: SettingOrigin::Default(reason) }
    }

    pub fn is_default(&self) -> bool {
        matches!(self.origin, SettingOrigin::Default(_))
    }
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

/// Reads the configuration document. `.toml` files are parsed as TOML,
/// everything else as JSON.
fn read_document(path: &Path) -> Result<Value, DefaultReason> {
    if !path.exists() {
        return Err(DefaultReason::FileMissing);
    }

    let text = fs::read_to_string(path).map_err(|e| DefaultReason::ParseFailed(e.to_string()))?;

    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    if is_toml {
        toml::from_str::<Value>(&text).map_err(|e| DefaultReason::ParseFailed(e.to_string()))
    } else {
        serde_json::from_str::<Value>(&text).map_err(|e| DefaultReason::ParseFailed(e.to_string()))
    }
}

fn key<'a>(document: &'a Value, key: &'static str) -> Result<&'a Value, DefaultReason> {
    match document.get(key) {
        None | Some(Value::Null) => Err(DefaultReason::KeyMissing(key)),
        Some(value) => Ok(value),
    }
}

fn rocket_name_from(document: &Value) -> Result<String, DefaultReason> {
    let value = key(document, "rocket_name")?;
    match value.as_str().map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        Some(_) => Err(DefaultReason::InvalidValue {
            key: "rocket_name",
            detail: "empty string".to_string(),
        }),
        None => Err(DefaultReason::InvalidValue {
            key: "rocket_name",
            detail: format!("expected a string, got {}", value),
        }),
    }
}

fn degrees_from(document: &Value, name: &'static str, limit: f64) -> Result<f64, DefaultReason> {
    let value = key(document, name)?;
    let degrees = value.as_f64().ok_or_else(|| DefaultReason::InvalidValue {
        key: name,
        detail: format!("expected a number, got {}", value),
    })?;
    if !(-limit..=limit).contains(&degrees) {
        return Err(DefaultReason::InvalidValue {
            key: name,
            detail: format!("{} is outside ±{}", degrees, limit),
        });
    }
    Ok(degrees)
}

// ---------------------------------------------------------------------------
// Public loaders
// ---------------------------------------------------------------------------

/// The rocket to look up, or `DEFAULT_ROCKET_NAME`.
pub fn load_rocket_name(path: &Path) -> Setting<String> {
    let result = read_document(path).and_then(|doc| rocket_name_from(&doc));

    match result {
        Ok(name) => Setting::from_file(name),
        Err(reason) => {
            logging::warn(
                Source::Config,
                Some(&path.display().to_string()),
                &format!("{}. Using default rocket: {}", reason, DEFAULT_ROCKET_NAME),
            );
            Setting::defaulted(DEFAULT_ROCKET_NAME.to_string(), reason)
        }
    }
}

/// The weather location. Latitude and longitude default independently to
/// Kennedy Space Center; the origin reports the first reason a default was
/// needed.
pub fn load_launch_site(path: &Path) -> Setting<Coordinates> {
    let document = match read_document(path) {
        Ok(doc) => doc,
        Err(reason) => {
            logging::warn(
                Source::Config,
                Some(&path.display().to_string()),
                &format!("{}. Using default location.", reason),
            );
            return Setting::defaulted(DEFAULT_LAUNCH_SITE, reason);
        }
    };

    let mut first_reason = None;
    let mut pick = |result: Result<f64, DefaultReason>, fallback: f64| match result {
        Ok(degrees) => degrees,
        Err(reason) => {
            logging::warn(
                Source::Config,
                Some(&path.display().to_string()),
                &format!("{}. Using default {}.", reason, fallback),
            );
            first_reason.get_or_insert(reason);
            fallback
        }
    };

    let site = Coordinates {
        latitude: pick(degrees_from(&document, "latitude", 90.0), DEFAULT_LAUNCH_SITE.latitude),
        longitude: pick(degrees_from(&document, "longitude", 180.0), DEFAULT_LAUNCH_SITE.longitude),
    };

    match first_reason {
        None => Setting::from_file(site),
        Some(reason) => Setting::defaulted(site, reason),
    }
}

/// Configuration file path: `PROGRAM_CONFIG`, else `DEFAULT_CONFIG_PATH`.
pub fn config_path_from_env() -> PathBuf {
    env_or("PROGRAM_CONFIG", DEFAULT_CONFIG_PATH).into()
}

/// Reads a non-empty environment variable, falling back to `default`.
pub fn env_or(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
