/// Open-Meteo current conditions client
///
/// Retrieves the current 2 m air temperature and 10 m wind speed for the
/// launch site. No API key is required.
///
/// API Documentation: https://open-meteo.com/en/docs

use serde_json::Value;

use crate::model::{Coordinates, ExtractError, WeatherReading};
use crate::resolve::extract;

pub const OPEN_METEO_API_BASE: &str = "https://api.open-meteo.com/v1";

/// Kennedy Space Center, FL. SpaceX's primary launch facility.
pub const DEFAULT_LAUNCH_SITE: Coordinates = Coordinates {
    latitude: 28.5721,
    longitude: -80.6480,
};

/// Builds the forecast URL for current conditions at `site`.
///
/// Wind speed is requested in m/s; the API defaults to km/h.
pub fn build_current_url(base: &str, site: &Coordinates) -> String {
    format!(
        "{}/forecast?latitude={}&longitude={}&current=temperature_2m,wind_speed_10m&wind_speed_unit=ms",
        base.trim_end_matches('/'),
        site.latitude,
        site.longitude
    )
}

/// Extracts the current reading from a forecast response.
pub fn parse_current(payload: &Value) -> Result<WeatherReading, ExtractError> {
    Ok(WeatherReading {
        temperature_c: extract::number(payload, "current.temperature_2m")?,
        wind_speed_mps: extract::number(payload, "current.wind_speed_10m")?,
    })
}
