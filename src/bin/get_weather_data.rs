//! Fetch and store current weather at the launch site.
//!
//! Usage: get_weather_data
//!
//! Reads `latitude`/`longitude` from the program configuration (default
//! Kennedy Space Center) and writes the reading to
//! `scripts/api_data/weather_conditions.json`.

use std::process::ExitCode;

use rocket_specs_service::config;
use rocket_specs_service::ingest::fetch;
use rocket_specs_service::jobs::{self, WeatherJob};
use rocket_specs_service::logging::{self, Source};

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    logging::init_from_env();

    let site = config::load_launch_site(&config::config_path_from_env()).value;
    let job = WeatherJob::from_env(site);

    let client = match fetch::build_client() {
        Ok(client) => client,
        Err(e) => {
            logging::error(Source::System, None, &format!("Could not build HTTP client: {}", e));
            return ExitCode::FAILURE;
        }
    };

    match jobs::run_weather(&client, &job) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            logging::error(Source::OpenMeteo, None, &format!("Could not fetch weather data: {}", e));
            ExitCode::FAILURE
        }
    }
}
