//! Fetch and store the specification of the configured rocket.
//!
//! Usage: get_rocket_specs
//!
//! Reads `rocket_name` from the program configuration (default
//! "Falcon 9"), resolves it against the SpaceX catalog and writes the
//! normalized spec to `scripts/api_data/rocket_specs.json`.

use std::process::ExitCode;

use rocket_specs_service::config;
use rocket_specs_service::ingest::fetch;
use rocket_specs_service::jobs::{self, JobError, RocketSpecsJob};
use rocket_specs_service::logging::{self, Source};

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    logging::init_from_env();

    let rocket_name = config::load_rocket_name(&config::config_path_from_env()).value;
    let job = RocketSpecsJob::from_env(rocket_name);

    let client = match fetch::build_client() {
        Ok(client) => client,
        Err(e) => {
            logging::error(Source::System, None, &format!("Could not build HTTP client: {}", e));
            return ExitCode::FAILURE;
        }
    };

    match jobs::run_rocket_specs(&client, &job) {
        Ok(_) => ExitCode::SUCCESS,
        Err(JobError::Fetch(_)) => {
            logging::error(Source::SpaceX, None, "Could not fetch rocket data. No specs available.");
            ExitCode::FAILURE
        }
        Err(e) => {
            logging::error(Source::SpaceX, Some(&job.rocket_name), &e.to_string());
            logging::error(Source::SpaceX, None, "Rocket specs not found. Investigation required.");
            ExitCode::FAILURE
        }
    }
}
