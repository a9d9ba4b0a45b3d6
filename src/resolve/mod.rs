/// Rocket name resolution and specification normalization.
///
/// Turns an approximate, human-entered rocket name plus a fetched catalog
/// into one `RocketSpec`: pick the closest catalog name, take the first
/// record with that exact name, then flatten and convert its fields.
///
/// Submodules:
/// - `similarity`: sequence-alignment string similarity and best match.
/// - `extract`: typed dotted-path access into raw JSON records.
/// - `fuel`: fallback propellant estimates for well-known vehicles.

pub mod extract;
pub mod fuel;
pub mod similarity;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::ingest::spacex::Catalog;
use crate::model::{BurnTimes, ExtractError, FuelMass, KILONEWTONS_TO_NEWTONS, ResolveError, RocketSpec};

pub use similarity::DEFAULT_CUTOFF as MATCH_CUTOFF;

/// Resolve `desired_name` against `catalog` and normalize the matched record.
///
/// Returns `ResolveError::NotFound` when no catalog name scores at least
/// `MATCH_CUTOFF`, and `ResolveError::Malformed` when the catalog or the
/// matched record is missing a field we persist.
pub fn resolve(desired_name: &str, catalog: &Catalog) -> Result<RocketSpec, ResolveError> {
    let entries = catalog.entries()?;
    let names: Vec<&str> = entries.iter().map(|(name, _)| *name).collect();

    let position = similarity::best_match_index(desired_name, &names, MATCH_CUTOFF).ok_or_else(|| {
        ResolveError::NotFound {
            name: desired_name.to_string(),
        }
    })?;
    let (canonical, record) = entries[position];

    Ok(normalize(record, canonical)?)
}

/// Flatten one raw catalog record into a `RocketSpec`.
///
/// `canonical_name` selects the fallback fuel estimate when the record does
/// not publish `first_stage.fuel_amount_tons`.
pub fn normalize(record: &Value, canonical_name: &str) -> Result<RocketSpec, ExtractError> {
    let fuel_tons = extract::optional_number(record, "first_stage.fuel_amount_tons")?
        .or_else(|| fuel::estimate_fuel_tons(canonical_name));

    Ok(RocketSpec {
        name: extract::string(record, "name")?,
        rocket_type: extract::string(record, "type")?,
        height_m: extract::number(record, "height.meters")?,
        diameter_m: extract::number(record, "diameter.meters")?,
        mass_kg: extract::number(record, "mass.kg")?,
        stages: extract::count(record, "stages")?,
        boosters: extract::count(record, "boosters")?,
        cost_per_launch: extract::number(record, "cost_per_launch")?,
        success_rate_pct: extract::number(record, "success_rate_pct")?,
        first_flight: extract::string(record, "first_flight")?,
        company: extract::string(record, "company")?,
        country: extract::string(record, "country")?,
        thrust_n: extract::number(record, "engines.thrust_sea_level.kN")? * KILONEWTONS_TO_NEWTONS,
        thrust_vacuum_n: extract::number(record, "engines.thrust_vacuum.kN")? * KILONEWTONS_TO_NEWTONS,
        isp_sea_level: extract::number(record, "engines.isp.sea_level")?,
        isp_vacuum: extract::number(record, "engines.isp.vacuum")?,
        fuel_kg: FuelMass::from_tons(fuel_tons),
        engine_type: extract::string(record, "engines.type")?,
        engine_version: extract::string(record, "engines.version")?,
        engine_count: extract::count(record, "engines.number")?,
        payload_weights: payload_weights(record)?,
        landing_legs: extract::count(record, "landing_legs.number")?,
        reusable: extract::boolean(record, "first_stage.reusable")?,
        burn_time_sec: BurnTimes {
            first_stage: extract::nullable_number(record, "first_stage.burn_time_sec")?,
            second_stage: extract::nullable_number(record, "second_stage.burn_time_sec")?,
        },
        flickr_images: extract::string_list(record, "flickr_images")?,
        wikipedia: extract::string(record, "wikipedia")?,
        description: extract::string(record, "description")?,
    })
}

/// `[{name, kg}, ...]` to `{name: kg}`. A repeated name keeps the later value.
fn payload_weights(record: &Value) -> Result<BTreeMap<String, f64>, ExtractError> {
    let mut weights = BTreeMap::new();
    for (i, entry) in extract::array(record, "payload_weights")?.iter().enumerate() {
        let at = |field: &str| format!("payload_weights[{}].{}", i, field);
        let name = extract::string(entry, "name").map_err(|e| reroot(e, &at("name")))?;
        let kg = extract::number(entry, "kg").map_err(|e| reroot(e, &at("kg")))?;
        weights.insert(name, kg);
    }
    Ok(weights)
}

/// Reports an error found inside an array element against the full path.
fn reroot(err: ExtractError, path: &str) -> ExtractError {
    match err {
        ExtractError::MissingField { .. } => ExtractError::MissingField { path: path.to_string() },
        ExtractError::WrongType { expected, found, .. } => ExtractError::WrongType {
            path: path.to_string(),
            expected,
            found,
        },
    }
}
