/// Fuel estimate registry.
///
/// The catalog does not always publish propellant load. When it is missing
/// we fall back to these rough totals for a few well-known vehicles, since
/// burn time and thrust-to-weight calculations downstream are meaningless
/// without some fuel figure. Keyed by the catalog's canonical spelling.

// ---------------------------------------------------------------------------
// Estimate metadata
// ---------------------------------------------------------------------------

/// An estimated total propellant load for one vehicle.
pub struct FuelEstimate {
    /// Canonical rocket name, exactly as the catalog spells it.
    pub rocket_name: &'static str,
    /// Estimated total propellant mass, in metric tons.
    pub fuel_tons: f64,
}

/// All vehicles with a fallback fuel estimate. Read-only for the lifetime
/// of the process.
pub static FUEL_ESTIMATES: &[FuelEstimate] = &[
    FuelEstimate {
        rocket_name: "Falcon 9",
        fuel_tons: 385.0, // first stage load; the upper stage adds ~90 t
    },
    FuelEstimate {
        rocket_name: "Starship",
        fuel_tons: 1200.0,
    },
    FuelEstimate {
        rocket_name: "Saturn V",
        fuel_tons: 2600.0,
    },
];

/// Looks up the estimate for a canonical rocket name. Exact, case-sensitive.
pub fn find_estimate(rocket_name: &str) -> Option<&'static FuelEstimate> {
    FUEL_ESTIMATES.iter().find(|e| e.rocket_name == rocket_name)
}

/// Estimated fuel load in tons, or `None` when the vehicle is not covered.
pub fn estimate_fuel_tons(rocket_name: &str) -> Option<f64> {
    find_estimate(rocket_name).map(|e| e.fuel_tons)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
