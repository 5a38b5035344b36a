use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Tax
// ---------------------------------------------------------------------------

#[napi]
pub fn stamp_duty(input_json: String) -> NapiResult<String> {
    let input: property_sim_core::tax::stamp_duty::StampDutyInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        property_sim_core::tax::stamp_duty::assess_stamp_duty(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Mortgage
// ---------------------------------------------------------------------------

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: property_sim_core::mortgage::amortization::MortgageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = property_sim_core::mortgage::amortization::build_amortization_schedule(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[napi]
pub fn run_simulation(input_json: String) -> NapiResult<String> {
    let input: property_sim_core::simulation::engine::SimulationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = property_sim_core::simulation::engine::run_simulation(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
