//! WASM bindings for running simulations in the browser

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::strategy::describe_strategy;
use crate::{Simulation, SimConfig, StatusReport, Strategy, PAYOFF_MATRIX};

#[derive(serde::Serialize)]
struct SimulationResult {
    report: StatusReport,
    epochs_run: u64,
    matches_played: u64,
}

/// Run a simulation to completion
///
/// # Arguments
/// * `config_json` - JSON serialized SimConfig; missing fields take defaults
///
/// # Returns
/// `{report, epochs_run, matches_played}` with the final StatusReport
#[wasm_bindgen]
pub fn run_simulation(config_json: &str) -> Result<JsValue, JsError> {
    let config = SimConfig::from_json(config_json)
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;

    let mut simulation = Simulation::new(config)
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;
    let summary = simulation.run_to_end().clone();

    let result = SimulationResult {
        report: StatusReport::from_population(simulation.population()),
        epochs_run: summary.epochs_run,
        matches_played: summary.matches_played,
    };

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

#[derive(serde::Serialize)]
struct StrategyInfo {
    id: String,
    name: String,
    description: String,
}

/// Get all available strategies, in population construction order
#[wasm_bindgen]
pub fn get_strategy_types() -> Result<JsValue, JsError> {
    let types: Vec<StrategyInfo> = Strategy::ALL
        .into_iter()
        .map(|s| StrategyInfo {
            id: format!("{:?}", s),
            name: s.name().to_string(),
            description: describe_strategy(s).to_string(),
        })
        .collect();

    serde_wasm_bindgen::to_value(&types)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

#[derive(serde::Serialize)]
struct PayoffEntry {
    move_a: u8,
    move_b: u8,
    delta_a: i64,
    delta_b: i64,
}

/// Get the payoff matrix as `[{move_a, move_b, delta_a, delta_b}]`
#[wasm_bindgen]
pub fn get_payoff_matrix() -> Result<JsValue, JsError> {
    let entries: Vec<PayoffEntry> = PAYOFF_MATRIX
        .into_iter()
        .map(|(a, b, delta_a, delta_b)| PayoffEntry {
            move_a: a.as_bit(),
            move_b: b.as_bit(),
            delta_a,
            delta_b,
        })
        .collect();

    serde_wasm_bindgen::to_value(&entries)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Get human-readable description of a strategy by report name (e.g. "hitback")
#[wasm_bindgen]
pub fn get_strategy_description(name: &str) -> Result<String, JsError> {
    let strategy = Strategy::from_name(name)
        .ok_or_else(|| JsError::new(&format!("Unknown strategy: {}", name)))?;
    Ok(describe_strategy(strategy).to_string())
}
