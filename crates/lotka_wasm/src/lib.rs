//! WASM bindings for the Lotka-Volterra explorer.
//!
//! The page keeps one [`WasmSession`] alive and feeds it every form change;
//! the free functions below are stateless helpers.

mod analysis;
mod session;

pub use session::WasmSession;

use lotka_core::config::{form_controls as core_form_controls, SimulationConfig};
use lotka_core::presets::presets as core_presets;
use session::{js_error, to_js};
use wasm_bindgen::prelude::*;

/// Runs one configuration and returns the full trajectory.
#[wasm_bindgen]
pub fn simulate(config: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let config: SimulationConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid configuration: {}", e)))?;
    let trajectory = config.run().map_err(js_error)?;
    to_js(&trajectory)
}

#[wasm_bindgen]
pub fn presets() -> Result<JsValue, JsValue> {
    to_js(&core_presets())
}

#[wasm_bindgen]
pub fn form_controls() -> Result<JsValue, JsValue> {
    to_js(&core_form_controls())
}
