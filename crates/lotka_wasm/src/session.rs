//! Session object owning the page's current configuration and result.

use anyhow::{anyhow, Result};
use js_sys::Float64Array;
use lotka_core::chart::{graphs, PhasePortrait, PopulationSeries};
use lotka_core::config::{ConfigOption, SimulationConfig};
use lotka_core::presets::find_preset;
use lotka_core::{SimulationError, Trajectory};
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use tracing::debug;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmSession {
    pub(crate) config: SimulationConfig,
    pub(crate) trajectory: Option<Trajectory>,
}

impl Default for WasmSession {
    fn default() -> Self {
        let config = SimulationConfig::default();
        let trajectory = config.run().ok();
        Self { config, trajectory }
    }
}

pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

pub(crate) fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

impl WasmSession {
    /// Recomputes with `config`. On failure the previous config and
    /// trajectory stay in place.
    pub(crate) fn apply(&mut self, config: SimulationConfig) -> Result<(), SimulationError> {
        match config.run() {
            Ok(trajectory) => {
                debug!(states = trajectory.len(), "session recomputed trajectory");
                self.config = config;
                self.trajectory = Some(trajectory);
                Ok(())
            }
            Err(err) => {
                debug!(error = %err, "session rejected configuration");
                Err(err)
            }
        }
    }

    pub(crate) fn apply_option(&mut self, name: &str, value: f64) -> Result<()> {
        let option: ConfigOption = name.parse()?;
        let mut next = self.config;
        next.set(option, value)?;
        self.apply(next)?;
        Ok(())
    }

    pub(crate) fn apply_preset(&mut self, name: &str) -> Result<()> {
        let preset = find_preset(name).ok_or_else(|| anyhow!("Unknown preset `{}`.", name))?;
        self.apply(preset.config)?;
        Ok(())
    }

    pub(crate) fn current(&self) -> Result<&Trajectory> {
        self.trajectory
            .as_ref()
            .ok_or_else(|| anyhow!("No valid trajectory has been computed yet."))
    }
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSession {
        console_error_panic_hook::set_once();
        WasmSession::default()
    }

    /// Replaces the whole configuration. Missing fields take their defaults.
    pub fn update(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: SimulationConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid configuration: {}", e)))?;
        self.apply(config).map_err(js_error)
    }

    /// Changes a single form field by its option name.
    pub fn set_option(&mut self, name: &str, value: f64) -> Result<(), JsValue> {
        self.apply_option(name, value).map_err(js_error)
    }

    pub fn load_preset(&mut self, name: &str) -> Result<(), JsValue> {
        self.apply_preset(name).map_err(js_error)
    }

    pub fn config(&self) -> Result<JsValue, JsValue> {
        to_js(&self.config)
    }

    pub fn has_trajectory(&self) -> bool {
        self.trajectory.is_some()
    }

    pub fn times(&self) -> Result<Float64Array, JsValue> {
        let trajectory = self.current().map_err(js_error)?;
        Ok(Float64Array::from(trajectory.times()))
    }

    pub fn prey(&self) -> Result<Float64Array, JsValue> {
        let trajectory = self.current().map_err(js_error)?;
        Ok(Float64Array::from(trajectory.prey().as_slice()))
    }

    pub fn predator(&self) -> Result<Float64Array, JsValue> {
        let trajectory = self.current().map_err(js_error)?;
        Ok(Float64Array::from(trajectory.predator().as_slice()))
    }

    pub fn trajectory(&self) -> Result<JsValue, JsValue> {
        to_js(self.current().map_err(js_error)?)
    }

    pub fn population_series(&self) -> Result<JsValue, JsValue> {
        let trajectory = self.current().map_err(js_error)?;
        to_js(&PopulationSeries::from_trajectory(
            trajectory,
            "Population Dynamics",
        ))
    }

    pub fn phase_portrait(&self) -> Result<JsValue, JsValue> {
        let trajectory = self.current().map_err(js_error)?;
        to_js(&PhasePortrait::from_trajectory(trajectory, "Phase Diagram"))
    }

    /// Overview, extended and phase charts for the current configuration.
    pub fn graphs(&self) -> Result<JsValue, JsValue> {
        let view = graphs(&self.config).map_err(js_error)?;
        to_js(&view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotka_core::{Method, State};

    #[test]
    fn new_session_holds_default_trajectory() {
        let session = WasmSession::default();
        assert!(session.has_trajectory());
        let trajectory = session.current().expect("default run");
        assert_eq!(trajectory.len(), SimulationConfig::default().steps + 1);
    }

    #[test]
    fn invalid_config_keeps_last_valid_trajectory() {
        let mut session = WasmSession::default();
        let before = session.current().expect("default run").clone();

        let bad = SimulationConfig {
            growth_rate: 0.0,
            ..SimulationConfig::default()
        };
        let err = session.apply(bad).expect_err("zero growth rate");
        assert!(matches!(err, SimulationError::InvalidParameter { .. }));

        assert_eq!(session.config, SimulationConfig::default());
        assert_eq!(session.current().expect("kept"), &before);
    }

    #[test]
    fn option_update_recomputes() {
        let mut session = WasmSession::default();
        session
            .apply_option("initial_prey", 12.0)
            .expect("valid population");
        session.apply_option("steps", 40.0).expect("valid steps");

        let trajectory = session.current().expect("recomputed");
        assert_eq!(trajectory.initial_state(), State::new(12.0, 10.0));
        assert_eq!(trajectory.len(), 41);
    }

    #[test]
    fn option_errors_are_reported_without_recomputing() {
        let mut session = WasmSession::default();

        let err = session
            .apply_option("initial_predator", -1.0)
            .expect_err("negative population");
        assert!(err.to_string().contains("initial_predator"));

        let err = session.apply_option("alpha", 1.0).expect_err("unknown name");
        assert!(err.to_string().contains("Unknown configuration option"));

        assert_eq!(session.config, SimulationConfig::default());
    }

    #[test]
    fn preset_load_replaces_config() {
        let mut session = WasmSession::default();
        session.apply_preset("Wolves vs Elk").expect("known preset");
        assert_eq!(session.config.duration, 200.0);
        assert_eq!(session.config.method, Method::Rk4);
        assert_eq!(
            session.current().expect("recomputed").initial_state(),
            State::new(10.0, 10.0)
        );

        let err = session.apply_preset("sharks").expect_err("unknown preset");
        assert!(err.to_string().contains("Unknown preset"));
        assert_eq!(session.config.duration, 200.0);
    }
}
