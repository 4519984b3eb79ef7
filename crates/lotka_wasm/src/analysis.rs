//! Phase-plane and trajectory analysis exposed on the session.

use crate::session::{js_error, to_js, WasmSession};
use anyhow::Result;
use lotka_core::analysis::{estimate_period, summarize, TrajectorySummary};
use lotka_core::equilibrium::{equilibria, Equilibrium};
use lotka_core::phase::{direction_field, nullclines, DirectionField, Nullcline, PhaseWindow};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Summary payload; `period` is absent when fewer than two prey peaks exist.
#[derive(Serialize)]
pub(crate) struct SummaryPayload {
    summary: TrajectorySummary,
    period: Option<f64>,
}

impl WasmSession {
    pub(crate) fn summary_payload(&self) -> Result<SummaryPayload> {
        let trajectory = self.current()?;
        Ok(SummaryPayload {
            summary: summarize(trajectory),
            period: estimate_period(trajectory).ok(),
        })
    }

    pub(crate) fn equilibrium_points(&self) -> Vec<Equilibrium> {
        equilibria(&self.config.parameters())
    }

    /// An explicit window when all four bounds are given, otherwise one
    /// fitted around the current trajectory.
    pub(crate) fn resolve_window(&self, bounds: Option<[f64; 4]>) -> Result<PhaseWindow> {
        let window = match bounds {
            Some([prey_min, prey_max, predator_min, predator_max]) => {
                PhaseWindow::new(prey_min, prey_max, predator_min, predator_max)
            }
            None => PhaseWindow::around(self.current()?),
        };
        window.validate()?;
        Ok(window)
    }

    pub(crate) fn nullcline_segments(&self, bounds: Option<[f64; 4]>) -> Result<Vec<Nullcline>> {
        let window = self.resolve_window(bounds)?;
        nullclines(&self.config.parameters(), &window)
    }

    pub(crate) fn field_samples(
        &self,
        bounds: Option<[f64; 4]>,
        prey_samples: usize,
        predator_samples: usize,
    ) -> Result<DirectionField> {
        let window = self.resolve_window(bounds)?;
        direction_field(
            &self.config.parameters(),
            &window,
            prey_samples,
            predator_samples,
        )
    }
}

fn bounds_from(values: Vec<f64>) -> Result<Option<[f64; 4]>, JsValue> {
    match values.as_slice() {
        [] => Ok(None),
        [a, b, c, d] => Ok(Some([*a, *b, *c, *d])),
        _ => Err(JsValue::from_str(
            "Window must be empty or [prey_min, prey_max, predator_min, predator_max].",
        )),
    }
}

#[wasm_bindgen]
impl WasmSession {
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        let payload = self.summary_payload().map_err(js_error)?;
        to_js(&payload)
    }

    pub fn equilibria(&self) -> Result<JsValue, JsValue> {
        to_js(&self.equilibrium_points())
    }

    /// `window` is `[prey_min, prey_max, predator_min, predator_max]`, or empty
    /// to fit the current trajectory.
    pub fn nullclines(&self, window: Vec<f64>) -> Result<JsValue, JsValue> {
        let bounds = bounds_from(window)?;
        let lines = self.nullcline_segments(bounds).map_err(js_error)?;
        to_js(&lines)
    }

    pub fn direction_field(
        &self,
        window: Vec<f64>,
        prey_samples: u32,
        predator_samples: u32,
    ) -> Result<JsValue, JsValue> {
        let bounds = bounds_from(window)?;
        let field = self
            .field_samples(bounds, prey_samples as usize, predator_samples as usize)
            .map_err(js_error)?;
        to_js(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotka_core::equilibrium::Stability;

    #[test]
    fn summary_includes_period_once_several_cycles_fit() {
        let mut session = WasmSession::default();
        session.apply_preset("foxes-vs-hares").expect("known preset");
        let payload = session.summary_payload().expect("preset trajectory");
        assert!(payload.summary.prey.oscillates);
        assert!(payload.period.is_some());

        session.apply_option("duration", 1.0).expect("short run");
        let payload = session.summary_payload().expect("short trajectory");
        assert_eq!(payload.period, None);
    }

    #[test]
    fn equilibria_follow_current_parameters() {
        let mut session = WasmSession::default();
        session.apply_preset("foxes-vs-hares").expect("known preset");
        let points = session.equilibrium_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].stability, Stability::Saddle);
        assert_eq!(points[1].stability, Stability::Center);
        assert!((points[1].state.prey - 10.0).abs() < 1e-12);
        assert!((points[1].state.predator - 5.0).abs() < 1e-12);
    }

    #[test]
    fn fitted_window_contains_the_coexistence_nullclines() {
        let session = WasmSession::default();
        let lines = session.nullcline_segments(None).expect("fitted window");
        // The default orbit surrounds (1, 1) and touches both axes' padding.
        assert!(lines.len() >= 2);
    }

    #[test]
    fn explicit_window_is_validated() {
        let session = WasmSession::default();
        let err = session
            .field_samples(Some([1.0, 0.0, 0.0, 1.0]), 4, 4)
            .expect_err("empty prey range");
        assert!(err.to_string().contains("Prey range is empty"));

        let field = session
            .field_samples(Some([0.0, 1.0, 0.0, 1.0]), 3, 3)
            .expect("valid grid");
        assert_eq!(field.points.len(), 18);
    }

    #[test]
    fn oversized_field_request_is_an_error() {
        let session = WasmSession::default();
        let err = session
            .field_samples(Some([0.0, 1.0, 0.0, 1.0]), u32::MAX as usize, u32::MAX as usize)
            .expect_err("grid too large");
        assert!(err.to_string().contains("exceeds the limit"));
    }
}
