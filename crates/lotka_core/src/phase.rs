use crate::integrator::Trajectory;
use crate::model::{ModelParameters, State};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Axis-aligned region of the phase plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseWindow {
    pub prey_min: f64,
    pub prey_max: f64,
    pub predator_min: f64,
    pub predator_max: f64,
}

impl PhaseWindow {
    pub fn new(prey_min: f64, prey_max: f64, predator_min: f64, predator_max: f64) -> Self {
        Self {
            prey_min,
            prey_max,
            predator_min,
            predator_max,
        }
    }

    /// Bounding box of `trajectory` padded by 5% on each side.
    pub fn around(trajectory: &Trajectory) -> Self {
        let mut window = Self::new(f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
        for state in trajectory.states() {
            window.prey_min = window.prey_min.min(state.prey);
            window.prey_max = window.prey_max.max(state.prey);
            window.predator_min = window.predator_min.min(state.predator);
            window.predator_max = window.predator_max.max(state.predator);
        }
        let pad = |lo: f64, hi: f64| {
            let margin = ((hi - lo) * 0.05).max(1e-6);
            (lo - margin, hi + margin)
        };
        let (prey_min, prey_max) = pad(window.prey_min, window.prey_max);
        let (predator_min, predator_max) = pad(window.predator_min, window.predator_max);
        Self::new(prey_min, prey_max, predator_min, predator_max)
    }

    pub fn validate(&self) -> Result<()> {
        let bounds = [
            self.prey_min,
            self.prey_max,
            self.predator_min,
            self.predator_max,
        ];
        if bounds.iter().any(|v| !v.is_finite()) {
            bail!("Phase window bounds must be finite.");
        }
        if self.prey_min >= self.prey_max {
            bail!(
                "Prey range is empty ({} >= {}).",
                self.prey_min,
                self.prey_max
            );
        }
        if self.predator_min >= self.predator_max {
            bail!(
                "Predator range is empty ({} >= {}).",
                self.predator_min,
                self.predator_max
            );
        }
        Ok(())
    }

    fn contains_prey(&self, prey: f64) -> bool {
        (self.prey_min..=self.prey_max).contains(&prey)
    }

    fn contains_predator(&self, predator: f64) -> bool {
        (self.predator_min..=self.predator_max).contains(&predator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Prey,
    Predator,
}

/// A straight piece of the curve where one species' growth rate vanishes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Nullcline {
    /// Species whose derivative is zero along the segment.
    pub species: Species,
    pub start: State,
    pub end: State,
}

/// Nullclines clipped to `window`:
/// `dx/dt = 0` on `x = 0` and `y = α/β`, `dy/dt = 0` on `y = 0` and `x = γ/δ`.
pub fn nullclines(params: &ModelParameters, window: &PhaseWindow) -> Result<Vec<Nullcline>> {
    window.validate()?;

    let vertical = |species, prey: f64| Nullcline {
        species,
        start: State::new(prey, window.predator_min),
        end: State::new(prey, window.predator_max),
    };
    let horizontal = |species, predator: f64| Nullcline {
        species,
        start: State::new(window.prey_min, predator),
        end: State::new(window.prey_max, predator),
    };

    let center = params.coexistence_point();
    let mut lines = Vec::with_capacity(4);
    if window.contains_prey(0.0) {
        lines.push(vertical(Species::Prey, 0.0));
    }
    if window.contains_predator(center.predator) {
        lines.push(horizontal(Species::Prey, center.predator));
    }
    if window.contains_predator(0.0) {
        lines.push(horizontal(Species::Predator, 0.0));
    }
    if window.contains_prey(center.prey) {
        lines.push(vertical(Species::Predator, center.prey));
    }
    Ok(lines)
}

/// Upper bound on the grid size of a single direction field.
pub const MAX_FIELD_SAMPLES: usize = 250_000;

/// Vector field samples on a regular grid, flattened as `[x0, y0, x1, y1, ...]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionField {
    pub prey_samples: usize,
    pub predator_samples: usize,
    pub points: Vec<f64>,
    pub vectors: Vec<f64>,
}

/// Samples `(dx/dt, dy/dt)` on a `prey_samples` x `predator_samples` grid
/// spanning `window`, predator index varying slowest.
pub fn direction_field(
    params: &ModelParameters,
    window: &PhaseWindow,
    prey_samples: usize,
    predator_samples: usize,
) -> Result<DirectionField> {
    window.validate()?;
    if prey_samples < 2 || predator_samples < 2 {
        bail!("Direction field needs at least 2 samples per axis.");
    }

    let count = match prey_samples.checked_mul(predator_samples) {
        Some(count) if count <= MAX_FIELD_SAMPLES => count,
        _ => bail!(
            "Direction field grid {} x {} exceeds the limit of {} samples.",
            prey_samples,
            predator_samples,
            MAX_FIELD_SAMPLES
        ),
    };
    let mut points = Vec::with_capacity(2 * count);
    let mut vectors = Vec::with_capacity(2 * count);
    let dx = (window.prey_max - window.prey_min) / (prey_samples - 1) as f64;
    let dy = (window.predator_max - window.predator_min) / (predator_samples - 1) as f64;

    for j in 0..predator_samples {
        let predator = window.predator_min + j as f64 * dy;
        for i in 0..prey_samples {
            let prey = window.prey_min + i as f64 * dx;
            let (fx, fy) = params.derivative(State::new(prey, predator));
            points.extend_from_slice(&[prey, predator]);
            vectors.extend_from_slice(&[fx, fy]);
        }
    }

    Ok(DirectionField {
        prey_samples,
        predator_samples,
        points,
        vectors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::{integrate, Horizon};
    use crate::solvers::Method;
    use approx::assert_relative_eq;

    fn assert_err_contains<T: std::fmt::Debug>(result: anyhow::Result<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    #[test]
    fn nullclines_pass_through_coexistence_point() {
        let params = ModelParameters::new(1.0, 0.2, 1.0, 0.1);
        let window = PhaseWindow::new(-1.0, 30.0, -1.0, 20.0);
        let lines = nullclines(&params, &window).expect("valid window");
        assert_eq!(lines.len(), 4);

        for line in &lines {
            let mid = State::new(
                0.5 * (line.start.prey + line.end.prey),
                0.5 * (line.start.predator + line.end.predator),
            );
            let (fx, fy) = params.derivative(mid);
            match line.species {
                Species::Prey => assert_relative_eq!(fx, 0.0, epsilon = 1e-9),
                Species::Predator => assert_relative_eq!(fy, 0.0, epsilon = 1e-9),
            }
        }
    }

    #[test]
    fn nullclines_outside_window_are_dropped() {
        let params = ModelParameters::new(1.0, 0.2, 1.0, 0.1);
        // Coexistence point is (10, 5); neither axis nor the point is inside.
        let window = PhaseWindow::new(1.0, 8.0, 6.0, 9.0);
        let lines = nullclines(&params, &window).expect("valid window");
        assert!(lines.is_empty());
    }

    #[test]
    fn invalid_windows_are_rejected() {
        let params = ModelParameters::new(1.0, 1.0, 1.0, 1.0);
        assert_err_contains(
            nullclines(&params, &PhaseWindow::new(2.0, 1.0, 0.0, 1.0)),
            "Prey range is empty",
        );
        assert_err_contains(
            direction_field(&params, &PhaseWindow::new(0.0, 1.0, 0.0, f64::NAN), 4, 4),
            "finite",
        );
        assert_err_contains(
            direction_field(&params, &PhaseWindow::new(0.0, 1.0, 0.0, 1.0), 1, 4),
            "at least 2 samples",
        );
    }

    #[test]
    fn oversized_or_overflowing_grids_are_rejected() {
        let params = ModelParameters::new(1.0, 1.0, 1.0, 1.0);
        let window = PhaseWindow::new(0.0, 1.0, 0.0, 1.0);
        assert_err_contains(
            direction_field(&params, &window, usize::MAX / 2, 3),
            "exceeds the limit",
        );
        assert_err_contains(
            direction_field(&params, &window, 65_536, 65_536),
            "exceeds the limit",
        );
        let at_limit = direction_field(&params, &window, MAX_FIELD_SAMPLES / 2, 2)
            .expect("grid at the limit");
        assert_eq!(at_limit.points.len(), 2 * MAX_FIELD_SAMPLES);
    }

    #[test]
    fn direction_field_samples_grid_corners() {
        let params = ModelParameters::new(1.0, 1.0, 1.0, 1.0);
        let window = PhaseWindow::new(0.0, 2.0, 0.0, 4.0);
        let field = direction_field(&params, &window, 3, 5).expect("valid grid");

        assert_eq!(field.points.len(), 2 * 15);
        assert_eq!(field.vectors.len(), 2 * 15);
        assert_eq!(&field.points[..2], &[0.0, 0.0]);
        assert_eq!(&field.points[28..], &[2.0, 4.0]);
        // At (2, 4): dx = 2 - 8, dy = 8 - 4.
        assert_eq!(&field.vectors[28..], &[-6.0, 4.0]);
    }

    #[test]
    fn window_around_trajectory_contains_every_state() {
        let params = ModelParameters::new(1.0, 0.2, 1.0, 0.1);
        let trajectory = integrate(
            &params,
            State::new(5.0, 10.0),
            Horizon::new(20.0, 400),
            Method::Rk4,
        )
        .expect("valid inputs");
        let window = PhaseWindow::around(&trajectory);
        window.validate().expect("padded window is non-empty");
        for state in trajectory.states() {
            assert!(window.contains_prey(state.prey));
            assert!(window.contains_predator(state.predator));
        }
    }
}
