use crate::error::SimulationError;
use crate::model::{LotkaVolterra, ModelParameters, State};
use crate::solvers::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Upper bound on the step count of a single run.
pub const MAX_STEPS: usize = 1_000_000;

/// Simulated time span split into `steps` equal increments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Horizon {
    pub duration: f64,
    pub steps: usize,
}

impl Horizon {
    pub fn new(duration: f64, steps: usize) -> Self {
        Self { duration, steps }
    }

    /// Picks the step count closest to `duration / step_size`, with at least one step.
    pub fn with_step_size(duration: f64, step_size: f64) -> Result<Self, SimulationError> {
        if !step_size.is_finite() || step_size <= 0.0 {
            return Err(SimulationError::horizon(format!(
                "step size must be a positive finite number, got {step_size}"
            )));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(SimulationError::horizon(format!(
                "duration must be a positive finite number, got {duration}"
            )));
        }
        let ratio = (duration / step_size).round();
        if ratio > MAX_STEPS as f64 {
            return Err(SimulationError::horizon(format!(
                "step size {step_size} needs more than {MAX_STEPS} steps"
            )));
        }
        Ok(Self::new(duration, (ratio as usize).max(1)))
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(SimulationError::horizon(format!(
                "duration must be a positive finite number, got {}",
                self.duration
            )));
        }
        if self.steps < 1 {
            return Err(SimulationError::horizon("at least one step is required"));
        }
        if self.steps > MAX_STEPS {
            return Err(SimulationError::horizon(format!(
                "step count {} exceeds the limit of {MAX_STEPS}",
                self.steps
            )));
        }
        Ok(())
    }

    pub fn step_size(&self) -> f64 {
        self.duration / self.steps as f64
    }
}

/// Discretized solution of one integration run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    times: Vec<f64>,
    states: Vec<State>,
    step_size: f64,
    method: Method,
}

impl Trajectory {
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Number of stored states, `steps + 1`.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn initial_state(&self) -> State {
        self.states[0]
    }

    pub fn final_state(&self) -> State {
        self.states[self.states.len() - 1]
    }

    pub fn prey(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.prey).collect()
    }

    pub fn predator(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.predator).collect()
    }

    /// `(prey, predator)` pairs for a phase-portrait plot.
    pub fn phase_points(&self) -> Vec<(f64, f64)> {
        self.states.iter().map(|s| (s.prey, s.predator)).collect()
    }

    pub fn has_negative_population(&self) -> bool {
        self.states.iter().any(|s| !s.is_non_negative())
    }

    /// Largest deviation of the first integral from its initial value.
    ///
    /// `None` when any state leaves the open positive quadrant.
    pub fn conserved_drift(&self, params: &ModelParameters) -> Option<f64> {
        let reference = params.conserved_quantity(self.initial_state())?;
        let mut drift = 0.0_f64;
        for state in &self.states {
            let value = params.conserved_quantity(*state)?;
            drift = drift.max((value - reference).abs());
        }
        Some(drift)
    }
}

/// Integrates the model from `initial` over `horizon` with a fixed step.
///
/// Inputs are validated in the order parameters, initial state, horizon. The
/// returned trajectory holds exactly `horizon.steps + 1` states, the first being
/// `initial`. Populations are never clamped: a negative value produced by a
/// coarse step is reported as computed.
pub fn integrate(
    params: &ModelParameters,
    initial: State,
    horizon: Horizon,
    method: Method,
) -> Result<Trajectory, SimulationError> {
    params.validate()?;
    initial.validate_initial()?;
    horizon.validate()?;

    let system = LotkaVolterra::from(params);
    let dt = horizon.step_size();
    debug!(
        steps = horizon.steps,
        step_size = dt,
        method = method.as_str(),
        "integrating Lotka-Volterra system"
    );

    let mut stepper = method.build::<f64>(2);
    let mut times = Vec::with_capacity(horizon.steps + 1);
    let mut states = Vec::with_capacity(horizon.steps + 1);
    let mut buffer = initial.to_array();
    let mut t = 0.0;

    times.push(0.0);
    states.push(initial);
    for i in 1..=horizon.steps {
        stepper.step(&system, &mut t, &mut buffer, dt);
        // Index-derived times keep the last sample exactly at the duration.
        times.push(if i == horizon.steps {
            horizon.duration
        } else {
            i as f64 * dt
        });
        states.push(State::from_array(buffer));
    }

    let trajectory = Trajectory {
        times,
        states,
        step_size: dt,
        method,
    };
    if trajectory.has_negative_population() {
        warn!(
            step_size = dt,
            method = method.as_str(),
            "trajectory left the non-negative quadrant; step size is likely too large"
        );
    }
    Ok(trajectory)
}
