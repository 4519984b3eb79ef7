//! The Lotka-Volterra vector field and the quantities derived from it.
//!
//! ```text
//! dx/dt = α·x − β·x·y
//! dy/dt = δ·x·y − γ·y
//! ```
//!
//! `x` is the prey population and `y` the predator population.

use crate::error::SimulationError;
use crate::traits::{DynamicalSystem, Scalar};
use serde::{Deserialize, Serialize};

/// Rate constants of the model. All four must be strictly positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// α: prey growth rate in the absence of predators.
    pub growth_rate: f64,
    /// β: prey loss per predator encounter.
    pub predation_rate: f64,
    /// γ: predator death rate in the absence of prey.
    pub death_rate: f64,
    /// δ: predator growth per prey encounter.
    pub efficiency_rate: f64,
}

impl ModelParameters {
    pub fn new(growth_rate: f64, predation_rate: f64, death_rate: f64, efficiency_rate: f64) -> Self {
        Self {
            growth_rate,
            predation_rate,
            death_rate,
            efficiency_rate,
        }
    }

    /// Checks α, β, γ, δ in that order and reports the first offending field.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let fields = [
            ("growth_rate", self.growth_rate),
            ("predation_rate", self.predation_rate),
            ("death_rate", self.death_rate),
            ("efficiency_rate", self.efficiency_rate),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimulationError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }

    /// Returns `(dx/dt, dy/dt)` at `state`.
    pub fn derivative(&self, state: State) -> (f64, f64) {
        let interaction = state.prey * state.predator;
        (
            self.growth_rate * state.prey - self.predation_rate * interaction,
            self.efficiency_rate * interaction - self.death_rate * state.predator,
        )
    }

    /// Row-major 2x2 Jacobian of the vector field at `state`.
    pub fn jacobian(&self, state: State) -> [f64; 4] {
        let State { prey, predator } = state;
        [
            self.growth_rate - self.predation_rate * predator,
            -self.predation_rate * prey,
            self.efficiency_rate * predator,
            self.efficiency_rate * prey - self.death_rate,
        ]
    }

    /// First integral `H = δ·x − γ·ln x + β·y − α·ln y` of the continuous system.
    ///
    /// Only defined in the open positive quadrant; returns `None` elsewhere.
    pub fn conserved_quantity(&self, state: State) -> Option<f64> {
        if !(state.prey > 0.0 && state.predator > 0.0) {
            return None;
        }
        Some(
            self.efficiency_rate * state.prey - self.death_rate * state.prey.ln()
                + self.predation_rate * state.predator
                - self.growth_rate * state.predator.ln(),
        )
    }

    /// The non-trivial fixed point `(γ/δ, α/β)`.
    pub fn coexistence_point(&self) -> State {
        State::new(
            self.death_rate / self.efficiency_rate,
            self.growth_rate / self.predation_rate,
        )
    }
}

/// Prey and predator populations at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub prey: f64,
    pub predator: f64,
}

impl State {
    pub const EXTINCT: State = State {
        prey: 0.0,
        predator: 0.0,
    };

    pub fn new(prey: f64, predator: f64) -> Self {
        Self { prey, predator }
    }

    /// Initial populations must be finite and non-negative.
    pub fn validate_initial(&self) -> Result<(), SimulationError> {
        for (name, value) in [("initial_prey", self.prey), ("initial_predator", self.predator)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidInitialState { name, value });
            }
        }
        Ok(())
    }

    pub fn is_non_negative(&self) -> bool {
        self.prey >= 0.0 && self.predator >= 0.0
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.prey, self.predator]
    }

    pub(crate) fn from_array([prey, predator]: [f64; 2]) -> Self {
        Self::new(prey, predator)
    }
}

/// [`ModelParameters`] lifted into the generic stepping machinery.
#[derive(Debug, Clone, Copy)]
pub struct LotkaVolterra<T: Scalar> {
    alpha: T,
    beta: T,
    gamma: T,
    delta: T,
}

impl<T: Scalar> LotkaVolterra<T> {
    /// Returns `None` if a rate cannot be represented in `T`.
    pub fn new(params: &ModelParameters) -> Option<Self> {
        Some(Self {
            alpha: T::from_f64(params.growth_rate)?,
            beta: T::from_f64(params.predation_rate)?,
            gamma: T::from_f64(params.death_rate)?,
            delta: T::from_f64(params.efficiency_rate)?,
        })
    }
}

impl<T: Scalar> DynamicalSystem<T> for LotkaVolterra<T> {
    fn dimension(&self) -> usize {
        2
    }

    fn apply(&self, _t: T, x: &[T], out: &mut [T]) {
        let interaction = x[0] * x[1];
        out[0] = self.alpha * x[0] - self.beta * interaction;
        out[1] = self.delta * interaction - self.gamma * x[1];
    }
}

impl From<&ModelParameters> for LotkaVolterra<f64> {
    fn from(params: &ModelParameters) -> Self {
        Self {
            alpha: params.growth_rate,
            beta: params.predation_rate,
            gamma: params.death_rate,
            delta: params.efficiency_rate,
        }
    }
}
