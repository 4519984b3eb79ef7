use crate::error::{SimulationError, UnknownOption};
use crate::integrator::{integrate, Horizon, Trajectory};
use crate::model::{ModelParameters, State};
use crate::solvers::Method;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Everything the form controls can set. Missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub growth_rate: f64,
    pub predation_rate: f64,
    pub death_rate: f64,
    pub efficiency_rate: f64,
    pub initial_prey: f64,
    pub initial_predator: f64,
    pub duration: f64,
    pub steps: usize,
    pub method: Method,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            growth_rate: 0.1,
            predation_rate: 0.1,
            death_rate: 0.1,
            efficiency_rate: 0.1,
            initial_prey: 5.0,
            initial_predator: 10.0,
            duration: 100.0,
            steps: 500,
            method: Method::Rk4,
        }
    }
}

impl SimulationConfig {
    pub fn parameters(&self) -> ModelParameters {
        ModelParameters::new(
            self.growth_rate,
            self.predation_rate,
            self.death_rate,
            self.efficiency_rate,
        )
    }

    pub fn initial_state(&self) -> State {
        State::new(self.initial_prey, self.initial_predator)
    }

    pub fn horizon(&self) -> Horizon {
        Horizon::new(self.duration, self.steps)
    }

    /// Same config over a different duration, keeping the step count.
    pub fn with_duration(&self, duration: f64) -> Self {
        Self { duration, ..*self }
    }

    pub fn run(&self) -> Result<Trajectory, SimulationError> {
        integrate(
            &self.parameters(),
            self.initial_state(),
            self.horizon(),
            self.method,
        )
    }

    /// Updates one numeric field. Only `steps` is checked here; everything
    /// else is validated by [`SimulationConfig::run`].
    pub fn set(&mut self, option: ConfigOption, value: f64) -> Result<(), SimulationError> {
        match option {
            ConfigOption::GrowthRate => self.growth_rate = value,
            ConfigOption::PredationRate => self.predation_rate = value,
            ConfigOption::DeathRate => self.death_rate = value,
            ConfigOption::EfficiencyRate => self.efficiency_rate = value,
            ConfigOption::InitialPrey => self.initial_prey = value,
            ConfigOption::InitialPredator => self.initial_predator = value,
            ConfigOption::Duration => self.duration = value,
            ConfigOption::Steps => {
                if !value.is_finite() || value < 1.0 || value.fract() != 0.0 {
                    return Err(SimulationError::horizon(format!(
                        "steps must be a whole number of at least 1, got {value}"
                    )));
                }
                self.steps = value as usize;
            }
        }
        Ok(())
    }

    pub fn get(&self, option: ConfigOption) -> f64 {
        match option {
            ConfigOption::GrowthRate => self.growth_rate,
            ConfigOption::PredationRate => self.predation_rate,
            ConfigOption::DeathRate => self.death_rate,
            ConfigOption::EfficiencyRate => self.efficiency_rate,
            ConfigOption::InitialPrey => self.initial_prey,
            ConfigOption::InitialPredator => self.initial_predator,
            ConfigOption::Duration => self.duration,
            ConfigOption::Steps => self.steps as f64,
        }
    }
}

/// Names of the numeric configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigOption {
    GrowthRate,
    PredationRate,
    DeathRate,
    EfficiencyRate,
    InitialPrey,
    InitialPredator,
    Duration,
    Steps,
}

impl ConfigOption {
    pub const ALL: [ConfigOption; 8] = [
        ConfigOption::GrowthRate,
        ConfigOption::PredationRate,
        ConfigOption::DeathRate,
        ConfigOption::EfficiencyRate,
        ConfigOption::InitialPrey,
        ConfigOption::InitialPredator,
        ConfigOption::Duration,
        ConfigOption::Steps,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigOption::GrowthRate => "growth_rate",
            ConfigOption::PredationRate => "predation_rate",
            ConfigOption::DeathRate => "death_rate",
            ConfigOption::EfficiencyRate => "efficiency_rate",
            ConfigOption::InitialPrey => "initial_prey",
            ConfigOption::InitialPredator => "initial_predator",
            ConfigOption::Duration => "duration",
            ConfigOption::Steps => "steps",
        }
    }
}

impl fmt::Display for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigOption {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigOption::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| UnknownOption(s.to_string()))
    }
}

/// Metadata for one form control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormControl {
    pub option: ConfigOption,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

/// Form controls in display order. Ranges are slider hints and are not enforced.
pub fn form_controls() -> Vec<FormControl> {
    let defaults = SimulationConfig::default();
    let rate = |option, label| FormControl {
        option,
        label,
        min: 0.01,
        max: 2.0,
        step: 0.01,
        default: defaults.get(option),
    };
    let population = |option, label| FormControl {
        option,
        label,
        min: 1.0,
        max: 20.0,
        step: 1.0,
        default: defaults.get(option),
    };

    vec![
        rate(ConfigOption::GrowthRate, "Prey growth rate (α)"),
        rate(ConfigOption::PredationRate, "Predation rate (β)"),
        rate(ConfigOption::DeathRate, "Predator death rate (γ)"),
        rate(ConfigOption::EfficiencyRate, "Predator efficiency rate (δ)"),
        population(ConfigOption::InitialPrey, "Initial prey (x₀)"),
        population(ConfigOption::InitialPredator, "Initial predators (y₀)"),
        FormControl {
            option: ConfigOption::Duration,
            label: "Duration",
            min: 1.0,
            max: 500.0,
            step: 1.0,
            default: defaults.duration,
        },
        FormControl {
            option: ConfigOption::Steps,
            label: "Steps",
            min: 10.0,
            max: 5000.0,
            step: 10.0,
            default: defaults.steps as f64,
        },
    ]
}
