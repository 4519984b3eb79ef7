//! Payloads handed to the charting layer.

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::integrator::Trajectory;
use serde::Serialize;

/// Window of the overview chart, independent of the configured duration.
pub const OVERVIEW_DURATION: f64 = 15.0;

/// Prey and predator populations over time, as aligned series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationSeries {
    pub title: String,
    pub times: Vec<f64>,
    pub prey: Vec<f64>,
    pub predator: Vec<f64>,
}

impl PopulationSeries {
    pub fn from_trajectory(trajectory: &Trajectory, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            times: trajectory.times().to_vec(),
            prey: trajectory.prey(),
            predator: trajectory.predator(),
        }
    }
}

/// Predator population plotted against prey population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhasePortrait {
    pub title: String,
    pub prey: Vec<f64>,
    pub predator: Vec<f64>,
}

impl PhasePortrait {
    pub fn from_trajectory(trajectory: &Trajectory, title: impl Into<String>) -> Self {
        let (prey, predator) = trajectory.phase_points().into_iter().unzip();
        Self {
            title: title.into(),
            prey,
            predator,
        }
    }
}

/// The three charts of the graphs page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphsView {
    pub overview: PopulationSeries,
    pub extended: PopulationSeries,
    pub phase: PhasePortrait,
}

/// Runs `config` twice: once over [`OVERVIEW_DURATION`] and once over its own duration.
pub fn graphs(config: &SimulationConfig) -> Result<GraphsView, SimulationError> {
    let extended = config.run()?;
    let overview = config.with_duration(OVERVIEW_DURATION).run()?;
    Ok(GraphsView {
        overview: PopulationSeries::from_trajectory(&overview, "Population Dynamics"),
        extended: PopulationSeries::from_trajectory(
            &extended,
            format!("Population Dynamics x{}", config.duration),
        ),
        phase: PhasePortrait::from_trajectory(&extended, "Phase Diagram"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::find_preset;

    #[test]
    fn series_are_aligned_with_trajectory() {
        let trajectory = SimulationConfig::default().run().expect("defaults");
        let series = PopulationSeries::from_trajectory(&trajectory, "t");
        assert_eq!(series.times.len(), trajectory.len());
        assert_eq!(series.prey.len(), trajectory.len());
        assert_eq!(series.predator.len(), trajectory.len());
        assert_eq!(series.prey[0], 5.0);
        assert_eq!(series.predator[0], 10.0);
    }

    #[test]
    fn phase_portrait_pairs_match_trajectory_states() {
        let trajectory = SimulationConfig::default().run().expect("defaults");
        let portrait = PhasePortrait::from_trajectory(&trajectory, "phase");
        let pairs: Vec<(f64, f64)> = portrait
            .prey
            .iter()
            .copied()
            .zip(portrait.predator.iter().copied())
            .collect();
        assert_eq!(pairs, trajectory.phase_points());
        assert_eq!(pairs[0], (5.0, 10.0));
    }

    #[test]
    fn graphs_use_fixed_overview_window_and_configured_duration() {
        let config = find_preset("foxes-vs-hares").expect("preset").config;
        let view = graphs(&config).expect("valid preset");

        assert_eq!(view.overview.times.last().copied(), Some(OVERVIEW_DURATION));
        assert_eq!(view.extended.times.last().copied(), Some(50.0));
        assert_eq!(view.extended.title, "Population Dynamics x50");
        assert_eq!(view.phase.prey, view.extended.prey);
        assert_eq!(view.overview.times.len(), config.steps + 1);
    }

    #[test]
    fn graphs_propagate_validation_errors() {
        let config = SimulationConfig {
            initial_predator: -2.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            graphs(&config),
            Err(SimulationError::InvalidInitialState { .. })
        ));
    }
}
