use crate::integrator::Trajectory;
use anyhow::{bail, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub final_value: f64,
    pub time_of_max: f64,
    /// At least one interior turning point.
    pub oscillates: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectorySummary {
    pub prey: SpeciesSummary,
    pub predator: SpeciesSummary,
}

pub fn summarize(trajectory: &Trajectory) -> TrajectorySummary {
    TrajectorySummary {
        prey: summarize_series(trajectory.times(), &trajectory.prey()),
        predator: summarize_series(trajectory.times(), &trajectory.predator()),
    }
}

fn summarize_series(times: &[f64], values: &[f64]) -> SpeciesSummary {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut time_of_max = times[0];
    for (t, v) in times.iter().zip(values) {
        min = min.min(*v);
        if *v > max {
            max = *v;
            time_of_max = *t;
        }
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    SpeciesSummary {
        min,
        max,
        mean,
        final_value: values[values.len() - 1],
        time_of_max,
        oscillates: has_turning_point(values),
    }
}

fn has_turning_point(values: &[f64]) -> bool {
    let mut last_sign = 0.0_f64;
    for w in values.windows(2) {
        let diff = w[1] - w[0];
        if diff == 0.0 {
            continue;
        }
        let sign = diff.signum();
        if last_sign != 0.0 && sign != last_sign {
            return true;
        }
        last_sign = sign;
    }
    false
}

/// Indices of strict interior local maxima.
fn local_maxima(values: &[f64]) -> Vec<usize> {
    values
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[1] > w[0] && w[1] >= w[2])
        .map(|(i, _)| i + 1)
        .collect()
}

/// Mean spacing between successive prey peaks.
pub fn estimate_period(trajectory: &Trajectory) -> Result<f64> {
    let prey = trajectory.prey();
    let peaks = local_maxima(&prey);
    if peaks.len() < 2 {
        bail!(
            "Period estimate needs at least two prey peaks, found {}.",
            peaks.len()
        );
    }
    let times = trajectory.times();
    let first = times[peaks[0]];
    let last = times[peaks[peaks.len() - 1]];
    Ok((last - first) / (peaks.len() - 1) as f64)
}
