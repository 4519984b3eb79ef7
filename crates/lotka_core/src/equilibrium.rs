use crate::model::{ModelParameters, State};
use nalgebra::Matrix2;
use num_complex::Complex;
use serde::Serialize;
use std::f64::consts::PI;

const EIGEN_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EquilibriumKind {
    Extinction,
    Coexistence,
}

/// Linear stability type read off the Jacobian eigenvalues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    Saddle,
    Center,
    StableNode,
    UnstableNode,
    StableFocus,
    UnstableFocus,
    Degenerate,
}

#[derive(Debug, Clone, Serialize)]
pub struct Equilibrium {
    pub kind: EquilibriumKind,
    pub state: State,
    /// Row-major 2x2 Jacobian.
    pub jacobian: Vec<f64>,
    pub eigenvalues: Vec<Complex<f64>>,
    pub stability: Stability,
    /// Period of small oscillations, `2π / ω`, when the point is a center.
    pub linear_period: Option<f64>,
}

/// Both fixed points of the model: total extinction and coexistence.
///
/// `params` is expected to be valid; see [`ModelParameters::validate`].
pub fn equilibria(params: &ModelParameters) -> Vec<Equilibrium> {
    vec![
        analyze(params, EquilibriumKind::Extinction, State::EXTINCT),
        analyze(
            params,
            EquilibriumKind::Coexistence,
            params.coexistence_point(),
        ),
    ]
}

fn analyze(params: &ModelParameters, kind: EquilibriumKind, state: State) -> Equilibrium {
    let jacobian = params.jacobian(state);
    let eigenvalues = eigenvalues(&jacobian);
    let stability = classify(&eigenvalues);
    let linear_period = match stability {
        Stability::Center => eigenvalues
            .iter()
            .map(|l| l.im.abs())
            .find(|w| *w > EIGEN_TOLERANCE)
            .map(|w| 2.0 * PI / w),
        _ => None,
    };

    Equilibrium {
        kind,
        state,
        jacobian: jacobian.to_vec(),
        eigenvalues,
        stability,
        linear_period,
    }
}

fn eigenvalues(jacobian: &[f64; 4]) -> Vec<Complex<f64>> {
    let matrix = Matrix2::from_row_slice(jacobian);
    let mut values: Vec<Complex<f64>> = matrix.complex_eigenvalues().iter().copied().collect();
    // Stable order: larger real part first, then positive imaginary part first.
    values.sort_by(|a, b| {
        b.re.partial_cmp(&a.re)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.im.partial_cmp(&a.im).unwrap_or(std::cmp::Ordering::Equal))
    });
    values
}

fn classify(eigenvalues: &[Complex<f64>]) -> Stability {
    let scale = eigenvalues
        .iter()
        .map(|l| l.norm())
        .fold(1.0_f64, f64::max);
    let tol = EIGEN_TOLERANCE * scale;
    let complex = eigenvalues.iter().any(|l| l.im.abs() > tol);
    let positive = eigenvalues.iter().filter(|l| l.re > tol).count();
    let negative = eigenvalues.iter().filter(|l| l.re < -tol).count();
    let n = eigenvalues.len();

    if complex {
        if positive == 0 && negative == 0 {
            Stability::Center
        } else if negative == n {
            Stability::StableFocus
        } else if positive == n {
            Stability::UnstableFocus
        } else {
            Stability::Degenerate
        }
    } else if positive > 0 && negative > 0 {
        Stability::Saddle
    } else if negative == n {
        Stability::StableNode
    } else if positive == n {
        Stability::UnstableNode
    } else {
        Stability::Degenerate
    }
}
