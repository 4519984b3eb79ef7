use crate::traits::{DynamicalSystem, Scalar, Steppable};
use serde::{Deserialize, Serialize};

/// Fixed-step integration scheme used to build a trajectory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Classic fourth-order Runge-Kutta.
    #[default]
    Rk4,
    /// First-order explicit Euler. Spirals outward on closed orbits.
    Euler,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Rk4 => "rk4",
            Method::Euler => "euler",
        }
    }

    pub(crate) fn build<T: Scalar>(self, dim: usize) -> Stepper<T> {
        match self {
            Method::Rk4 => Stepper::Rk4(RK4::new(dim)),
            Method::Euler => Stepper::Euler(ForwardEuler::new(dim)),
        }
    }
}

pub(crate) enum Stepper<T: Scalar> {
    Rk4(RK4<T>),
    Euler(ForwardEuler<T>),
}

impl<T: Scalar> Stepper<T> {
    pub(crate) fn step(
        &mut self,
        system: &impl DynamicalSystem<T>,
        t: &mut T,
        state: &mut [T],
        dt: T,
    ) {
        match self {
            Stepper::Rk4(s) => s.step(system, t, state, dt),
            Stepper::Euler(s) => s.step(system, t, state, dt),
        }
    }
}

/// Classic Runge-Kutta 4th order stepper with preallocated stage buffers.
pub struct RK4<T: Scalar> {
    k1: Vec<T>,
    k2: Vec<T>,
    k3: Vec<T>,
    k4: Vec<T>,
    tmp: Vec<T>,
}

impl<T: Scalar> RK4<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            k1: vec![T::zero(); dim],
            k2: vec![T::zero(); dim],
            k3: vec![T::zero(); dim],
            k4: vec![T::zero(); dim],
            tmp: vec![T::zero(); dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for RK4<T> {
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T) {
        let two = T::one() + T::one();
        let half = T::one() / two;
        let sixth = T::one() / (two + two + two);
        let t0 = *t;

        system.apply(t0, state, &mut self.k1);

        for (i, x) in state.iter().enumerate() {
            self.tmp[i] = *x + dt * half * self.k1[i];
        }
        system.apply(t0 + dt * half, &self.tmp, &mut self.k2);

        for (i, x) in state.iter().enumerate() {
            self.tmp[i] = *x + dt * half * self.k2[i];
        }
        system.apply(t0 + dt * half, &self.tmp, &mut self.k3);

        for (i, x) in state.iter().enumerate() {
            self.tmp[i] = *x + dt * self.k3[i];
        }
        system.apply(t0 + dt, &self.tmp, &mut self.k4);

        // y_next = y + dt/6 * (k1 + 2k2 + 2k3 + k4)
        for (i, x) in state.iter_mut().enumerate() {
            *x = *x + dt * sixth * (self.k1[i] + two * self.k2[i] + two * self.k3[i] + self.k4[i]);
        }

        *t = t0 + dt;
    }
}

/// Explicit Euler stepper: `y_next = y + dt * f(t, y)`.
pub struct ForwardEuler<T: Scalar> {
    slope: Vec<T>,
}

impl<T: Scalar> ForwardEuler<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            slope: vec![T::zero(); dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for ForwardEuler<T> {
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T) {
        system.apply(*t, state, &mut self.slope);
        for (x, dx) in state.iter_mut().zip(&self.slope) {
            *x = *x + dt * *dx;
        }
        *t = *t + dt;
    }
}
