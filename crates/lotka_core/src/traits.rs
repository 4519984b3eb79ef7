use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// Numeric type the vector fields and steppers are written against.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// An autonomous or time-dependent vector field `dx/dt = f(t, x)`.
pub trait DynamicalSystem<T: Scalar> {
    /// Number of state components.
    fn dimension(&self) -> usize;

    /// Writes `f(t, x)` into `out`. Both slices have length `dimension()`.
    fn apply(&self, t: T, x: &[T], out: &mut [T]);
}

/// A fixed-step scheme that advances a state in place.
pub trait Steppable<T: Scalar> {
    /// Advances `state` from `t` to `t + dt` and updates `t`.
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T);
}
