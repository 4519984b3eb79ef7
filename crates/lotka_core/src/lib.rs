pub mod analysis;
pub mod chart;
pub mod config;
pub mod equilibrium;
pub mod error;
pub mod integrator;
pub mod model;
pub mod phase;
pub mod presets;
pub mod solvers;
/// The `lotka_core` crate is the numerical engine behind the Lotka-Volterra explorer.
/// Every entry point is a pure function of its inputs; the hosting page owns all
/// mutable state and calls back in whenever a form value changes.
///
/// Key components:
/// - **Integrator**: fixed-step RK4 or Euler integration producing an immutable `Trajectory`.
/// - **Model**: the predator-prey vector field, its Jacobian and conserved quantity.
/// - **Config / Presets**: the recognized form options, defaults and example scenarios.
/// - **Chart / Phase**: population series, phase portraits, nullclines and direction fields.
/// - **Equilibrium / Analysis**: fixed-point stability, trajectory summaries and period estimates.
pub mod traits;

pub use config::SimulationConfig;
pub use error::SimulationError;
pub use integrator::{integrate, Horizon, Trajectory};
pub use model::{ModelParameters, State};
pub use solvers::Method;
