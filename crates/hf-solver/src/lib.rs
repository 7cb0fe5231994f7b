//! Steady-state solver for a pump feeding a single pipe from a tank.
//!
//! Solving happens in two stages:
//! 1. Sweep the flow rate until the system curve meets the pump curve
//!    ([`find_operating_point`]).
//! 2. Rebuild the pressure at every mesh node for that flow
//!    ([`reconstruct_pressure`]).
//!
//! [`HydraulicSolver`] runs both and keeps the last [`Solution`].

pub mod config;
pub mod curves;
pub mod error;
pub mod operating_point;
pub mod pressure;
pub mod solve;

pub use config::{DEFAULT_FLOW_STEPS, FluidProperties, SolverConfig};
pub use curves::{CurveSample, sample_curves};
pub use error::{SolverError, SolverResult};
pub use operating_point::{
    OperatingPoint, PumpAttachment, find_operating_point, system_head, velocity, velocity_head,
};
pub use pressure::{PressureField, reconstruct_pressure};
pub use solve::{HydraulicSolver, Solution};
