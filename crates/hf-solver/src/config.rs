//! Solver configuration.

use crate::error::{SolverError, SolverResult};
use hf_core::units::{Accel, Density, KinVisc, Length, constants, kgpm3, m, m2ps};

/// Default number of flow increments in the operating-point sweep.
pub const DEFAULT_FLOW_STEPS: usize = 1000;

/// Properties of the pumped liquid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidProperties {
    pub density: Density,
    pub gravity: Accel,
    /// Used by the Darcy-Weisbach friction law
    pub kinematic_viscosity: KinVisc,
}

impl FluidProperties {
    /// Fresh water near room temperature.
    pub fn water() -> Self {
        Self {
            density: kgpm3(constants::WATER_DENSITY_KGPM3),
            gravity: constants::g(),
            kinematic_viscosity: m2ps(constants::WATER_KIN_VISC_M2PS),
        }
    }

    /// Weight per unit volume, ρ·g (N/m³).
    pub fn specific_weight(&self) -> f64 {
        self.density.value * self.gravity.value
    }
}

impl Default for FluidProperties {
    fn default() -> Self {
        Self::water()
    }
}

/// Everything the solver needs besides the pipe and the pump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Number of equal flow increments between zero and the pump's flow bound
    pub flow_steps: usize,
    /// Depth of the pipe inlet below the supply tank's free surface
    pub tank_submersion: Length,
    pub fluid: FluidProperties,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            flow_steps: DEFAULT_FLOW_STEPS,
            tank_submersion: m(0.0),
            fluid: FluidProperties::water(),
        }
    }
}

impl SolverConfig {
    pub fn with_flow_steps(mut self, flow_steps: usize) -> Self {
        self.flow_steps = flow_steps;
        self
    }

    pub fn with_tank_submersion(mut self, depth: Length) -> Self {
        self.tank_submersion = depth;
        self
    }

    pub fn with_fluid(mut self, fluid: FluidProperties) -> Self {
        self.fluid = fluid;
        self
    }

    pub fn validate(&self) -> SolverResult<()> {
        if self.flow_steps == 0 {
            return Err(SolverError::ProblemSetup {
                what: "flow sweep needs at least one step".to_string(),
            });
        }
        if !self.tank_submersion.value.is_finite() {
            return Err(SolverError::ProblemSetup {
                what: format!("tank submersion {} is not finite", self.tank_submersion.value),
            });
        }
        let fluid = &self.fluid;
        for (what, value) in [
            ("density", fluid.density.value),
            ("gravity", fluid.gravity.value),
            ("kinematic viscosity", fluid.kinematic_viscosity.value),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SolverError::ProblemSetup {
                    what: format!("fluid {what} must be positive, got {value}"),
                });
            }
        }
        Ok(())
    }
}
