//! Stage 2: rebuild the pressure profile at the operating point.

use crate::config::SolverConfig;
use crate::operating_point::{OperatingPoint, velocity_head};
use hf_components::PipeMesh;
use hf_core::units::{Length, Pressure, pa};
use serde::Serialize;
use tracing::debug;

/// Static pressure at every mesh node, referenced to the tank free surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PressureField {
    pub pressure: Vec<Pressure>,
}

impl PressureField {
    pub fn len(&self) -> usize {
        self.pressure.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pressure.is_empty()
    }

    /// Pressures in Pa.
    pub fn values_pa(&self) -> Vec<f64> {
        self.pressure.iter().map(|p| p.value).collect()
    }

    /// Pressure expressed as metres of the pumped fluid.
    pub fn head(&self, config: &SolverConfig) -> Vec<f64> {
        let gamma = config.fluid.specific_weight();
        self.pressure.iter().map(|p| p.value / gamma).collect()
    }
}

/// Pressure at each node for the flow in `op`.
///
/// For node `i` at arc length `L_i`:
///
/// ```text
/// p_i = ρg · (submersion − z_i + H_pump·[L_i > pump location]
///            − h_f(L_i) − v²/2g · (1 + ΣK up to i))
/// ```
///
/// Friction and minor losses are accumulated only up to the node itself.
pub fn reconstruct_pressure(
    mesh: &PipeMesh,
    config: &SolverConfig,
    pump_location: Length,
    op: &OperatingPoint,
) -> PressureField {
    let gamma = config.fluid.specific_weight();
    let submersion = config.tank_submersion.value;
    let vh = velocity_head(op.velocity, config);
    let gradient = mesh.friction().gradient(op.flow, mesh.diameter());
    let pump_head = op.pump_head.value;
    let location = pump_location.value;

    let pressure = mesh
        .position()
        .iter()
        .zip(mesh.elevation())
        .zip(mesh.cumulative_minor_loss())
        .map(|((&l, &z), &k_sum)| {
            let added = if l > location { pump_head } else { 0.0 };
            let head = submersion - z + added - gradient * l - vh * (1.0 + k_sum);
            pa(gamma * head)
        })
        .collect::<Vec<_>>();

    debug!(
        nodes = pressure.len(),
        gradient,
        velocity_head = vh,
        "pressure profile reconstructed"
    );

    PressureField { pressure }
}
