//! Stateful solver tying a pipe mesh to a pump.

use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult};
use crate::operating_point::{OperatingPoint, PumpAttachment, find_operating_point};
use crate::pressure::{PressureField, reconstruct_pressure};
use hf_components::{PipeMesh, PumpCurve};
use hf_core::units::{Length, Pressure, Velocity, VolumeRate};
use serde::Serialize;
use tracing::info;

/// Result of a successful solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub operating_point: OperatingPoint,
    pub pressure: PressureField,
}

/// Pipe, pump and the last solution computed for them.
///
/// Attaching a new pump or a failed [`solve`](Self::solve) clears the stored
/// solution, so [`solution`](Self::solution) never reports stale results.
#[derive(Debug)]
pub struct HydraulicSolver<'c> {
    mesh: PipeMesh,
    config: SolverConfig,
    pump: Option<PumpAttachment<'c>>,
    solution: Option<Solution>,
}

impl<'c> HydraulicSolver<'c> {
    pub fn new(mesh: PipeMesh, config: SolverConfig) -> SolverResult<Self> {
        config.validate()?;
        Ok(Self {
            mesh,
            config,
            pump: None,
            solution: None,
        })
    }

    /// Place `curve` at arc length `location` and bound the flow sweep.
    pub fn attach_pump(
        &mut self,
        curve: &'c dyn PumpCurve,
        location: Length,
        max_flow: VolumeRate,
    ) -> SolverResult<&mut Self> {
        let pump = PumpAttachment::new(curve, location, max_flow)?;
        self.pump = Some(pump);
        self.solution = None;
        Ok(self)
    }

    /// Find the operating point and the pressure profile along the pipe.
    ///
    /// Solving twice with the same inputs gives identical results.
    pub fn solve(&mut self) -> SolverResult<&Solution> {
        self.solution = None;
        let pump = self.pump.ok_or_else(|| SolverError::ProblemSetup {
            what: "no pump attached".to_string(),
        })?;

        let operating_point = find_operating_point(&self.mesh, &self.config, &pump)?;
        let pressure = reconstruct_pressure(&self.mesh, &self.config, pump.location, &operating_point);
        info!(
            flow = operating_point.flow.value,
            nodes = pressure.len(),
            "solve complete"
        );

        Ok(&*self.solution.insert(Solution {
            operating_point,
            pressure,
        }))
    }

    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    pub fn mesh(&self) -> &PipeMesh {
        &self.mesh
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn pump(&self) -> Option<&PumpAttachment<'c>> {
        self.pump.as_ref()
    }

    /// Node positions (m).
    pub fn position(&self) -> &[f64] {
        self.mesh.position()
    }

    /// Node elevations (m).
    pub fn elevation(&self) -> &[f64] {
        self.mesh.elevation()
    }

    /// Pressure at each node from the last solve.
    pub fn pressure(&self) -> Option<&[Pressure]> {
        self.solution.as_ref().map(|s| s.pressure.pressure.as_slice())
    }

    /// Bore velocity from the last solve.
    pub fn velocity(&self) -> Option<Velocity> {
        self.solution.as_ref().map(|s| s.operating_point.velocity)
    }
}
