//! Stage 1: locate the pump/system curve intersection.
//!
//! The flow rate is swept from zero to the pump's flow bound in
//! `flow_steps` equal increments. The first grid point where the system
//! needs at least as much head as the pump delivers is the operating point,
//! so the result is only resolved to one increment; raise `flow_steps` for
//! a finer answer.

use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult};
use hf_components::{PipeMesh, PumpCurve};
use hf_core::units::{Length, Velocity, VolumeRate, m, m3ps};
use serde::Serialize;
use tracing::{debug, info, warn};

/// A pump curve placed on the pipe, with the flow range to search.
#[derive(Clone, Copy)]
pub struct PumpAttachment<'c> {
    pub curve: &'c dyn PumpCurve,
    /// Arc-length position where pump head is added
    pub location: Length,
    /// Upper bound of the operating-point sweep
    pub max_flow: VolumeRate,
}

impl<'c> PumpAttachment<'c> {
    pub fn new(
        curve: &'c dyn PumpCurve,
        location: Length,
        max_flow: VolumeRate,
    ) -> SolverResult<Self> {
        if !location.value.is_finite() {
            return Err(SolverError::ProblemSetup {
                what: format!("pump location {} is not finite", location.value),
            });
        }
        if !(max_flow.value.is_finite() && max_flow.value > 0.0) {
            return Err(SolverError::ProblemSetup {
                what: format!("maximum flow {} must be positive", max_flow.value),
            });
        }
        Ok(Self {
            curve,
            location,
            max_flow,
        })
    }
}

impl std::fmt::Debug for PumpAttachment<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PumpAttachment")
            .field("location", &self.location)
            .field("max_flow", &self.max_flow)
            .finish_non_exhaustive()
    }
}

/// Where the pump and the pipe agree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperatingPoint {
    pub flow: VolumeRate,
    /// Mean velocity in the pipe bore
    pub velocity: Velocity,
    /// Head delivered by the pump at `flow`
    pub pump_head: Length,
    /// Head required by the system at `flow`
    pub system_head: Length,
}

/// Mean bore velocity at `flow`.
pub fn velocity(mesh: &PipeMesh, flow: VolumeRate) -> Velocity {
    flow / mesh.area()
}

/// Velocity head `v²/2g` (m).
pub fn velocity_head(velocity: Velocity, config: &SolverConfig) -> f64 {
    velocity.value * velocity.value / (2.0 * config.fluid.gravity.value)
}

/// Head the pipe needs to pass `flow` from the tank to the outlet.
///
/// Static lift minus tank submersion, plus the velocity head weighted by
/// one plus every minor loss on the pipe, plus friction over the full length.
pub fn system_head(mesh: &PipeMesh, config: &SolverConfig, flow: VolumeRate) -> Length {
    let vh = velocity_head(velocity(mesh, flow), config);
    let friction = mesh
        .friction()
        .head_loss(flow, mesh.total_length(), mesh.diameter());

    mesh.elevation_change() - config.tank_submersion
        + m(vh * (1.0 + mesh.total_minor_loss()))
        + friction
}

/// Sweep for the first flow where the system curve meets the pump curve.
///
/// # Errors
/// - [`SolverError::UndersizedPump`] if the system already needs at least the
///   pump's head at zero flow.
/// - [`SolverError::IncompatiblePump`] if pump head reaches zero first.
/// - [`SolverError::FlowBoundExceeded`] if no crossing occurs up to `max_flow`.
pub fn find_operating_point(
    mesh: &PipeMesh,
    config: &SolverConfig,
    pump: &PumpAttachment<'_>,
) -> SolverResult<OperatingPoint> {
    config.validate()?;

    let steps = config.flow_steps;
    let max_flow = pump.max_flow.value;
    debug!(steps, max_flow, nodes = mesh.len(), "sweeping flow for operating point");

    for i in 0..=steps {
        let flow = m3ps(max_flow * i as f64 / steps as f64);
        let pump_head = pump.curve.head(flow);
        let required = system_head(mesh, config, flow);

        if i == 0 && required >= pump_head {
            warn!(
                system_head = required.value,
                pump_head = pump_head.value,
                "pump cannot overcome the system at zero flow"
            );
            return Err(SolverError::UndersizedPump {
                system_head_m: required.value,
                pump_head_m: pump_head.value,
            });
        }

        if pump_head.value == 0.0 {
            warn!(flow = flow.value, "pump head reached zero before the system curve");
            return Err(SolverError::IncompatiblePump {
                flow_m3ps: flow.value,
                system_head_m: required.value,
            });
        }

        if required >= pump_head {
            let point = OperatingPoint {
                flow,
                velocity: velocity(mesh, flow),
                pump_head,
                system_head: required,
            };
            info!(
                flow = flow.value,
                velocity = point.velocity.value,
                pump_head = pump_head.value,
                step = i,
                "operating point found"
            );
            return Ok(point);
        }
    }

    warn!(max_flow, "flow bound reached without meeting the system curve");
    Err(SolverError::FlowBoundExceeded {
        max_flow_m3ps: max_flow,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use hf_components::{ConstantHeadCurve, FrictionLaw, PipeMeshBuilder, Section};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn accepted_point_is_first_grid_point_past_crossing(
            lift in 0.0_f64..5.0,
            run in 1.0_f64..20.0,
            bore in 0.01_f64..0.05,
            surplus in 0.5_f64..40.0,
            steps in 50_usize..400,
        ) {
            let mut b = PipeMeshBuilder::new(m(bore), FrictionLaw::HazenWilliams { c: 130.0 })
                .unwrap()
                .with_step(m(0.5))
                .unwrap();
            b.add_section(Section::new(m(lift + run), m(lift), 0.5)).unwrap();
            let mesh = b.build().unwrap();
            let config = SolverConfig::default().with_flow_steps(steps);
            let curve = ConstantHeadCurve::new(m(lift + surplus), m3ps(1.0)).unwrap();
            let max_flow = 0.05;
            let pump = PumpAttachment::new(&curve, m(0.0), m3ps(max_flow)).unwrap();

            match find_operating_point(&mesh, &config, &pump) {
                Ok(op) => {
                    prop_assert!(op.system_head >= op.pump_head);
                    let i = (op.flow.value / (max_flow / steps as f64)).round() as usize;
                    prop_assert!(i >= 1);
                    let prev = m3ps(max_flow * (i - 1) as f64 / steps as f64);
                    prop_assert!(system_head(&mesh, &config, prev) < op.pump_head);
                }
                Err(err) => prop_assert!(
                    matches!(err, SolverError::FlowBoundExceeded { .. }),
                    "unexpected {}", err
                ),
            }
        }
    }
}
