//! Tabulated pump and system curves for plotting or export.

use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult};
use crate::operating_point::system_head;
use hf_components::{PipeMesh, PumpCurve};
use hf_core::numeric::linspace;
use hf_core::units::{Length, VolumeRate, m3ps};
use serde::Serialize;

/// Pump and system head at one flow rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveSample {
    pub flow: VolumeRate,
    pub pump_head: Length,
    pub system_head: Length,
}

/// Sample both curves at `samples` evenly spaced flows in `[0, max_flow]`.
pub fn sample_curves(
    mesh: &PipeMesh,
    config: &SolverConfig,
    curve: &dyn PumpCurve,
    max_flow: VolumeRate,
    samples: usize,
) -> SolverResult<Vec<CurveSample>> {
    if samples < 2 {
        return Err(SolverError::ProblemSetup {
            what: format!("need at least two curve samples, got {samples}"),
        });
    }
    if !(max_flow.value.is_finite() && max_flow.value > 0.0) {
        return Err(SolverError::ProblemSetup {
            what: format!("maximum flow {} must be positive", max_flow.value),
        });
    }

    Ok(linspace(0.0, max_flow.value, samples)
        .into_iter()
        .map(|q| {
            let flow = m3ps(q);
            CurveSample {
                flow,
                pump_head: curve.head(flow),
                system_head: system_head(mesh, config, flow),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_components::{FrictionLaw, PipeMeshBuilder, Section};
    use hf_core::units::m;

    #[test]
    fn samples_span_the_flow_range() {
        let mut b = PipeMeshBuilder::new(m(0.02), FrictionLaw::HazenWilliams { c: 150.0 })
            .unwrap()
            .with_step(m(0.1))
            .unwrap();
        b.add_section(Section::new(m(3.0), m(2.0), 0.5)).unwrap();
        let mesh = b.build().unwrap();
        let pump = |q: VolumeRate| m(20.0 - 1.0e4 * q.value);

        let samples =
            sample_curves(&mesh, &SolverConfig::default(), &pump, m3ps(0.001), 11).unwrap();

        assert_eq!(samples.len(), 11);
        assert_eq!(samples[0].flow.value, 0.0);
        assert_eq!(samples[10].flow.value, 0.001);
        assert!((samples[0].system_head.value - 2.0).abs() < 1e-12);
        assert_eq!(samples[0].pump_head.value, 20.0);
        assert!(samples.windows(2).all(|w| w[1].system_head > w[0].system_head));
    }

    #[test]
    fn rejects_degenerate_requests() {
        let mut b = PipeMeshBuilder::new(m(0.02), FrictionLaw::HazenWilliams { c: 150.0 }).unwrap();
        b.add_section(Section::new(m(1.0), m(0.0), 0.0)).unwrap();
        let mesh = b.build().unwrap();
        let pump = |_: VolumeRate| m(1.0);
        let config = SolverConfig::default();

        assert!(sample_curves(&mesh, &config, &pump, m3ps(0.001), 1).is_err());
        assert!(sample_curves(&mesh, &config, &pump, m3ps(0.0), 10).is_err());
    }
}
