//! Major (distributed) head-loss laws.

use crate::common::{check_finite, check_positive};
use crate::error::{ComponentError, ComponentResult};
use hf_core::units::{KinVisc, Length, VolumeRate, constants::G_MPS2, m};

/// Hazen-Williams SI coefficient.
const HW_COEFF: f64 = 10.67;
const HW_FLOW_EXP: f64 = 1.852;
const HW_DIAMETER_EXP: f64 = 4.8704;

/// Reynolds number below which flow is treated as laminar.
const RE_LAMINAR: f64 = 2300.0;

/// Law used to compute friction loss along the pipe wall.
///
/// Both laws give a head loss proportional to length, so the solver works
/// with the hydraulic gradient ([`FrictionLaw::gradient`]) and scales it by
/// the distance travelled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrictionLaw {
    /// Empirical Hazen-Williams formula with roughness coefficient `c`.
    HazenWilliams { c: f64 },
    /// Darcy-Weisbach with a laminar/turbulent friction factor.
    DarcyWeisbach {
        /// Absolute wall roughness
        roughness: Length,
        kinematic_viscosity: KinVisc,
    },
}

impl FrictionLaw {
    pub fn hazen_williams(c: f64) -> ComponentResult<Self> {
        check_positive(c, "Hazen-Williams coefficient must be positive")?;
        Ok(Self::HazenWilliams { c })
    }

    pub fn darcy_weisbach(roughness: Length, kinematic_viscosity: KinVisc) -> ComponentResult<Self> {
        check_finite(roughness.value, "roughness")?;
        if roughness.value < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "roughness cannot be negative",
            });
        }
        check_positive(kinematic_viscosity.value, "kinematic viscosity must be positive")?;
        Ok(Self::DarcyWeisbach {
            roughness,
            kinematic_viscosity,
        })
    }

    /// Head lost per metre of pipe at `flow` through bore `diameter` (m/m).
    pub fn gradient(&self, flow: VolumeRate, diameter: Length) -> f64 {
        let q = flow.value.abs();
        let d = diameter.value;
        if q == 0.0 {
            return 0.0;
        }

        match *self {
            Self::HazenWilliams { c } => {
                HW_COEFF * q.powf(HW_FLOW_EXP) / (c.powf(HW_FLOW_EXP) * d.powf(HW_DIAMETER_EXP))
            }
            Self::DarcyWeisbach {
                roughness,
                kinematic_viscosity,
            } => {
                let area = std::f64::consts::PI * d * d / 4.0;
                let velocity = q / area;
                let reynolds = velocity * d / kinematic_viscosity.value;
                let f = friction_factor(reynolds, roughness.value / d);
                f / d * velocity * velocity / (2.0 * G_MPS2)
            }
        }
    }

    /// Major head loss over `length` of pipe.
    pub fn head_loss(&self, flow: VolumeRate, length: Length, diameter: Length) -> Length {
        m(self.gradient(flow, diameter) * length.value)
    }
}

/// Darcy friction factor: `64/Re` when laminar, Swamee-Jain when turbulent.
pub fn friction_factor(reynolds: f64, relative_roughness: f64) -> f64 {
    if reynolds < RE_LAMINAR {
        64.0 / reynolds
    } else {
        let a = relative_roughness / 3.7;
        let b = 5.74 / reynolds.powf(0.9);
        let f = 0.25 / (a + b).log10().powi(2);
        f.max(0.0001)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_core::units::{m2ps, m3ps};

    #[test]
    fn hazen_williams_reference_value() {
        // Q = 0.05 m^3/s, D = 0.2 m, C = 130, L = 100 m
        let law = FrictionLaw::hazen_williams(130.0).unwrap();
        let hf = law.head_loss(m3ps(0.05), m(100.0), m(0.2)).value;
        let expected = 10.67 * 0.05_f64.powf(1.852) * 100.0
            / (130.0_f64.powf(1.852) * 0.2_f64.powf(4.8704));
        assert!((hf - expected).abs() < 1e-12);
        assert!(hf > 1.0 && hf < 2.0, "hf = {hf}");
    }

    #[test]
    fn zero_flow_has_no_loss() {
        let hw = FrictionLaw::hazen_williams(150.0).unwrap();
        let dw = FrictionLaw::darcy_weisbach(m(1.5e-6), m2ps(1.0e-6)).unwrap();
        assert_eq!(hw.gradient(m3ps(0.0), m(0.1)), 0.0);
        assert_eq!(dw.gradient(m3ps(0.0), m(0.1)), 0.0);
    }

    #[test]
    fn loss_grows_with_flow() {
        for law in [
            FrictionLaw::hazen_williams(120.0).unwrap(),
            FrictionLaw::darcy_weisbach(m(4.5e-5), m2ps(1.0e-6)).unwrap(),
        ] {
            let low = law.gradient(m3ps(0.001), m(0.05));
            let high = law.gradient(m3ps(0.002), m(0.05));
            assert!(high > low, "{law:?}");
        }
    }

    #[test]
    fn laminar_friction_factor() {
        assert_eq!(friction_factor(1000.0, 0.001), 0.064);
    }

    #[test]
    fn turbulent_friction_factor_in_moody_range() {
        let f = friction_factor(1.0e5, 1.0e-4);
        assert!(f > 0.015 && f < 0.025, "f = {f}");
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(FrictionLaw::hazen_williams(0.0).is_err());
        assert!(FrictionLaw::darcy_weisbach(m(-1.0e-5), m2ps(1.0e-6)).is_err());
        assert!(FrictionLaw::darcy_weisbach(m(1.0e-5), m2ps(0.0)).is_err());
    }
}
