// hf-core/src/units.rs

use std::fmt;

use uom::si::f64::{
    Acceleration as UomAcceleration, Area as UomArea, DiffusionCoefficient as UomDiffusivity,
    Length as UomLength, MassDensity as UomMassDensity, Pressure as UomPressure,
    Velocity as UomVelocity, VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type Area = UomArea;
pub type Density = UomMassDensity;
/// Kinematic viscosity (m²/s); uom models it as a diffusion coefficient
pub type KinVisc = UomDiffusivity;
pub type Length = UomLength;
pub type Pressure = UomPressure;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn m2ps(v: f64) -> KinVisc {
    use uom::si::diffusion_coefficient::square_meter_per_second;
    KinVisc::new::<square_meter_per_second>(v)
}

pub mod constants {
    use super::*;

    /// Gravitational acceleration used for head conversions.
    pub const G_MPS2: f64 = 9.81;

    pub const WATER_DENSITY_KGPM3: f64 = 998.0;

    /// Water at roughly 20 °C (dynamic viscosity 1e-3 Pa·s over 998 kg/m³).
    pub const WATER_KIN_VISC_M2PS: f64 = 1.0e-6;

    #[inline]
    pub fn g() -> Accel {
        use uom::si::acceleration::meter_per_second_squared;
        Accel::new::<meter_per_second_squared>(G_MPS2)
    }
}

// Display conversions. These only format results; nothing upstream of the
// presentation layer should call them.

#[inline]
pub fn to_gpm(q: VolumeRate) -> f64 {
    use uom::si::volume_rate::gallon_per_minute;
    q.get::<gallon_per_minute>()
}

#[inline]
pub fn to_feet(l: Length) -> f64 {
    use uom::si::length::foot;
    l.get::<foot>()
}

#[inline]
pub fn to_inches(l: Length) -> f64 {
    use uom::si::length::inch;
    l.get::<inch>()
}

#[inline]
pub fn to_psi(p: Pressure) -> f64 {
    use uom::si::pressure::psi;
    p.get::<psi>()
}

#[inline]
pub fn to_fps(v: Velocity) -> f64 {
    use uom::si::velocity::foot_per_second;
    v.get::<foot_per_second>()
}

/// Unit system used when presenting results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnitSystem {
    #[default]
    Si,
    Us,
}

impl UnitSystem {
    pub fn format_flow(self, q: VolumeRate) -> String {
        match self {
            Self::Si => format!("{:.6e} m^3/s", q.value),
            Self::Us => format!("{:.3} gpm", to_gpm(q)),
        }
    }

    pub fn format_length(self, l: Length) -> String {
        match self {
            Self::Si => format!("{:.4} m", l.value),
            Self::Us => format!("{:.3} ft", to_feet(l)),
        }
    }

    /// Short lengths such as pipe diameters.
    pub fn format_bore(self, l: Length) -> String {
        match self {
            Self::Si => format!("{:.2} mm", l.value * 1e3),
            Self::Us => format!("{:.3} in", to_inches(l)),
        }
    }

    pub fn format_pressure(self, p: Pressure) -> String {
        match self {
            Self::Si => format!("{:.1} Pa", p.value),
            Self::Us => format!("{:.3} psi", to_psi(p)),
        }
    }

    pub fn format_velocity(self, v: Velocity) -> String {
        match self {
            Self::Si => format!("{:.4} m/s", v.value),
            Self::Us => format!("{:.3} ft/s", to_fps(v)),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Si => write!(f, "SI"),
            Self::Us => write!(f, "US customary"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Tolerances, nearly_equal};

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _l = m(2.0);
        let _q = m3ps(0.01);
        let _v = mps(1.5);
        let _rho = kgpm3(constants::WATER_DENSITY_KGPM3);
        let _nu = m2ps(constants::WATER_KIN_VISC_M2PS);
        let _g = constants::g();
    }

    #[test]
    fn kinematic_viscosity_in_square_metres_per_second() {
        use uom::si::diffusion_coefficient::stokes;
        let nu = m2ps(constants::WATER_KIN_VISC_M2PS);
        assert_eq!(nu.value, 1.0e-6);
        assert!(nearly_equal(nu.get::<stokes>(), 0.01, Tolerances::default()));
    }

    #[test]
    fn display_conversions() {
        let tol = Tolerances {
            abs: 1e-9,
            rel: 1e-4,
        };
        assert!(nearly_equal(to_gpm(m3ps(1.0)), 15_850.3, tol));
        assert!(nearly_equal(to_feet(m(1.0)), 3.28084, tol));
        assert!(nearly_equal(to_inches(m(1.0)), 39.3701, tol));
        assert!(nearly_equal(to_psi(pa(6_894.76)), 1.0, tol));
    }

    #[test]
    fn unit_system_formats() {
        assert!(UnitSystem::Us.format_flow(m3ps(1.0)).ends_with("gpm"));
        assert!(UnitSystem::Si.format_length(m(2.0)).starts_with("2.0000"));
        assert_eq!(UnitSystem::default(), UnitSystem::Si);
    }
}
