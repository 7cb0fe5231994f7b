//! Project schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    pub pipe: PipeDef,
    pub pump: PumpDef,
    #[serde(default)]
    pub solver: SolverDef,
    /// Materials added to (or overriding) the built-in catalog
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<MaterialDef>,
    /// Fittings added to (or overriding) the built-in catalog
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fittings: Vec<FittingDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipeDef {
    pub material: String,
    #[serde(default)]
    pub friction_model: FrictionModelDef,
    pub diameter_m: f64,
    #[serde(default = "default_step_m")]
    pub step_m: f64,
    /// Fitting at the pipe outlet; no exit loss when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_fitting: Option<String>,
    pub sections: Vec<SectionDef>,
}

fn default_step_m() -> f64 {
    hf_components::DEFAULT_STEP_M
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionDef {
    pub length_m: f64,
    #[serde(default)]
    pub elevation_change_m: f64,
    /// Fitting at the start of the section; no loss when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitting: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FrictionModelDef {
    #[default]
    HazenWilliams,
    DarcyWeisbach,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PumpDef {
    /// Arc length along the pipe where head is added
    #[serde(default)]
    pub location_m: f64,
    pub max_flow_m3ps: f64,
    pub curve: CurveDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CurveDef {
    /// Vendor table of `[flow m³/s, head m]` breakpoints.
    Piecewise {
        #[serde(default)]
        rule: InterpolationRuleDef,
        points: Vec<[f64; 2]>,
    },
    Constant { head_m: f64, shutoff_m3ps: f64 },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationRuleDef {
    #[default]
    Linear,
    Quadratic,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolverDef {
    #[serde(default = "default_flow_steps")]
    pub flow_steps: usize,
    #[serde(default)]
    pub tank_submersion_m: f64,
    #[serde(default)]
    pub fluid: FluidDef,
}

impl Default for SolverDef {
    fn default() -> Self {
        Self {
            flow_steps: default_flow_steps(),
            tank_submersion_m: 0.0,
            fluid: FluidDef::default(),
        }
    }
}

fn default_flow_steps() -> usize {
    hf_solver::DEFAULT_FLOW_STEPS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FluidDef {
    pub density_kgpm3: f64,
    pub kinematic_viscosity_m2ps: f64,
}

impl Default for FluidDef {
    fn default() -> Self {
        use hf_core::units::constants;
        Self {
            density_kgpm3: constants::WATER_DENSITY_KGPM3,
            kinematic_viscosity_m2ps: constants::WATER_KIN_VISC_M2PS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialDef {
    pub id: String,
    pub name: String,
    pub hazen_williams_c: f64,
    pub roughness_m: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FittingDef {
    pub id: String,
    pub name: String,
    pub k: f64,
}
