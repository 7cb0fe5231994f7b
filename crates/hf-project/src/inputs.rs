//! Conversion from a project file into solver inputs.

use crate::schema::{CurveDef, FrictionModelDef, InterpolationRuleDef, Project};
use crate::ProjectResult;
use hf_components::{
    ConstantHeadCurve, Fitting, FittingCatalog, FrictionModel, InterpolationRule, Material,
    MaterialCatalog, PiecewiseCurve, PipeMesh, PipeMeshBuilder, PumpCurve, Section,
};
use hf_core::units::{Length, VolumeRate, constants, kgpm3, m, m2ps, m3ps};
use hf_solver::{FluidProperties, HydraulicSolver, SolverConfig};
use tracing::debug;

/// Built-in catalogs extended with the project's own entries.
pub fn project_catalogs(project: &Project) -> (MaterialCatalog, FittingCatalog) {
    let mut materials = MaterialCatalog::builtin();
    for def in &project.materials {
        materials.insert(Material {
            id: def.id.clone(),
            display_name: def.name.clone(),
            hazen_williams_c: def.hazen_williams_c,
            roughness_m: def.roughness_m,
        });
    }

    let mut fittings = FittingCatalog::builtin();
    for def in &project.fittings {
        fittings.insert(Fitting {
            id: def.id.clone(),
            display_name: def.name.clone(),
            k: def.k,
        });
    }

    (materials, fittings)
}

impl From<FrictionModelDef> for FrictionModel {
    fn from(def: FrictionModelDef) -> Self {
        match def {
            FrictionModelDef::HazenWilliams => FrictionModel::HazenWilliams,
            FrictionModelDef::DarcyWeisbach => FrictionModel::DarcyWeisbach,
        }
    }
}

impl From<InterpolationRuleDef> for InterpolationRule {
    fn from(def: InterpolationRuleDef) -> Self {
        match def {
            InterpolationRuleDef::Linear => InterpolationRule::Linear,
            InterpolationRuleDef::Quadratic => InterpolationRule::Quadratic,
        }
    }
}

/// Build the pump curve a [`CurveDef`] describes.
pub fn build_curve(def: &CurveDef) -> ProjectResult<Box<dyn PumpCurve>> {
    let curve: Box<dyn PumpCurve> = match def {
        CurveDef::Piecewise { rule, points } => {
            let points = points.iter().map(|&[q, h]| (q, h)).collect::<Vec<_>>();
            Box::new(PiecewiseCurve::from_si_points(&points, (*rule).into())?)
        }
        CurveDef::Constant {
            head_m,
            shutoff_m3ps,
        } => Box::new(ConstantHeadCurve::new(m(*head_m), m3ps(*shutoff_m3ps))?),
    };
    Ok(curve)
}

/// Everything needed to run the solver, resolved from a [`Project`].
pub struct ProjectInputs {
    pub mesh: PipeMesh,
    pub curve: Box<dyn PumpCurve>,
    pub pump_location: Length,
    pub max_flow: VolumeRate,
    pub config: SolverConfig,
}

impl ProjectInputs {
    /// Resolve catalog names and build the mesh, curve and solver config.
    ///
    /// Run [`validate_project`](crate::validate_project) first for
    /// friendlier messages; this only reports the first failure it meets.
    pub fn from_project(project: &Project) -> ProjectResult<Self> {
        let (materials, fittings) = project_catalogs(project);
        let pipe = &project.pipe;
        let solver = &project.solver;

        let fluid = FluidProperties {
            density: kgpm3(solver.fluid.density_kgpm3),
            gravity: constants::g(),
            kinematic_viscosity: m2ps(solver.fluid.kinematic_viscosity_m2ps),
        };
        let config = SolverConfig::default()
            .with_flow_steps(solver.flow_steps)
            .with_tank_submersion(m(solver.tank_submersion_m))
            .with_fluid(fluid);

        let material = materials.get(&pipe.material)?;
        let friction =
            material.friction_law(pipe.friction_model.into(), fluid.kinematic_viscosity)?;
        let exit_loss = match &pipe.exit_fitting {
            Some(name) => fittings.k(name)?,
            None => 0.0,
        };

        let mut builder = PipeMeshBuilder::new(m(pipe.diameter_m), friction)?
            .with_step(m(pipe.step_m))?
            .with_exit_loss(exit_loss)?;
        for section in &pipe.sections {
            let entry_loss = match &section.fitting {
                Some(name) => fittings.k(name)?,
                None => 0.0,
            };
            builder.add_section(Section::new(
                m(section.length_m),
                m(section.elevation_change_m),
                entry_loss,
            ))?;
        }
        let mesh = builder.build()?;

        let curve = build_curve(&project.pump.curve)?;
        debug!(
            project = %project.name,
            material = %material.id,
            nodes = mesh.len(),
            "project inputs resolved"
        );

        Ok(Self {
            mesh,
            curve,
            pump_location: m(project.pump.location_m),
            max_flow: m3ps(project.pump.max_flow_m3ps),
            config,
        })
    }

    /// A solver for these inputs with the pump already attached.
    pub fn solver(&self) -> ProjectResult<HydraulicSolver<'_>> {
        let mut solver = HydraulicSolver::new(self.mesh.clone(), self.config)?;
        solver.attach_pump(self.curve.as_ref(), self.pump_location, self.max_flow)?;
        Ok(solver)
    }
}

impl std::fmt::Debug for ProjectInputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectInputs")
            .field("nodes", &self.mesh.len())
            .field("pump_location", &self.pump_location)
            .field("max_flow", &self.max_flow)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_components::FrictionLaw;

    fn project(yaml: &str) -> Project {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn project_entries_override_builtin_aliases() {
        let p = project(
            r#"
version: 1
name: overrides
pipe:
  material: iron
  diameter_m: 0.05
  step_m: 0.5
  sections:
    - length_m: 2.0
      fitting: entrance
pump:
  max_flow_m3ps: 0.01
  curve:
    type: constant
    head_m: 10.0
    shutoff_m3ps: 0.02
materials:
  - id: iron
    name: Lined ductile iron
    hazen_williams_c: 140.0
    roughness_m: 1.0e-5
fittings:
  - id: entrance
    name: Screened intake
    k: 3.0
"#,
        );
        crate::validate_project(&p).unwrap();
        let inputs = ProjectInputs::from_project(&p).unwrap();

        assert_eq!(inputs.mesh.minor_loss()[0], 3.0);
        assert_eq!(inputs.mesh.friction(), FrictionLaw::HazenWilliams { c: 140.0 });
    }

    #[test]
    fn constant_curve_is_built() {
        let curve = build_curve(&CurveDef::Constant {
            head_m: 12.0,
            shutoff_m3ps: 0.002,
        })
        .unwrap();
        assert_eq!(curve.head(m3ps(0.001)).value, 12.0);
        assert_eq!(curve.head(m3ps(0.002)).value, 0.0);
    }
}
