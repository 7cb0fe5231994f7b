//! Project validation logic.

use crate::inputs::project_catalogs;
use crate::schema::{CurveDef, InterpolationRuleDef, PipeDef, Project, PumpDef, SolverDef};
use std::collections::HashSet;

/// Current project file version.
pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn require_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

fn require_non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be non-negative"))
    }
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut material_ids = HashSet::new();
    for material in &project.materials {
        if !material_ids.insert(material.id.to_ascii_lowercase()) {
            return Err(ValidationError::DuplicateId {
                id: material.id.clone(),
                context: "materials".to_string(),
            });
        }
        require_positive(
            &format!("materials.{}.hazen_williams_c", material.id),
            material.hazen_williams_c,
        )?;
        require_non_negative(
            &format!("materials.{}.roughness_m", material.id),
            material.roughness_m,
        )?;
    }

    let mut fitting_ids = HashSet::new();
    for fitting in &project.fittings {
        if !fitting_ids.insert(fitting.id.to_ascii_lowercase()) {
            return Err(ValidationError::DuplicateId {
                id: fitting.id.clone(),
                context: "fittings".to_string(),
            });
        }
        require_non_negative(&format!("fittings.{}.k", fitting.id), fitting.k)?;
    }

    validate_pipe(project, &project.pipe)?;
    validate_pump(&project.pump)?;
    validate_solver(&project.solver)?;
    Ok(())
}

fn validate_pipe(project: &Project, pipe: &PipeDef) -> Result<(), ValidationError> {
    let (materials, fittings) = project_catalogs(project);

    if materials.get(&pipe.material).is_err() {
        return Err(ValidationError::MissingReference {
            id: pipe.material.clone(),
            context: "pipe material".to_string(),
        });
    }
    require_positive("pipe.diameter_m", pipe.diameter_m)?;
    require_positive("pipe.step_m", pipe.step_m)?;

    if let Some(exit) = &pipe.exit_fitting {
        if fittings.get(exit).is_err() {
            return Err(ValidationError::MissingReference {
                id: exit.clone(),
                context: "pipe exit_fitting".to_string(),
            });
        }
    }

    if pipe.sections.is_empty() {
        return Err(invalid("pipe.sections", "[]", "pipe needs at least one section"));
    }

    for (i, section) in pipe.sections.iter().enumerate() {
        let field = format!("pipe.sections[{i}]");
        require_non_negative(&format!("{field}.length_m"), section.length_m)?;
        if !section.elevation_change_m.is_finite()
            || section.elevation_change_m.abs() > section.length_m
        {
            return Err(invalid(
                format!("{field}.elevation_change_m"),
                section.elevation_change_m,
                "elevation change cannot exceed section length",
            ));
        }
        if let Some(name) = &section.fitting {
            if fittings.get(name).is_err() {
                return Err(ValidationError::MissingReference {
                    id: name.clone(),
                    context: format!("{field}.fitting"),
                });
            }
        }
    }

    Ok(())
}

fn validate_pump(pump: &PumpDef) -> Result<(), ValidationError> {
    if !pump.location_m.is_finite() {
        return Err(invalid("pump.location_m", pump.location_m, "must be finite"));
    }
    require_positive("pump.max_flow_m3ps", pump.max_flow_m3ps)?;

    match &pump.curve {
        CurveDef::Piecewise { rule, points } => {
            let needed = match rule {
                InterpolationRuleDef::Linear => 2,
                InterpolationRuleDef::Quadratic => 3,
            };
            if points.len() < needed {
                return Err(invalid(
                    "pump.curve.points",
                    points.len(),
                    "too few points for the interpolation rule",
                ));
            }
            for (i, &[q, h]) in points.iter().enumerate() {
                require_non_negative(&format!("pump.curve.points[{i}].flow"), q)?;
                require_non_negative(&format!("pump.curve.points[{i}].head"), h)?;
            }
            if let Some(i) = points.windows(2).position(|w| w[1][0] <= w[0][0]) {
                return Err(invalid(
                    format!("pump.curve.points[{}].flow", i + 1),
                    points[i + 1][0],
                    "flows must be strictly increasing",
                ));
            }
        }
        CurveDef::Constant {
            head_m,
            shutoff_m3ps,
        } => {
            require_non_negative("pump.curve.head_m", *head_m)?;
            require_positive("pump.curve.shutoff_m3ps", *shutoff_m3ps)?;
        }
    }
    Ok(())
}

fn validate_solver(solver: &SolverDef) -> Result<(), ValidationError> {
    if solver.flow_steps == 0 {
        return Err(invalid("solver.flow_steps", 0, "must be at least 1"));
    }
    if !solver.tank_submersion_m.is_finite() {
        return Err(invalid(
            "solver.tank_submersion_m",
            solver.tank_submersion_m,
            "must be finite",
        ));
    }
    require_positive("solver.fluid.density_kgpm3", solver.fluid.density_kgpm3)?;
    require_positive(
        "solver.fluid.kinematic_viscosity_m2ps",
        solver.fluid.kinematic_viscosity_m2ps,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FittingDef, MaterialDef, SectionDef};

    fn project() -> Project {
        serde_yaml::from_str(
            r#"
version: 1
name: test
pipe:
  material: pvc
  diameter_m: 0.02
  step_m: 0.1
  exit_fitting: exit
  sections:
    - length_m: 2.0
      elevation_change_m: 1.0
      fitting: entrance_sharp
pump:
  max_flow_m3ps: 0.001
  curve:
    type: constant
    head_m: 10.0
    shutoff_m3ps: 0.002
"#,
        )
        .unwrap()
    }

    #[test]
    fn minimal_project_is_valid() {
        let p = project();
        assert_eq!(p.solver, SolverDef::default());
        validate_project(&p).unwrap();
    }

    #[test]
    fn rejects_unknown_version() {
        let mut p = project();
        p.version = 7;
        assert_eq!(
            validate_project(&p),
            Err(ValidationError::UnsupportedVersion { version: 7 })
        );
    }

    #[test]
    fn rejects_unknown_names() {
        let mut p = project();
        p.pipe.material = "unobtainium".into();
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::MissingReference { .. })
        ));

        let mut p = project();
        p.pipe.sections[0].fitting = Some("flux_capacitor".into());
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::MissingReference { .. })
        ));
    }

    #[test]
    fn custom_entries_resolve_and_must_be_unique() {
        let mut p = project();
        p.materials.push(MaterialDef {
            id: "Glass".into(),
            name: "Glass".into(),
            hazen_williams_c: 150.0,
            roughness_m: 0.0,
        });
        p.fittings.push(FittingDef {
            id: "strainer".into(),
            name: "Y strainer".into(),
            k: 2.5,
        });
        p.pipe.material = "glass".into();
        p.pipe.sections[0].fitting = Some("strainer".into());
        validate_project(&p).unwrap();

        p.fittings.push(FittingDef {
            id: "STRAINER".into(),
            name: "dup".into(),
            k: 1.0,
        });
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn rejects_bad_geometry() {
        let mut p = project();
        p.pipe.sections.push(SectionDef {
            length_m: 1.0,
            elevation_change_m: 2.0,
            fitting: None,
        });
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::InvalidValue { .. })
        ));

        let mut p = project();
        p.pipe.sections.clear();
        assert!(validate_project(&p).is_err());

        let mut p = project();
        p.pipe.diameter_m = 0.0;
        assert!(validate_project(&p).is_err());
    }

    #[test]
    fn rejects_unsorted_curve() {
        let mut p = project();
        p.pump.curve = CurveDef::Piecewise {
            rule: InterpolationRuleDef::Linear,
            points: vec![[0.0, 10.0], [0.002, 5.0], [0.001, 0.0]],
        };
        match validate_project(&p) {
            Err(ValidationError::InvalidValue { field, .. }) => {
                assert_eq!(field, "pump.curve.points[2].flow")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn quadratic_needs_three_points() {
        let mut p = project();
        p.pump.curve = CurveDef::Piecewise {
            rule: InterpolationRuleDef::Quadratic,
            points: vec![[0.0, 10.0], [0.002, 0.0]],
        };
        assert!(validate_project(&p).is_err());
    }
}
