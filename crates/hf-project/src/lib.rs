//! hf-project: project file format, validation and solver input assembly.

pub mod inputs;
pub mod schema;
pub mod validate;

pub use inputs::{ProjectInputs, build_curve, project_catalogs};
pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_project};

use std::path::Path;
use tracing::info;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Component error: {0}")]
    Component(#[from] hf_components::ComponentError),

    #[error("Solver error: {0}")]
    Solver(#[from] hf_solver::SolverError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    let project: Project = serde_yaml::from_str(&content)?;
    validate_project(&project)?;
    info!(path = %path.display(), name = %project.name, "project loaded");
    Ok(project)
}

pub fn save_yaml(path: &Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_yaml::to_string(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    let project: Project = serde_json::from_str(&content)?;
    validate_project(&project)?;
    info!(path = %path.display(), name = %project.name, "project loaded");
    Ok(project)
}

pub fn save_json(path: &Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_json::to_string_pretty(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a project, picking the format from the file extension.
pub fn load(path: &Path) -> ProjectResult<Project> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}
