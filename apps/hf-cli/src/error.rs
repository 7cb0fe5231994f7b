use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Project error: {0}")]
    Project(#[from] hf_project::ProjectError),

    #[error("Solver error: {0}")]
    Solver(#[from] hf_solver::SolverError),

    #[error("Failed to encode output for {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArg(String),
}

pub type CliResult<T> = Result<T, CliError>;
