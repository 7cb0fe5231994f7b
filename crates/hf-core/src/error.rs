use thiserror::Error;

pub type HfResult<T> = Result<T, HfError>;

#[derive(Error, Debug)]
pub enum HfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid configuration: {what}")]
    Config { what: String },

    #[error("Infeasible operating point: {what}")]
    Infeasible { what: String },

    #[error("Numeric singularity: {what}")]
    Singular { what: &'static str },
}
