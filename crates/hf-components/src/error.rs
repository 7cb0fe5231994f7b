//! Error types for component operations.

use hf_core::error::HfError;
use thiserror::Error;

/// Errors raised while building pipes, curves and catalogs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid section (length {length} m, elevation change {elevation_change} m): {reason}")]
    InvalidSection {
        length: f64,
        elevation_change: f64,
        reason: &'static str,
    },

    #[error("Degenerate interpolation: abscissae {x1} and {x2} coincide")]
    DegenerateInterpolation { x1: f64, x2: f64 },

    #[error("Invalid pump curve: {what}")]
    InvalidCurve { what: String },

    #[error("Unknown material: {name}")]
    UnknownMaterial { name: String },

    #[error("Unknown component: {name}")]
    UnknownComponent { name: String },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for HfError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonPhysical { what } => HfError::InvalidArg { what },
            ComponentError::InvalidArg { what } => HfError::InvalidArg { what },
            ComponentError::DegenerateInterpolation { .. } => HfError::Singular {
                what: "interpolation with coincident abscissae",
            },
            other => HfError::Config {
                what: other.to_string(),
            },
        }
    }
}
