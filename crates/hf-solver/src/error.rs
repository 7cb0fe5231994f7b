//! Error types for solver operations.

use hf_components::ComponentError;
use hf_core::error::HfError;
use thiserror::Error;

/// Errors that can occur while locating the operating point.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    /// The system already needs more head than the pump makes at zero flow.
    #[error(
        "Undersized pump: system needs {system_head_m:.3} m at zero flow but the pump delivers {pump_head_m:.3} m"
    )]
    UndersizedPump { system_head_m: f64, pump_head_m: f64 },

    /// Pump head fell to zero before the system curve was met.
    #[error(
        "Incompatible pump: head reaches zero at {flow_m3ps:.6e} m^3/s while the system still needs {system_head_m:.3} m"
    )]
    IncompatiblePump { flow_m3ps: f64, system_head_m: f64 },

    /// The sweep reached its flow bound with the pump still above the system.
    #[error("No operating point below the flow bound of {max_flow_m3ps:.6e} m^3/s")]
    FlowBoundExceeded { max_flow_m3ps: f64 },

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),
}

impl SolverError {
    /// True for the errors that mean the pump and pipe cannot be matched.
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            Self::UndersizedPump { .. } | Self::IncompatiblePump { .. } | Self::FlowBoundExceeded { .. }
        )
    }
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for HfError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::Component(inner) => inner.into(),
            SolverError::ProblemSetup { what } => HfError::Config { what },
            infeasible => HfError::Infeasible {
                what: infeasible.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SolverError::UndersizedPump {
            system_head_m: 12.0,
            pump_head_m: 10.0,
        };
        assert!(err.to_string().contains("Undersized pump"));
        assert!(err.is_infeasible());
    }

    #[test]
    fn error_conversion() {
        let hf: HfError = SolverError::IncompatiblePump {
            flow_m3ps: 0.01,
            system_head_m: 3.0,
        }
        .into();
        assert!(matches!(hf, HfError::Infeasible { .. }));

        let hf: HfError = SolverError::from(ComponentError::InvalidArg { what: "diameter" }).into();
        assert!(matches!(hf, HfError::InvalidArg { what: "diameter" }));
        assert!(!SolverError::ProblemSetup { what: "x".into() }.is_infeasible());
    }
}
