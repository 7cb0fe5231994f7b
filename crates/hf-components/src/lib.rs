//! hf-components: building blocks for a pumped pipe run.
//!
//! Provides:
//! - Linear and quadratic interpolation through known points
//! - Pump head curves (tabulated vendor data, constant head, closures)
//! - Major-loss laws (Hazen-Williams, Darcy-Weisbach)
//! - Material and fitting catalogs
//! - The pipe mesh builder that discretizes a run section by section
//!
//! # Example
//!
//! ```
//! use hf_components::{FrictionLaw, PipeMeshBuilder, Section};
//! use hf_core::units::m;
//!
//! let mut builder = PipeMeshBuilder::new(m(0.05), FrictionLaw::HazenWilliams { c: 150.0 })
//!     .unwrap()
//!     .with_step(m(0.01))
//!     .unwrap();
//! builder
//!     .add_section(Section::new(m(2.0), m(1.5), 0.5))
//!     .unwrap()
//!     .add_section(Section::new(m(3.0), m(0.0), 0.3))
//!     .unwrap();
//! let mesh = builder.build().unwrap();
//!
//! assert_eq!(mesh.len(), 501);
//! assert_eq!(mesh.total_length().value, 5.0);
//! ```

pub mod catalog;
pub mod common;
pub mod error;
pub mod friction;
pub mod interpolate;
pub mod mesh;
pub mod pump_curve;

// Re-exports
pub use catalog::{Fitting, FittingCatalog, FrictionModel, Material, MaterialCatalog};
pub use error::{ComponentError, ComponentResult};
pub use friction::FrictionLaw;
pub use mesh::{DEFAULT_STEP_M, PipeMesh, PipeMeshBuilder, Section};
pub use pump_curve::{ConstantHeadCurve, InterpolationRule, PiecewiseCurve, PumpCurve};
