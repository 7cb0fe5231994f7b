//! Spatial discretization of a single pipe run.
//!
//! A pipe is assembled section by section with [`PipeMeshBuilder`] and then
//! frozen into an immutable [`PipeMesh`]. Every node carries an arc-length
//! position, an elevation relative to the inlet and the minor-loss
//! coefficient of any fitting attached there.
//!
//! ## Section splicing
//!
//! A section of length `L` is sampled with `max(1, ceil(L/Δs))` equal
//! intervals. The first section contributes all of its nodes; each later
//! section replaces the current last node with its own first node, so
//! adjoining sections share one boundary node. The entry fitting of a section
//! sits on its first node and the pipe exit loss always sits on the final node.

use crate::common::{check_finite, check_positive};
use crate::error::{ComponentError, ComponentResult};
use crate::friction::FrictionLaw;
use hf_core::numeric::{linspace, steps_to_cover};
use hf_core::units::{Area, Length, m};

/// Default discretization step (m).
pub const DEFAULT_STEP_M: f64 = 0.001;

/// One straight run appended to a pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    /// Arc length of the run
    pub length: Length,
    /// Elevation gained (positive) or lost (negative) over the run
    pub elevation_change: Length,
    /// Minor-loss coefficient of the fitting at the start of the run
    pub entry_loss: f64,
}

impl Section {
    pub fn new(length: Length, elevation_change: Length, entry_loss: f64) -> Self {
        Self {
            length,
            elevation_change,
            entry_loss,
        }
    }

    /// Checks the section geometry.
    ///
    /// # Errors
    /// Returns [`ComponentError::InvalidSection`] for a negative length or an
    /// elevation change larger than the length.
    pub fn validate(&self) -> ComponentResult<()> {
        let length = self.length.value;
        let elevation_change = self.elevation_change.value;
        check_finite(length, "section length")?;
        check_finite(elevation_change, "section elevation change")?;
        check_finite(self.entry_loss, "entry loss coefficient")?;

        if length < 0.0 {
            return Err(ComponentError::InvalidSection {
                length,
                elevation_change,
                reason: "length cannot be negative",
            });
        }
        if length < elevation_change.abs() {
            return Err(ComponentError::InvalidSection {
                length,
                elevation_change,
                reason: "elevation change exceeds length",
            });
        }
        if self.entry_loss < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "entry loss coefficient cannot be negative",
            });
        }
        Ok(())
    }
}

/// Owned, growable pipe under construction.
#[derive(Debug, Clone)]
pub struct PipeMeshBuilder {
    diameter: Length,
    friction: FrictionLaw,
    step: Length,
    exit_loss: f64,
    sections: usize,
    position: Vec<f64>,
    elevation: Vec<f64>,
    minor_loss: Vec<f64>,
}

impl PipeMeshBuilder {
    /// Start an empty pipe of bore `diameter` with the given wall friction law.
    ///
    /// Uses [`DEFAULT_STEP_M`] and no exit loss until configured otherwise.
    pub fn new(diameter: Length, friction: FrictionLaw) -> ComponentResult<Self> {
        check_positive(diameter.value, "diameter must be positive")?;
        Ok(Self {
            diameter,
            friction,
            step: m(DEFAULT_STEP_M),
            exit_loss: 0.0,
            sections: 0,
            position: Vec::new(),
            elevation: Vec::new(),
            minor_loss: Vec::new(),
        })
    }

    /// Set the discretization step. Only affects sections appended afterwards.
    pub fn with_step(mut self, step: Length) -> ComponentResult<Self> {
        check_positive(step.value, "discretization step must be positive")?;
        self.step = step;
        Ok(self)
    }

    /// Set the loss coefficient applied at the pipe exit.
    pub fn with_exit_loss(mut self, exit_loss: f64) -> ComponentResult<Self> {
        check_finite(exit_loss, "exit loss coefficient")?;
        if exit_loss < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "exit loss coefficient cannot be negative",
            });
        }
        self.exit_loss = exit_loss;
        if let Some(last) = self.minor_loss.last_mut() {
            *last = exit_loss;
        }
        Ok(self)
    }

    /// Append a section to the end of the pipe.
    ///
    /// The builder is untouched when the section is rejected.
    pub fn add_section(&mut self, section: Section) -> ComponentResult<&mut Self> {
        section.validate()?;

        let intervals = steps_to_cover(section.length.value, self.step.value).max(1);
        let n = intervals + 1;

        let (start_pos, start_z) = match (self.position.last(), self.elevation.last()) {
            (Some(&p), Some(&z)) => (p, z),
            _ => (0.0, 0.0),
        };

        let position = linspace(start_pos, start_pos + section.length.value, n);
        let elevation = linspace(start_z, start_z + section.elevation_change.value, n);
        let mut minor_loss = vec![0.0; n];
        minor_loss[0] = section.entry_loss;
        minor_loss[n - 1] = self.exit_loss;

        // The shared boundary node takes the new section's entry fitting.
        if self.sections > 0 {
            self.position.pop();
            self.elevation.pop();
            self.minor_loss.pop();
        }
        self.position.extend(position);
        self.elevation.extend(elevation);
        self.minor_loss.extend(minor_loss);
        self.sections += 1;

        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    /// Freeze the pipe.
    ///
    /// # Errors
    /// Returns [`ComponentError::InvalidArg`] if no section was added.
    pub fn build(self) -> ComponentResult<PipeMesh> {
        if self.sections == 0 {
            return Err(ComponentError::InvalidArg {
                what: "pipe has no sections",
            });
        }

        let cumulative_minor_loss = self
            .minor_loss
            .iter()
            .scan(0.0, |acc, k| {
                *acc += k;
                Some(*acc)
            })
            .collect();

        Ok(PipeMesh {
            diameter: self.diameter,
            friction: self.friction,
            step: self.step,
            exit_loss: self.exit_loss,
            sections: self.sections,
            position: self.position,
            elevation: self.elevation,
            minor_loss: self.minor_loss,
            cumulative_minor_loss,
        })
    }
}

/// Immutable discretized pipe.
///
/// `position`, `elevation` and `minor_loss` always have the same length and
/// `position` starts at zero and never decreases.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeMesh {
    diameter: Length,
    friction: FrictionLaw,
    step: Length,
    exit_loss: f64,
    sections: usize,
    position: Vec<f64>,
    elevation: Vec<f64>,
    minor_loss: Vec<f64>,
    cumulative_minor_loss: Vec<f64>,
}

impl PipeMesh {
    /// A new mesh equal to this one with `section` appended.
    pub fn with_section(&self, section: Section) -> ComponentResult<PipeMesh> {
        let mut builder = self.to_builder();
        builder.add_section(section)?;
        builder.build()
    }

    /// Builder holding a copy of this mesh, ready for more sections.
    pub fn to_builder(&self) -> PipeMeshBuilder {
        PipeMeshBuilder {
            diameter: self.diameter,
            friction: self.friction,
            step: self.step,
            exit_loss: self.exit_loss,
            sections: self.sections,
            position: self.position.clone(),
            elevation: self.elevation.clone(),
            minor_loss: self.minor_loss.clone(),
        }
    }

    /// Arc-length coordinate of each node (m).
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Elevation of each node relative to the inlet (m).
    pub fn elevation(&self) -> &[f64] {
        &self.elevation
    }

    /// Minor-loss coefficient attached at each node.
    pub fn minor_loss(&self) -> &[f64] {
        &self.minor_loss
    }

    /// Running sum of `minor_loss` up to and including each node.
    pub fn cumulative_minor_loss(&self) -> &[f64] {
        &self.cumulative_minor_loss
    }

    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.sections
    }

    pub fn total_length(&self) -> Length {
        m(self.position.last().copied().unwrap_or(0.0))
    }

    /// Elevation of the outlet relative to the inlet.
    pub fn elevation_change(&self) -> Length {
        let first = self.elevation.first().copied().unwrap_or(0.0);
        let last = self.elevation.last().copied().unwrap_or(0.0);
        m(last - first)
    }

    pub fn total_minor_loss(&self) -> f64 {
        self.cumulative_minor_loss.last().copied().unwrap_or(0.0)
    }

    pub fn diameter(&self) -> Length {
        self.diameter
    }

    pub fn area(&self) -> Area {
        self.diameter * self.diameter * std::f64::consts::PI / 4.0
    }

    pub fn friction(&self) -> FrictionLaw {
        self.friction
    }

    pub fn step(&self) -> Length {
        self.step
    }

    pub fn exit_loss(&self) -> f64 {
        self.exit_loss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> PipeMeshBuilder {
        PipeMeshBuilder::new(m(0.5), FrictionLaw::HazenWilliams { c: 150.0 }).unwrap()
    }

    #[test]
    fn first_section_spans_zero_to_length() {
        let mut b = builder().with_step(m(0.1)).unwrap();
        b.add_section(Section::new(m(2.0), m(1.5), 0.5)).unwrap();
        let mesh = b.build().unwrap();

        assert_eq!(mesh.len(), 21);
        assert_eq!(mesh.position()[0], 0.0);
        assert_eq!(mesh.position()[20], 2.0);
        assert_eq!(mesh.elevation()[20], 1.5);
        assert_eq!(mesh.minor_loss()[0], 0.5);
        assert!(mesh.minor_loss()[1..].iter().all(|&k| k == 0.0));
    }

    #[test]
    fn sections_share_boundary_node() {
        let mut b = builder()
            .with_step(m(0.1))
            .unwrap()
            .with_exit_loss(1.0)
            .unwrap();
        b.add_section(Section::new(m(1.0), m(0.0), 0.5)).unwrap();
        assert_eq!(b.len(), 11);
        b.add_section(Section::new(m(0.5), m(-0.3), 0.3)).unwrap();
        assert_eq!(b.len(), 16);
        let mesh = b.build().unwrap();

        assert_eq!(mesh.position()[10], 1.0);
        assert_eq!(mesh.minor_loss()[10], 0.3, "joint carries the new entry fitting");
        assert_eq!(mesh.minor_loss()[15], 1.0, "exit loss on the true last node");
        assert_eq!(mesh.position()[15], 1.5);
        assert!((mesh.elevation_change().value + 0.3).abs() < 1e-12);
        assert!((mesh.total_minor_loss() - 1.8).abs() < 1e-12);
        assert_eq!(mesh.section_count(), 2);

        let duplicates = mesh.position().windows(2).filter(|w| w[0] == w[1]).count();
        assert_eq!(duplicates, 0);
    }

    #[test]
    fn default_step_gives_millimetre_nodes() {
        let mut b = builder();
        b.add_section(Section::new(m(2.0), m(0.0), 0.0)).unwrap();
        let mesh = b.build().unwrap();
        assert_eq!(mesh.len(), 2001);
        assert_eq!(mesh.total_length().value, 2.0);
    }

    #[test]
    fn invalid_sections_leave_builder_unchanged() {
        let mut b = builder().with_step(m(0.25)).unwrap();
        b.add_section(Section::new(m(1.0), m(0.5), 0.0)).unwrap();
        let before = b.clone().build().unwrap();

        let negative = b.add_section(Section::new(m(-1.0), m(0.0), 0.0));
        assert!(matches!(
            negative,
            Err(ComponentError::InvalidSection {
                reason: "length cannot be negative",
                ..
            })
        ));

        let too_steep = b.add_section(Section::new(m(1.0), m(-1.5), 0.0));
        assert!(matches!(
            too_steep,
            Err(ComponentError::InvalidSection {
                reason: "elevation change exceeds length",
                ..
            })
        ));

        assert_eq!(b.build().unwrap(), before);
    }

    #[test]
    fn vertical_section_is_allowed() {
        let mut b = builder().with_step(m(0.5)).unwrap();
        b.add_section(Section::new(m(1.0), m(-1.0), 0.0)).unwrap();
        assert_eq!(b.build().unwrap().elevation(), &[0.0, -0.5, -1.0]);
    }

    #[test]
    fn zero_length_section_adds_a_fitting_node() {
        let mut b = builder().with_step(m(0.5)).unwrap();
        b.add_section(Section::new(m(1.0), m(0.0), 0.0)).unwrap();
        b.add_section(Section::new(m(0.0), m(0.0), 0.9)).unwrap();
        let mesh = b.build().unwrap();
        assert_eq!(mesh.position(), &[0.0, 0.5, 1.0, 1.0]);
        assert_eq!(mesh.minor_loss()[2], 0.9);
    }

    #[test]
    fn with_section_returns_new_mesh() {
        let mut b = builder().with_step(m(0.5)).unwrap();
        b.add_section(Section::new(m(1.0), m(0.0), 0.0)).unwrap();
        let mesh = b.build().unwrap();
        let longer = mesh.with_section(Section::new(m(1.0), m(0.5), 0.2)).unwrap();

        assert_eq!(mesh.len(), 3);
        assert_eq!(longer.len(), 5);
        assert_eq!(longer.total_length().value, 2.0);
        assert!(mesh.with_section(Section::new(m(0.1), m(0.2), 0.0)).is_err());
    }

    #[test]
    fn empty_builder_cannot_build() {
        assert!(builder().build().is_err());
        assert!(PipeMeshBuilder::new(m(0.0), FrictionLaw::HazenWilliams { c: 150.0 }).is_err());
        assert!(builder().with_step(m(0.0)).is_err());
    }

    #[test]
    fn cumulative_minor_loss_is_prefix_sum() {
        let mut b = builder().with_step(m(0.5)).unwrap().with_exit_loss(1.0).unwrap();
        b.add_section(Section::new(m(1.0), m(0.0), 0.5)).unwrap();
        b.add_section(Section::new(m(1.0), m(0.0), 0.25)).unwrap();
        let mesh = b.build().unwrap();
        assert_eq!(mesh.minor_loss(), &[0.5, 0.0, 0.25, 0.0, 1.0]);
        assert_eq!(mesh.cumulative_minor_loss(), &[0.5, 0.5, 0.75, 0.75, 1.75]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn section_strategy() -> impl Strategy<Value = (f64, f64, f64)> {
        (0.0_f64..3.0, -1.0_f64..1.0, 0.0_f64..2.0)
            .prop_map(|(len, frac, k)| (len, len * frac, k))
    }

    proptest! {
        #[test]
        fn growth_matches_interval_count(sections in prop::collection::vec(section_strategy(), 1..8)) {
            let step = 0.05;
            let mut b = PipeMeshBuilder::new(m(0.1), FrictionLaw::HazenWilliams { c: 140.0 })
                .unwrap()
                .with_step(m(step))
                .unwrap();

            for (i, &(len, dz, k)) in sections.iter().enumerate() {
                let before = b.len();
                b.add_section(Section::new(m(len), m(dz), k)).unwrap();
                let intervals = steps_to_cover(len, step).max(1);
                let expected = if i == 0 { intervals + 1 } else { before + intervals };
                prop_assert_eq!(b.len(), expected);
                prop_assert!(b.len() > before);
            }

            let mesh = b.build().unwrap();
            prop_assert_eq!(mesh.position()[0], 0.0);
            prop_assert!(mesh.position().windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(mesh.position().len(), mesh.elevation().len());
            prop_assert_eq!(mesh.position().len(), mesh.minor_loss().len());
        }

        #[test]
        fn rejected_sections_never_mutate(len in 0.0_f64..2.0, excess in 1e-3_f64..1.0, negative in any::<bool>()) {
            let mut b = PipeMeshBuilder::new(m(0.1), FrictionLaw::HazenWilliams { c: 140.0 })
                .unwrap()
                .with_step(m(0.1))
                .unwrap();
            b.add_section(Section::new(m(1.0), m(0.2), 0.5)).unwrap();
            let before = b.clone().build().unwrap();

            let bad = if negative {
                Section::new(m(-excess), m(0.0), 0.0)
            } else {
                Section::new(m(len), m(len + excess), 0.0)
            };
            prop_assert!(b.add_section(bad).is_err());
            prop_assert_eq!(b.build().unwrap(), before);
        }
    }
}
