//! Pump head-versus-flow characteristics.

use crate::error::{ComponentError, ComponentResult};
use crate::interpolate::{self, Point};
use hf_core::units::{Length, VolumeRate, m, m3ps};

/// Head a pump delivers as a function of volumetric flow.
///
/// Implementations must be total over non-negative flows and return zero
/// head at and beyond shutoff. Any `Fn(VolumeRate) -> Length` closure is a
/// pump curve.
pub trait PumpCurve {
    /// Delivered head at `flow`.
    fn head(&self, flow: VolumeRate) -> Length;

    /// Flow at which head first reaches zero, when the curve knows it.
    fn shutoff_flow(&self) -> Option<VolumeRate> {
        None
    }
}

impl<F> PumpCurve for F
where
    F: Fn(VolumeRate) -> Length,
{
    fn head(&self, flow: VolumeRate) -> Length {
        self(flow)
    }
}

/// How a [`PiecewiseCurve`] fills in between breakpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InterpolationRule {
    /// Straight line through the bracketing pair.
    #[default]
    Linear,
    /// Parabola through the bracketing pair and its nearest neighbour.
    Quadratic,
}

impl InterpolationRule {
    fn min_points(self) -> usize {
        match self {
            Self::Linear => 2,
            Self::Quadratic => 3,
        }
    }
}

/// Pump curve built from tabulated vendor data.
///
/// Breakpoints are sorted by flow; the last breakpoint is the shutoff flow.
/// Flows at or past shutoff deliver exactly zero head.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseCurve {
    flows: Vec<f64>,
    heads: Vec<f64>,
    rule: InterpolationRule,
}

impl PiecewiseCurve {
    /// Create a curve from `(flow, head)` breakpoints.
    ///
    /// # Errors
    /// Returns [`ComponentError::InvalidCurve`] if there are too few points for
    /// the rule, flows are not strictly increasing from a non-negative start,
    /// or any head is negative or non-finite.
    pub fn new(
        points: impl IntoIterator<Item = (VolumeRate, Length)>,
        rule: InterpolationRule,
    ) -> ComponentResult<Self> {
        let (flows, heads): (Vec<f64>, Vec<f64>) =
            points.into_iter().map(|(q, h)| (q.value, h.value)).unzip();

        if flows.len() < rule.min_points() {
            return Err(ComponentError::InvalidCurve {
                what: format!(
                    "{:?} interpolation needs at least {} points, got {}",
                    rule,
                    rule.min_points(),
                    flows.len()
                ),
            });
        }
        if flows.iter().chain(&heads).any(|v| !v.is_finite()) {
            return Err(ComponentError::InvalidCurve {
                what: "breakpoints must be finite".to_string(),
            });
        }
        if flows[0] < 0.0 {
            return Err(ComponentError::InvalidCurve {
                what: format!("first flow {} is negative", flows[0]),
            });
        }
        if let Some(w) = flows.windows(2).find(|w| w[1] <= w[0]) {
            return Err(ComponentError::InvalidCurve {
                what: format!("flows must strictly increase ({} then {})", w[0], w[1]),
            });
        }
        if let Some(h) = heads.iter().find(|h| **h < 0.0) {
            return Err(ComponentError::InvalidCurve {
                what: format!("head {h} is negative"),
            });
        }

        Ok(Self { flows, heads, rule })
    }

    /// Create a curve from SI breakpoints (m³/s, m).
    pub fn from_si_points(points: &[Point], rule: InterpolationRule) -> ComponentResult<Self> {
        Self::new(points.iter().map(|&(q, h)| (m3ps(q), m(h))), rule)
    }

    pub fn rule(&self) -> InterpolationRule {
        self.rule
    }

    /// Breakpoints as SI `(flow, head)` pairs.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.flows.iter().copied().zip(self.heads.iter().copied())
    }

    /// Index of the first breakpoint of the segment bracketing `q`.
    fn segment(&self, q: f64) -> usize {
        let upper = self.flows.partition_point(|&f| f <= q);
        upper.saturating_sub(1).min(self.flows.len() - 2)
    }

    fn point(&self, i: usize) -> Point {
        (self.flows[i], self.heads[i])
    }

    fn eval(&self, q: f64) -> ComponentResult<f64> {
        let i = self.segment(q);
        match self.rule {
            InterpolationRule::Linear => interpolate::linear(self.point(i), self.point(i + 1), q),
            InterpolationRule::Quadratic => {
                let j = i.min(self.flows.len() - 3);
                interpolate::quadratic(self.point(j), self.point(j + 1), self.point(j + 2), q)
            }
        }
    }
}

impl PumpCurve for PiecewiseCurve {
    fn head(&self, flow: VolumeRate) -> Length {
        let q = flow.value;
        if q >= self.flows[self.flows.len() - 1] {
            return m(0.0);
        }
        // Abscissae are validated distinct in `new`, so `eval` cannot fail.
        m(self.eval(q).map_or(0.0, |h| h.max(0.0)))
    }

    fn shutoff_flow(&self) -> Option<VolumeRate> {
        self.flows.last().map(|&q| m3ps(q))
    }
}

/// Flat head up to a hard shutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantHeadCurve {
    pub head: Length,
    pub shutoff: VolumeRate,
}

impl ConstantHeadCurve {
    pub fn new(head: Length, shutoff: VolumeRate) -> ComponentResult<Self> {
        if !(head.value.is_finite() && head.value >= 0.0) {
            return Err(ComponentError::InvalidCurve {
                what: format!("head {} must be finite and non-negative", head.value),
            });
        }
        if !(shutoff.value.is_finite() && shutoff.value > 0.0) {
            return Err(ComponentError::InvalidCurve {
                what: format!("shutoff flow {} must be positive", shutoff.value),
            });
        }
        Ok(Self { head, shutoff })
    }
}

impl PumpCurve for ConstantHeadCurve {
    fn head(&self, flow: VolumeRate) -> Length {
        if flow < self.shutoff {
            self.head
        } else {
            m(0.0)
        }
    }

    fn shutoff_flow(&self) -> Option<VolumeRate> {
        Some(self.shutoff)
    }
}
