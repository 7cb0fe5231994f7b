use crate::HfError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, HfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HfError::NonFinite { what, value: v })
    }
}

/// Number of whole steps of size `step` needed to cover `span`.
///
/// Quotients within `1e-9` (absolute or relative) of an integer snap to that
/// integer, so `2.0 / 0.001` counts 2000 steps rather than 2001.
pub fn steps_to_cover(span: Real, step: Real) -> usize {
    const SNAP: Tolerances = Tolerances {
        abs: 1e-9,
        rel: 1e-9,
    };
    let ratio = span / step;
    let nearest = ratio.round();
    if nearly_equal(ratio, nearest, SNAP) {
        nearest as usize
    } else {
        ratio.ceil() as usize
    }
}

/// `n` evenly spaced samples from `start` to `end`, both endpoints included.
///
/// The last sample is `end` exactly; `n == 1` yields `[start]`.
pub fn linspace(start: Real, end: Real, n: usize) -> Vec<Real> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = n - 1;
            let delta = (end - start) / last as Real;
            (0..n)
                .map(|i| {
                    if i == last {
                        end
                    } else {
                        start + delta * i as Real
                    }
                })
                .collect()
        }
    }
}
