//! Linear and quadratic interpolation through known points.
//!
//! Neither function checks bounds: evaluating outside the span of the
//! supplied points extrapolates along the same line or parabola.

use crate::error::{ComponentError, ComponentResult};

/// A known `(x, y)` sample.
pub type Point = (f64, f64);

/// Evaluates the line through `p1` and `p2` at `x`.
///
/// Written in barycentric form so that `linear(p1, p2, p1.0) == p1.1` and
/// `linear(p1, p2, p2.0) == p2.1` hold exactly.
///
/// # Errors
///
/// Returns [`ComponentError::DegenerateInterpolation`] if the abscissae coincide.
pub fn linear(p1: Point, p2: Point, x: f64) -> ComponentResult<f64> {
    let (x1, y1) = p1;
    let (x2, y2) = p2;
    distinct(x1, x2)?;

    let t = (x - x1) / (x2 - x1);
    Ok(y1 * (1.0 - t) + y2 * t)
}

/// Evaluates the unique parabola through `p1`, `p2` and `p3` at `x`.
///
/// Uses the Lagrange basis, which reproduces every input point exactly.
///
/// # Errors
///
/// Returns [`ComponentError::DegenerateInterpolation`] if any two abscissae
/// coincide, since the Vandermonde system is then singular.
pub fn quadratic(p1: Point, p2: Point, p3: Point, x: f64) -> ComponentResult<f64> {
    let (x1, y1) = p1;
    let (x2, y2) = p2;
    let (x3, y3) = p3;
    distinct(x1, x2)?;
    distinct(x1, x3)?;
    distinct(x2, x3)?;

    let l1 = ((x - x2) * (x - x3)) / ((x1 - x2) * (x1 - x3));
    let l2 = ((x - x1) * (x - x3)) / ((x2 - x1) * (x2 - x3));
    let l3 = ((x - x1) * (x - x2)) / ((x3 - x1) * (x3 - x2));
    Ok(y1 * l1 + y2 * l2 + y3 * l3)
}

fn distinct(x1: f64, x2: f64) -> ComponentResult<()> {
    if x1 == x2 {
        Err(ComponentError::DegenerateInterpolation { x1, x2 })
    } else {
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn linear_reproduces_endpoints(
            x1 in -1e3_f64..1e3,
            dx in 1e-3_f64..1e3,
            y1 in -1e3_f64..1e3,
            y2 in -1e3_f64..1e3,
        ) {
            let x2 = x1 + dx;
            prop_assert_eq!(linear((x1, y1), (x2, y2), x1).unwrap(), y1);
            prop_assert_eq!(linear((x1, y1), (x2, y2), x2).unwrap(), y2);
        }

        #[test]
        fn quadratic_reproduces_nodes(
            x1 in -1e3_f64..1e3,
            d1 in 1e-2_f64..1e2,
            d2 in 1e-2_f64..1e2,
            ys in prop::array::uniform3(-1e3_f64..1e3),
        ) {
            let xs = [x1, x1 + d1, x1 + d1 + d2];
            let pts = [(xs[0], ys[0]), (xs[1], ys[1]), (xs[2], ys[2])];
            for (x, y) in pts {
                prop_assert_eq!(quadratic(pts[0], pts[1], pts[2], x).unwrap(), y);
            }
        }
    }
}
