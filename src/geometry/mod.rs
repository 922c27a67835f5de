mod bbox;
mod bezier;
mod ellipse;
mod transform;

pub use bbox::{BoundingBox, BoundingBoxBuilder};
pub use bezier::CubicBezier;
pub use ellipse::Ellipse;
pub use transform::{PointTransform, TransformMatrix};

use crate::constants::{EPSILON_ABS, EPSILON_REL};

/// Numeric tolerances for "approximately zero / equal" decisions.
///
/// Passed explicitly into the operations which make degenerate-radius
/// and coincident-endpoint checks, so callers (and tests) can vary
/// them without any shared state. The defaults are the documented
/// contract of the crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub relative: f64,
    pub absolute: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            relative: EPSILON_REL,
            absolute: EPSILON_ABS,
        }
    }
}

impl Tolerances {
    pub fn close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.absolute.max(self.relative * a.abs().max(b.abs()))
    }

    pub fn zero(&self, v: f64) -> bool {
        self.close(v, 0.)
    }
}

/// Integrate a smooth scalar function over [a, b] by adaptive Simpson
/// quadrature.
pub(crate) fn integrate<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> f64 {
    if a == b {
        return 0.;
    }
    let m = (a + b) / 2.;
    let (fa, fm, fb) = (f(a), f(m), f(b));
    let whole = (b - a) / 6. * (fa + 4. * fm + fb);
    adaptive_simpson(f, a, b, fa, fm, fb, whole, 1e-10, 24)
}

#[allow(clippy::too_many_arguments)]
fn adaptive_simpson<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
    tol: f64,
    depth: u32,
) -> f64 {
    let m = (a + b) / 2.;
    let lm = (a + m) / 2.;
    let rm = (m + b) / 2.;
    let flm = f(lm);
    let frm = f(rm);
    let left = (m - a) / 6. * (fa + 4. * flm + fm);
    let right = (b - m) / 6. * (fm + 4. * frm + fb);
    let delta = left + right - whole;
    if depth == 0 || delta.abs() <= 15. * tol {
        left + right + delta / 15.
    } else {
        adaptive_simpson(f, a, m, fa, flm, fm, left, tol / 2., depth - 1)
            + adaptive_simpson(f, m, b, fm, frm, fb, right, tol / 2., depth - 1)
    }
}
