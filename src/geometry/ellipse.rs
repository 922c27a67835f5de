use std::f64::consts::FRAC_PI_2;

use super::{integrate, PointTransform, TransformMatrix};

/// Ellipse with center, radii, and x-axis rotation (degrees).
///
/// Angles are in degrees, measured from the (rotated) x-axis towards
/// the y-axis - clockwise in the screen coordinate convention used
/// throughout this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    pub rotation: f64,
}

impl Ellipse {
    pub fn new(cx: f64, cy: f64, rx: f64, ry: f64, rotation: f64) -> Self {
        Self {
            cx,
            cy,
            rx,
            ry,
            rotation,
        }
    }

    /// Point on the ellipse at the given angle (degrees).
    pub fn point(&self, degrees: f64) -> (f64, f64) {
        let t = degrees.to_radians();
        TransformMatrix::identity()
            .translate(self.cx, self.cy)
            .rotate(self.rotation)
            .scale(self.rx, self.ry)
            .transform_point(t.cos(), t.sin())
    }

    /// Arc length from `start_degrees` through `delta_degrees`.
    ///
    /// Reduces the swept range to quadrant-local incomplete elliptic
    /// integrals of the second kind, summed with quarter-turn
    /// symmetry; the result is independent of direction of travel.
    /// Degenerate radii give 0.
    pub fn length(&self, start_degrees: f64, delta_degrees: f64) -> f64 {
        let (rx, ry) = (self.rx.abs(), self.ry.abs());
        if rx == 0. || ry == 0. {
            return 0.;
        }
        let s0 = cumulative(rx, ry, start_degrees.to_radians());
        let s1 = cumulative(rx, ry, (start_degrees + delta_degrees).to_radians());
        (s1 - s0).abs()
    }
}

/// Incomplete elliptic integral of the second kind,
/// E(phi, m) = integral of sqrt(1 - m.sin^2 t) dt over [0, phi]
fn incomplete_elliptic_second(phi: f64, m: f64) -> f64 {
    integrate(&|t| (1. - m * t.sin().powi(2)).max(0.).sqrt(), 0., phi)
}

/// Arc length from angle 0 to `theta` within the first quadrant
/// (theta in [0, PI/2] radians)
fn quadrant_arc(rx: f64, ry: f64, theta: f64) -> f64 {
    let m = 1. - (rx / ry).powi(2);
    let phi = if theta >= FRAC_PI_2 {
        FRAC_PI_2
    } else {
        ((rx / ry) * theta.tan()).atan()
    };
    ry * incomplete_elliptic_second(phi, m)
}

/// Signed cumulative arc length from angle 0 to `theta` (radians),
/// folding any angle onto the first quadrant by symmetry
fn cumulative(rx: f64, ry: f64, theta: f64) -> f64 {
    if theta < 0. {
        return -cumulative(rx, ry, -theta);
    }
    let quarter = quadrant_arc(rx, ry, FRAC_PI_2);
    let k = (theta / FRAC_PI_2).floor();
    let u = theta - k * FRAC_PI_2;
    if (k as u64) % 2 == 0 {
        k * quarter + quadrant_arc(rx, ry, u)
    } else {
        (k + 1.) * quarter - quadrant_arc(rx, ry, FRAC_PI_2 - u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_point() {
        let e = Ellipse::new(100., 50., 10., 5., 0.);
        let (x, y) = e.point(0.);
        assert!((x - 110.).abs() < 1e-9 && (y - 50.).abs() < 1e-9);
        let (x, y) = e.point(90.);
        assert!((x - 100.).abs() < 1e-9 && (y - 55.).abs() < 1e-9);

        // 90 degree rotation swaps the axes
        let e = Ellipse::new(0., 0., 10., 5., 90.);
        let (x, y) = e.point(0.);
        assert!(x.abs() < 1e-9 && (y - 10.).abs() < 1e-9);
    }

    #[test]
    fn test_circle_length() {
        let c = Ellipse::new(0., 0., 10., 10., 0.);
        assert!((c.length(0., 90.) - PI * 5.).abs() < 1e-6);
        assert!((c.length(0., 360.) - PI * 20.).abs() < 1e-6);
        // direction of travel does not change the total
        assert!((c.length(90., -90.) - PI * 5.).abs() < 1e-6);
        // arbitrary start angle
        assert!((c.length(123., 45.) - PI * 10. * 45. / 180.).abs() < 1e-6);
    }

    #[test]
    fn test_ellipse_length() {
        let e = Ellipse::new(0., 0., 25., 100., 0.);
        // full perimeter (cross-checked against Ramanujan's approximation)
        assert!((e.length(0., 360.) - 428.9211).abs() < 0.01);
        // quarter turns all have equal length by symmetry
        let q = e.length(0., 90.);
        assert!((q - 428.9211 / 4.).abs() < 0.01);
        assert!((e.length(90., 90.) - q).abs() < 1e-6);
        assert!((e.length(180., 90.) - q).abs() < 1e-6);
        // spans crossing a quadrant boundary sum correctly
        let a = e.length(45., 90.);
        let b = e.length(45., 45.) + e.length(90., 45.);
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_length() {
        assert_eq!(Ellipse::new(0., 0., 0., 10., 0.).length(0., 90.), 0.);
        assert_eq!(Ellipse::new(0., 0., 10., 0., 0.).length(0., 360.), 0.);
    }
}
