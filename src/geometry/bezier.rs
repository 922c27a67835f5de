use super::{integrate, BoundingBox, BoundingBoxBuilder};

/// Cubic Bezier curve given by four control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: (f64, f64),
    pub p1: (f64, f64),
    pub p2: (f64, f64),
    pub p3: (f64, f64),
}

impl CubicBezier {
    pub fn new(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64), p3: (f64, f64)) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Polynomial coefficients (a, b, c, d) for one axis, such that
    /// B(t) = a.t^3 + b.t^2 + c.t + d
    fn coefficients(p0: f64, p1: f64, p2: f64, p3: f64) -> (f64, f64, f64, f64) {
        (
            -p0 + 3. * p1 - 3. * p2 + p3,
            3. * p0 - 6. * p1 + 3. * p2,
            -3. * p0 + 3. * p1,
            p0,
        )
    }

    /// Point on the curve at parameter t in [0, 1]
    pub fn point(&self, t: f64) -> (f64, f64) {
        let eval = |p0, p1, p2, p3| {
            let (a, b, c, d) = Self::coefficients(p0, p1, p2, p3);
            ((a * t + b) * t + c) * t + d
        };
        (
            eval(self.p0.0, self.p1.0, self.p2.0, self.p3.0),
            eval(self.p0.1, self.p1.1, self.p2.1, self.p3.1),
        )
    }

    /// Parameter values in [0, 1] where dx/dt or dy/dt vanishes.
    ///
    /// At most four values (two per axis); these are the candidate
    /// curve extrema used for bounding box computation.
    pub fn roots(&self) -> Vec<f64> {
        fn axis_roots(ts: &mut Vec<f64>, p0: f64, p1: f64, p2: f64, p3: f64) {
            // B'(t) = 3(1-t)^2 (p1-p0) + 6(1-t)t (p2-p1) + 3t^2 (p3-p2),
            // rearranged to standard form at^2 + bt + c = 0
            let a = 3. * (p3 - 3. * p2 + 3. * p1 - p0);
            let b = 6. * (p2 - 2. * p1 + p0);
            let c = 3. * (p1 - p0);

            if a.abs() < 1e-12 {
                // Linear case: bt + c = 0
                if b.abs() >= 1e-12 {
                    let t = -c / b;
                    if (0. ..=1.).contains(&t) {
                        ts.push(t);
                    }
                }
            } else {
                let disc = b * b - 4. * a * c;
                if disc >= 0. {
                    let sqrt_disc = disc.sqrt();
                    for t in [
                        (-b + sqrt_disc) / (2. * a),
                        (-b - sqrt_disc) / (2. * a),
                    ] {
                        if (0. ..=1.).contains(&t) {
                            ts.push(t);
                        }
                    }
                }
            }
        }

        let mut ts = Vec::new();
        axis_roots(&mut ts, self.p0.0, self.p1.0, self.p2.0, self.p3.0);
        axis_roots(&mut ts, self.p0.1, self.p1.1, self.p2.1, self.p3.1);
        ts
    }

    /// True bounding box: endpoints unioned with the curve extrema.
    pub fn bbox(&self) -> BoundingBox {
        let mut bb = BoundingBoxBuilder::new();
        bb.extend_point(self.p0.0, self.p0.1);
        bb.extend_point(self.p3.0, self.p3.1);
        for t in self.roots() {
            let (x, y) = self.point(t);
            bb.extend_point(x, y);
        }
        bb.build().expect("endpoints always extend the builder")
    }

    /// Arc length, by quadrature of the squared-speed polynomial.
    pub fn length(&self) -> f64 {
        // B'(t) per axis is the quadratic At^2 + Bt + C; |B'(t)|^2 is
        // then a quartic in t with coefficients accumulated over both
        // axes.
        let deriv = |p0, p1, p2, p3| {
            let (a, b, c, _) = Self::coefficients(p0, p1, p2, p3);
            (3. * a, 2. * b, c)
        };
        let (ax, bx, cx) = deriv(self.p0.0, self.p1.0, self.p2.0, self.p3.0);
        let (ay, by, cy) = deriv(self.p0.1, self.p1.1, self.p2.1, self.p3.1);

        let c4 = ax * ax + ay * ay;
        let c3 = 2. * (ax * bx + ay * by);
        let c2 = bx * bx + by * by + 2. * (ax * cx + ay * cy);
        let c1 = 2. * (bx * cx + by * cy);
        let c0 = cx * cx + cy * cy;

        integrate(
            &|t| ((((c4 * t + c3) * t + c2) * t + c1) * t + c0).max(0.).sqrt(),
            0.,
            1.,
        )
    }
}
