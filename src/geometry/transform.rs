/// Mapping of a 2-D point through some transformation.
///
/// This is the seam between the path operations and whatever affine
/// machinery the caller has; `PathData::transform` accepts any
/// implementation.
pub trait PointTransform {
    fn transform_point(&self, x: f64, y: f64) -> (f64, f64);
}

/// 2-D affine transform in SVG matrix form `(a b c d e f)`:
///
/// ```text
/// | a c e |   | x |
/// | b d f | * | y |
/// | 0 0 1 |   | 1 |
/// ```
///
/// Operations compose left-to-right as in an SVG `transform` list, so
/// `identity().translate(tx, ty).rotate(r).scale(sx, sy)` scales first,
/// then rotates, then translates - matching
/// `transform="translate(..) rotate(..) scale(..)"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformMatrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl TransformMatrix {
    pub fn identity() -> Self {
        Self {
            a: 1.,
            b: 0.,
            c: 0.,
            d: 1.,
            e: 0.,
            f: 0.,
        }
    }

    /// Post-multiply by the given matrix (left-to-right composition)
    fn then(self, o: Self) -> Self {
        Self {
            a: self.a * o.a + self.c * o.b,
            b: self.b * o.a + self.d * o.b,
            c: self.a * o.c + self.c * o.d,
            d: self.b * o.c + self.d * o.d,
            e: self.a * o.e + self.c * o.f + self.e,
            f: self.b * o.e + self.d * o.f + self.f,
        }
    }

    pub fn translate(self, tx: f64, ty: f64) -> Self {
        self.then(Self {
            a: 1.,
            b: 0.,
            c: 0.,
            d: 1.,
            e: tx,
            f: ty,
        })
    }

    /// Rotation about the origin; angle in degrees
    pub fn rotate(self, degrees: f64) -> Self {
        let (sin_a, cos_a) = degrees.to_radians().sin_cos();
        self.then(Self {
            a: cos_a,
            b: sin_a,
            c: -sin_a,
            d: cos_a,
            e: 0.,
            f: 0.,
        })
    }

    pub fn scale(self, sx: f64, sy: f64) -> Self {
        self.then(Self {
            a: sx,
            b: 0.,
            c: 0.,
            d: sy,
            e: 0.,
            f: 0.,
        })
    }
}

impl PointTransform for TransformMatrix {
    fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}
