//! pathdx: parse, canonicalize and measure SVG path data.
//!
//! The `d` attribute of an SVG `<path>` element is a compact stateful
//! mini-language: moveto, lineto, horizontal/vertical lineto, cubic and
//! quadratic Bezier curves (with 'smooth' shorthand forms), elliptical
//! arcs and closepath. pathdx parses that language - including the
//! non-standard `B`/`b` bearing commands which rotate the frame of
//! reference for subsequent relative commands - and provides geometric
//! operations over the result:
//!
//! - bounding box (true curve extents, not just endpoints)
//! - total length (arcs measured on the true ellipse)
//! - normalization to the canonical `{M, L, C, Z}` basis
//! - affine transformation
//! - serialization back to path-data text
//!
//! ```
//! use pathdx::PathData;
//!
//! let path: PathData = "M0,0 L10,0 L10,10 Z".parse().unwrap();
//! let len = path.length().unwrap();
//! assert!((len - (20. + 200f64.sqrt())).abs() < 1e-9);
//! ```

mod constants;
mod errors;
mod geometry;
mod path;

pub use errors::{Error, Result};
pub use geometry::{
    BoundingBox, BoundingBoxBuilder, CubicBezier, Ellipse, PointTransform, Tolerances,
    TransformMatrix,
};
pub use path::{Command, CommandKind, PathData, PathSegment, PathSyntax, SvgPathSyntax};

/// Return a 'minimal' representation of the given number
pub fn fstr(x: f64) -> String {
    fstr_prec(x, 3)
}

/// As `fstr`, with the number of decimal places under caller control.
pub fn fstr_prec(x: f64, precision: usize) -> String {
    if x == (x as u32) as f64 {
        return (x as u32).to_string();
    }
    let result = format!("{x:.precision$}");
    if result.contains('.') {
        result.trim_end_matches('0').trim_end_matches('.').into()
    } else {
        result
    }
}

/// Parse a string to an f64
pub(crate) fn strp(s: &str) -> Result<f64> {
    s.parse().map_err(|e: std::num::ParseFloatError| e.into())
}
