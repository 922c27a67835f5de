//! Constants used throughout pathdx

/// Default relative tolerance for approximately-equal comparisons
pub const EPSILON_REL: f64 = 1e-6;
/// Default absolute tolerance for approximately-zero comparisons
pub const EPSILON_ABS: f64 = 1e-6;

/// Maximum angular extent (degrees) covered by a single cubic Bezier
/// when decomposing an elliptical arc
pub const ARC_CHUNK_DEGREES: f64 = 90.;
