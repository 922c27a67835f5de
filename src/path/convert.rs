//! Reduction of path segments to the canonical {Move, Line, Cubic,
//! Close} basis.
//!
//! Relative coordinates are resolved against the current point after
//! rotation by the current bearing, per the (retired) SVG2 bearing
//! proposal: the local x axis of a relative command is aligned with
//! the bearing direction. Horizontal/vertical lines become lines,
//! quadratic curves are degree-elevated to cubics, smooth shorthands
//! are expanded by control-point reflection, and elliptical arcs are
//! decomposed into runs of cubic Bezier chunks.

use super::segment::{CommandKind, PathSegment};
use crate::constants::ARC_CHUNK_DEGREES;
use crate::errors::{Error, Result};
use crate::geometry::{PointTransform, Tolerances, TransformMatrix};

/// Traversal context threaded through the stateful path operations.
///
/// Re-derived from scratch by each operation; never stored on the
/// path itself, so independent folds cannot interfere.
#[derive(Debug, Clone, Default)]
pub(crate) struct TraversalState {
    // current position, updated as segments are processed
    pub current: Option<(f64, f64)>,
    // location to return to for 'Z'/'z' segments
    pub subpath_start: Option<(f64, f64)>,
    // current bearing in degrees; adjusted only by 'B'/'b'
    pub bearing: f64,
    // kind of the previously processed segment, for the
    // repeated-moveto continuation rule
    pub prev_kind: Option<CommandKind>,
    // previous second control point (if any) for evaluating 'S'/'s'
    pub cubic_cp2: Option<(f64, f64)>,
    // previous control point (if any) for evaluating 'T'/'t'
    pub quadratic_cp: Option<(f64, f64)>,
}

impl TraversalState {
    pub fn current_or_origin(&self) -> (f64, f64) {
        self.current.unwrap_or((0., 0.))
    }

    /// Record a processed segment which ended at the given point,
    /// outside of `canonicalize` (used when arcs are measured on the
    /// true ellipse rather than decomposed).
    pub fn note_endpoint(&mut self, kind: CommandKind, end: (f64, f64)) {
        self.current = Some(end);
        self.prev_kind = Some(kind);
        self.cubic_cp2 = None;
        self.quadratic_cp = None;
    }
}

/// Rewrite a relative segment as its absolute equivalent at the given
/// current point. Coordinate deltas are rotated by the current bearing
/// before translation; absolute segments and close/bearing pass
/// through unchanged. Relative horizontal/vertical lines under a
/// nonzero bearing cannot stay axis-aligned and become lines.
pub(crate) fn to_absolute(seg: &PathSegment, cpx: f64, cpy: f64, bearing: f64) -> PathSegment {
    use CommandKind::*;
    if seg.is_absolute() || !seg.is_valid() {
        return seg.clone();
    }
    let a = seg.args();
    // "When a relative l command is used, the end point of the line is
    // (cpx + x cos cb + y sin cb, cpy + x sin cb + y cos cb)."
    let (sin_b, cos_b) = bearing.to_radians().sin_cos();
    let pt = |dx: f64, dy: f64| (cpx + dx * cos_b + dy * sin_b, cpy + dx * sin_b + dy * cos_b);
    match seg.kind() {
        MoveTo => {
            let (x, y) = pt(a[0], a[1]);
            PathSegment::move_to(true, x, y)
        }
        LineTo => {
            let (x, y) = pt(a[0], a[1]);
            PathSegment::line_to(true, x, y)
        }
        HorizontalLineTo => {
            if bearing != 0. {
                let (x, y) = pt(a[0], 0.);
                PathSegment::line_to(true, x, y)
            } else {
                PathSegment::horizontal_to(true, cpx + a[0])
            }
        }
        VerticalLineTo => {
            if bearing != 0. {
                // "When a relative v command is used, the end point of the
                // line is (cpx + y sin cb, cpy + y cos cb)."
                let (x, y) = pt(0., a[0]);
                PathSegment::line_to(true, x, y)
            } else {
                PathSegment::vertical_to(true, cpy + a[0])
            }
        }
        CubicCurveTo => {
            let (x1, y1) = pt(a[0], a[1]);
            let (x2, y2) = pt(a[2], a[3]);
            let (x, y) = pt(a[4], a[5]);
            PathSegment::cubic_to(true, x1, y1, x2, y2, x, y)
        }
        SmoothCubicCurveTo => {
            let (x2, y2) = pt(a[0], a[1]);
            let (x, y) = pt(a[2], a[3]);
            PathSegment::smooth_cubic_to(true, x2, y2, x, y)
        }
        QuadraticCurveTo => {
            let (x1, y1) = pt(a[0], a[1]);
            let (x, y) = pt(a[2], a[3]);
            PathSegment::quadratic_to(true, x1, y1, x, y)
        }
        SmoothQuadraticCurveTo => {
            let (x, y) = pt(a[0], a[1]);
            PathSegment::smooth_quadratic_to(true, x, y)
        }
        EllipticalArcTo => {
            let (x, y) = pt(a[5], a[6]);
            PathSegment::arc_to(true, a[0], a[1], a[2], a[3] != 0., a[4] != 0., x, y)
        }
        Bearing | ClosePath | CatmullRom => seg.clone(),
    }
}

/// Degree-elevate a quadratic Bezier (current point, control, end) to
/// the equivalent cubic.
fn elevate_quadratic(px: f64, py: f64, qx: f64, qy: f64, ex: f64, ey: f64) -> PathSegment {
    let x1 = px + 2. / 3. * (qx - px);
    let y1 = py + 2. / 3. * (qy - py);
    let x2 = ex + 2. / 3. * (qx - ex);
    let y2 = ey + 2. / 3. * (qy - ey);
    PathSegment::cubic_to(true, x1, y1, x2, y2, ex, ey)
}

/// Reduce one segment to canonical segments, updating the traversal
/// state. Invalid segments produce nothing; reserved segments fail.
pub(crate) fn canonicalize(
    seg: &PathSegment,
    state: &mut TraversalState,
    tol: &Tolerances,
) -> Result<Vec<PathSegment>> {
    use CommandKind::*;
    if seg.kind() == CatmullRom {
        return Err(Error::UnsupportedSegment(seg.command().letter().to_string()));
    }
    if !seg.is_valid() {
        return Ok(vec![]);
    }

    if seg.kind() == Bearing {
        if seg.is_absolute() {
            state.bearing = seg.args()[0];
        } else {
            state.bearing += seg.args()[0];
        }
        let pos = state.current_or_origin();
        state.note_endpoint(Bearing, pos);
        return Ok(vec![]);
    }

    let orig_kind = seg.kind();
    // 'Subsequent "moveto" commands represent the start of a new
    // subpath' - but a moveto repeated with no intervening draw
    // command is the multi-group shorthand, continuing the subpath
    // as an implicit lineto.
    let seg = if orig_kind == MoveTo && state.prev_kind == Some(MoveTo) {
        PathSegment::line_to(seg.is_absolute(), seg.args()[0], seg.args()[1])
    } else {
        seg.clone()
    };

    let (cpx, cpy) = state.current_or_origin();
    let seg = to_absolute(&seg, cpx, cpy, state.bearing);
    let a = seg.args().to_vec();

    let mut cubic_cp2 = None;
    let mut quadratic_cp = None;
    let out = match seg.kind() {
        MoveTo => {
            state.current = Some((a[0], a[1]));
            state.subpath_start = state.current;
            vec![seg.clone()]
        }
        LineTo => {
            state.current = Some((a[0], a[1]));
            vec![seg.clone()]
        }
        HorizontalLineTo => {
            state.current = Some((a[0], cpy));
            vec![PathSegment::line_to(true, a[0], cpy)]
        }
        VerticalLineTo => {
            state.current = Some((cpx, a[0]));
            vec![PathSegment::line_to(true, cpx, a[0])]
        }
        CubicCurveTo => {
            cubic_cp2 = Some((a[2], a[3]));
            state.current = Some((a[4], a[5]));
            vec![seg.clone()]
        }
        SmoothCubicCurveTo => {
            // "The first control point is assumed to be the reflection of
            //  the second control point on the previous command relative
            //  to the current point. If there is no previous command or
            //  if the previous command was not an C, c, S or s, assume
            //  the first control point is coincident with the current
            //  point."
            let (x1, y1) = match state.cubic_cp2 {
                Some((px, py)) => (2. * cpx - px, 2. * cpy - py),
                None => (cpx, cpy),
            };
            cubic_cp2 = Some((a[0], a[1]));
            state.current = Some((a[2], a[3]));
            vec![PathSegment::cubic_to(true, x1, y1, a[0], a[1], a[2], a[3])]
        }
        QuadraticCurveTo => {
            quadratic_cp = Some((a[0], a[1]));
            state.current = Some((a[2], a[3]));
            vec![elevate_quadratic(cpx, cpy, a[0], a[1], a[2], a[3])]
        }
        SmoothQuadraticCurveTo => {
            // "The control point is assumed to be the reflection of the
            //  control point on the previous command relative to the
            //  current point. (If there is no previous command or if the
            //  previous command was not a Q, q, T or t, assume the
            //  control point is coincident with the current point.)"
            let (qx, qy) = match state.quadratic_cp {
                Some((px, py)) => (2. * cpx - px, 2. * cpy - py),
                None => (cpx, cpy),
            };
            quadratic_cp = Some((qx, qy));
            state.current = Some((a[0], a[1]));
            vec![elevate_quadratic(cpx, cpy, qx, qy, a[0], a[1])]
        }
        EllipticalArcTo => {
            let start = (cpx, cpy);
            let end = (a[5], a[6]);
            state.current = Some(end);
            if tol.close(start.0, end.0) && tol.close(start.1, end.1) {
                // zero-extent arc draws nothing
                vec![]
            } else if tol.zero(a[0]) || tol.zero(a[1]) {
                // degenerate radius degrades to a straight line
                vec![PathSegment::line_to(true, end.0, end.1)]
            } else {
                let arc = arc_center(start, a[0], a[1], a[2], a[3] != 0., a[4] != 0., end);
                arc_cubics(&arc, end)
            }
        }
        ClosePath => {
            state.current = state.subpath_start.or(Some((0., 0.)));
            vec![seg.clone()]
        }
        Bearing | CatmullRom => unreachable!("handled above"),
    };
    state.prev_kind = Some(orig_kind);
    state.cubic_cp2 = cubic_cp2;
    state.quadratic_cp = quadratic_cp;
    Ok(out)
}

/// Center parameterization of an endpoint-form elliptical arc.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ArcCenter {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    /// x-axis rotation, degrees
    pub rotation: f64,
    /// start angle, radians
    pub theta: f64,
    /// signed angular extent, radians
    pub delta: f64,
}

/// Convert an arc from endpoint to center form, scaling the radii up
/// if the chord cannot otherwise be reached. The caller has already
/// excluded degenerate radii and coincident endpoints.
///
/// Implements
/// <https://www.w3.org/TR/SVG2/implnote.html#ArcConversionEndpointToCenter>
/// and
/// <https://www.w3.org/TR/SVG2/implnote.html#ArcCorrectionOutOfRangeRadii>
pub(crate) fn arc_center(
    start: (f64, f64),
    rx: f64,
    ry: f64,
    rotation: f64,
    large_arc: bool,
    sweep: bool,
    end: (f64, f64),
) -> ArcCenter {
    use std::f64::consts::PI;

    let (x1, y1) = start;
    let (x2, y2) = end;
    let (mut rx, mut ry) = (rx.abs(), ry.abs());
    let phi = rotation.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Step 1: Compute (x1', y1')
    let x1_prime = cos_phi * (x1 - x2) / 2.0 + sin_phi * (y1 - y2) / 2.0;
    let y1_prime = -sin_phi * (x1 - x2) / 2.0 + cos_phi * (y1 - y2) / 2.0;

    // Scale radii up if required to reach the endpoint
    let lambda = (x1_prime * x1_prime) / (rx * rx) + (y1_prime * y1_prime) / (ry * ry);
    if lambda > 1.0 {
        rx *= lambda.sqrt();
        ry *= lambda.sqrt();
    }

    // Step 2: Compute (cx', cy')
    let sign = if large_arc != sweep { 1.0 } else { -1.0 };
    let coeff_sq = ((rx * ry).powi(2) - (rx * y1_prime).powi(2) - (ry * x1_prime).powi(2))
        / ((rx * y1_prime).powi(2) + (ry * x1_prime).powi(2));
    let coeff = sign * coeff_sq.max(0.0).sqrt();
    let cx_prime = coeff * (rx * y1_prime) / ry;
    let cy_prime = coeff * -(ry * x1_prime) / rx;

    // Step 3: Compute (cx, cy) from (cx', cy')
    let cx = cos_phi * cx_prime - sin_phi * cy_prime + (x1 + x2) / 2.0;
    let cy = sin_phi * cx_prime + cos_phi * cy_prime + (y1 + y2) / 2.0;

    // Step 4: Compute theta1 and delta_theta angles
    fn angle_between(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
        let dot = ux * vx + uy * vy;
        let det = ux * vy - uy * vx;
        // atan2 is more robust than the arccos approach from the spec
        det.atan2(dot)
    }

    let theta = angle_between(
        1.0,
        0.0,
        (x1_prime - cx_prime) / rx,
        (y1_prime - cy_prime) / ry,
    );
    let mut delta = angle_between(
        (x1_prime - cx_prime) / rx,
        (y1_prime - cy_prime) / ry,
        (-x1_prime - cx_prime) / rx,
        (-y1_prime - cy_prime) / ry,
    );

    // Adjust delta_theta according to the sweep flag
    if sweep && delta < 0.0 {
        delta += 2.0 * PI;
    } else if !sweep && delta > 0.0 {
        delta -= 2.0 * PI;
    }

    ArcCenter {
        cx,
        cy,
        rx,
        ry,
        rotation,
        theta,
        delta,
    }
}

/// Decompose a center-form arc into cubic Bezier chunks of at most 90
/// degrees each. The final chunk ends exactly at `end` so that
/// floating-point drift cannot accumulate across the run.
fn arc_cubics(arc: &ArcCenter, end: (f64, f64)) -> Vec<PathSegment> {
    let n = ((arc.delta.abs() / ARC_CHUNK_DEGREES.to_radians()).ceil() as usize).max(1);
    let step = arc.delta / n as f64;
    // control-point distance for a Bezier approximating a unit
    // circular arc of the given extent
    let k = 4. / 3. * (step / 2.).sin() / (1. + (step / 2.).cos());
    let place = TransformMatrix::identity()
        .translate(arc.cx, arc.cy)
        .rotate(arc.rotation)
        .scale(arc.rx, arc.ry);

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let a1 = arc.theta + step * i as f64;
        let a2 = a1 + step;
        let (sin_1, cos_1) = a1.sin_cos();
        let (sin_2, cos_2) = a2.sin_cos();
        let (x1, y1) = place.transform_point(cos_1 - k * sin_1, sin_1 + k * cos_1);
        let (x2, y2) = place.transform_point(cos_2 + k * sin_2, sin_2 - k * cos_2);
        let (x, y) = if i == n - 1 {
            end
        } else {
            place.transform_point(cos_2, sin_2)
        };
        out.push(PathSegment::cubic_to(true, x1, y1, x2, y2, x, y));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_to_absolute() {
        let seg = PathSegment::line_to(false, 10., 5.);
        let abs = to_absolute(&seg, 100., 200., 0.);
        assert_eq!(abs, PathSegment::line_to(true, 110., 205.));

        // absolute segments pass through unchanged
        let seg = PathSegment::line_to(true, 10., 5.);
        assert_eq!(to_absolute(&seg, 100., 200., 90.), seg);

        // h/v gain the current point on the fixed axis
        let seg = PathSegment::horizontal_to(false, 10.);
        assert_eq!(
            to_absolute(&seg, 100., 200., 0.),
            PathSegment::horizontal_to(true, 110.)
        );
    }

    #[test]
    fn test_to_absolute_bearing() {
        // bearing 90: relative x becomes y
        let seg = PathSegment::line_to(false, 10., 0.);
        let abs = to_absolute(&seg, 0., 0., 90.);
        let a = abs.args();
        assert!(a[0].abs() < 1e-9 && (a[1] - 10.).abs() < 1e-9);

        // "h" under a bearing becomes a line along the bearing direction
        let seg = PathSegment::horizontal_to(false, 10.);
        let abs = to_absolute(&seg, 0., 0., 60.);
        assert_eq!(abs.kind(), CommandKind::LineTo);
        let a = abs.args();
        assert!((a[0] - 5.).abs() < 1e-9 && (a[1] - 75f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_canonicalize_h_v() {
        let tol = Tolerances::default();
        let mut state = TraversalState::default();
        state.current = Some((100., 50.));
        let out = canonicalize(&PathSegment::horizontal_to(true, 10.), &mut state, &tol).unwrap();
        assert_eq!(out, vec![PathSegment::line_to(true, 10., 50.)]);
        let out = canonicalize(&PathSegment::vertical_to(false, 5.), &mut state, &tol).unwrap();
        assert_eq!(out, vec![PathSegment::line_to(true, 10., 55.)]);
    }

    #[test]
    fn test_canonicalize_quadratic() {
        let tol = Tolerances::default();
        let mut state = TraversalState::default();
        state.current = Some((0., 0.));
        let out = canonicalize(
            &PathSegment::quadratic_to(true, 30., 60., 60., 0.),
            &mut state,
            &tol,
        )
        .unwrap();
        assert_eq!(
            out,
            vec![PathSegment::cubic_to(true, 20., 40., 40., 40., 60., 0.)]
        );
        // control point retained for a following T
        assert_eq!(state.quadratic_cp, Some((30., 60.)));
    }

    #[test]
    fn test_canonicalize_smooth_reflection() {
        let tol = Tolerances::default();
        let mut state = TraversalState::default();
        state.current = Some((0., 0.));
        canonicalize(
            &PathSegment::cubic_to(true, 10., 0., 20., 10., 30., 10.),
            &mut state,
            &tol,
        )
        .unwrap();
        let out = canonicalize(
            &PathSegment::smooth_cubic_to(true, 50., 20., 60., 10.),
            &mut state,
            &tol,
        )
        .unwrap();
        // first control point is cp2 of the cubic reflected through (30, 10)
        assert_eq!(
            out,
            vec![PathSegment::cubic_to(true, 40., 10., 50., 20., 60., 10.)]
        );

        // without a preceding curve the control point collapses to the
        // current point
        let mut state = TraversalState::default();
        state.current = Some((30., 10.));
        let out = canonicalize(
            &PathSegment::smooth_cubic_to(true, 50., 20., 60., 10.),
            &mut state,
            &tol,
        )
        .unwrap();
        assert_eq!(
            out,
            vec![PathSegment::cubic_to(true, 30., 10., 50., 20., 60., 10.)]
        );
    }

    #[test]
    fn test_arc_center_semicircle() {
        // unit semicircle over the top of the chord (0,0)-(20,0)
        let arc = arc_center((0., 0.), 10., 10., 0., false, true, (20., 0.));
        assert!((arc.cx - 10.).abs() < 1e-9 && arc.cy.abs() < 1e-9);
        assert!((arc.delta.abs() - PI).abs() < 1e-9);

        // radii too small for the chord are scaled up
        let arc = arc_center((0., 0.), 1., 1., 0., false, true, (20., 0.));
        assert!((arc.rx - 10.).abs() < 1e-9);
    }

    #[test]
    fn test_arc_chunk_count() {
        let tol = Tolerances::default();
        let mut state = TraversalState::default();
        state.current = Some((0., 0.));
        // semicircle: two 90-degree chunks
        let seg = PathSegment::arc_to(true, 10., 10., 0., false, true, 20., 0.);
        let out = canonicalize(&seg, &mut state, &tol).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|s| s.kind() == CommandKind::CubicCurveTo));
        // last chunk ends exactly on the arc endpoint
        assert_eq!(out[1].end_point().unwrap(), (Some(20.), Some(0.)));

        // 270 degree arc: three chunks
        let mut state = TraversalState::default();
        state.current = Some((150., 200.));
        let seg = PathSegment::arc_to(true, 150., 150., 0., true, false, 300., 50.);
        let out = canonicalize(&seg, &mut state, &tol).unwrap();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_arc_degenerate() {
        let tol = Tolerances::default();
        let mut state = TraversalState::default();
        state.current = Some((0., 0.));
        // zero radius degrades to a line
        let seg = PathSegment::arc_to(true, 0., 10., 0., false, true, 10., 0.);
        let out = canonicalize(&seg, &mut state, &tol).unwrap();
        assert_eq!(out, vec![PathSegment::line_to(true, 10., 0.)]);

        // coincident endpoints draw nothing
        let mut state = TraversalState::default();
        state.current = Some((10., 10.));
        let seg = PathSegment::arc_to(true, 5., 5., 0., false, true, 10., 10.);
        let out = canonicalize(&seg, &mut state, &tol).unwrap();
        assert!(out.is_empty());
        assert_eq!(state.current, Some((10., 10.)));
    }

    #[test]
    fn test_canonicalize_repeated_move() {
        let tol = Tolerances::default();
        let mut state = TraversalState::default();
        let first = canonicalize(&PathSegment::move_to(true, 10., 20.), &mut state, &tol).unwrap();
        assert_eq!(first[0].kind(), CommandKind::MoveTo);
        let second = canonicalize(&PathSegment::move_to(true, 30., 40.), &mut state, &tol).unwrap();
        assert_eq!(second, vec![PathSegment::line_to(true, 30., 40.)]);
        // subpath start stays at the first moveto
        assert_eq!(state.subpath_start, Some((10., 20.)));
    }

    #[test]
    fn test_catmull_rom_rejected() {
        let tol = Tolerances::default();
        let mut state = TraversalState::default();
        let seg = PathSegment::new(
            crate::path::segment::Command::from_letter('R').unwrap(),
            vec![1., 2.],
        );
        assert!(matches!(
            canonicalize(&seg, &mut state, &tol),
            Err(Error::UnsupportedSegment(_))
        ));
    }
}
