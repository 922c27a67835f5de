mod convert;
mod segment;
mod syntax;

pub use segment::{Command, CommandKind, PathSegment};
pub use syntax::{PathSyntax, SvgPathSyntax};

use std::str::FromStr;

use crate::errors::{Error, Result};
use crate::geometry::{
    BoundingBox, BoundingBoxBuilder, CubicBezier, Ellipse, PointTransform, Tolerances,
};
use convert::{arc_center, canonicalize, to_absolute, TraversalState};
use syntax::scan_path_data;

/// An ordered sequence of path segments - one complete `d` attribute.
///
/// Operations are stateless with respect to the path: each re-derives
/// its traversal context (current point, subpath start, bearing,
/// smooth-curve reflection) from scratch and returns a new value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData(Vec<PathSegment>);

impl PathData {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reduce the path to the canonical {Move, Line, Cubic, Close}
    /// basis, with all coordinates absolute.
    pub fn normalize(&self) -> Result<PathData> {
        self.normalize_with(&Tolerances::default())
    }

    pub fn normalize_with(&self, tol: &Tolerances) -> Result<PathData> {
        let mut state = TraversalState::default();
        let mut out = Vec::new();
        for seg in &self.0 {
            out.extend(canonicalize(seg, &mut state, tol)?);
        }
        Ok(PathData(out))
    }

    /// Bounding box of the rendered path: true curve extents, not
    /// just segment endpoints. None for an empty (or all-invalid)
    /// path.
    pub fn bounding_box(&self) -> Result<Option<BoundingBox>> {
        self.bounding_box_with(&Tolerances::default())
    }

    pub fn bounding_box_with(&self, tol: &Tolerances) -> Result<Option<BoundingBox>> {
        let canon = self.normalize_with(tol)?;
        let mut bb = BoundingBoxBuilder::new();
        let mut current: Option<(f64, f64)> = None;
        let mut subpath_start: Option<(f64, f64)> = None;
        for seg in canon.segments() {
            let a = seg.args();
            match seg.kind() {
                CommandKind::MoveTo => {
                    bb.extend_point(a[0], a[1]);
                    current = Some((a[0], a[1]));
                    subpath_start = current;
                }
                CommandKind::LineTo => {
                    let (px, py) = current.unwrap_or((0., 0.));
                    bb.extend_point(px, py);
                    bb.extend_point(a[0], a[1]);
                    current = Some((a[0], a[1]));
                }
                CommandKind::CubicCurveTo => {
                    let p0 = current.unwrap_or((0., 0.));
                    let curve =
                        CubicBezier::new(p0, (a[0], a[1]), (a[2], a[3]), (a[4], a[5]));
                    bb.extend(curve.bbox());
                    current = Some((a[4], a[5]));
                }
                CommandKind::ClosePath => {
                    // the implicit closing line adds no extent beyond
                    // its endpoints, both already seen
                    if subpath_start.is_some() {
                        current = subpath_start;
                    }
                }
                _ => {}
            }
        }
        Ok(bb.build())
    }

    /// Total length of the rendered path. Elliptical arcs are
    /// measured on the true ellipse rather than on their cubic
    /// decomposition; bearing segments contribute nothing; closepath
    /// contributes the implicit closing line.
    pub fn length(&self) -> Result<f64> {
        self.length_with(&Tolerances::default())
    }

    pub fn length_with(&self, tol: &Tolerances) -> Result<f64> {
        let mut state = TraversalState::default();
        let mut total = 0.;
        for seg in &self.0 {
            if seg.kind() == CommandKind::CatmullRom {
                return Err(Error::UnsupportedSegment(
                    seg.command().letter().to_string(),
                ));
            }
            if !seg.is_valid() {
                continue;
            }
            if seg.kind() == CommandKind::EllipticalArcTo {
                total += arc_length(seg, &mut state, tol);
                continue;
            }
            let mut p0 = state.current_or_origin();
            for piece in canonicalize(seg, &mut state, tol)? {
                let a = piece.args();
                match piece.kind() {
                    CommandKind::MoveTo => {
                        p0 = (a[0], a[1]);
                    }
                    CommandKind::LineTo => {
                        total += (a[0] - p0.0).hypot(a[1] - p0.1);
                        p0 = (a[0], a[1]);
                    }
                    CommandKind::CubicCurveTo => {
                        let curve =
                            CubicBezier::new(p0, (a[0], a[1]), (a[2], a[3]), (a[4], a[5]));
                        total += curve.length();
                        p0 = (a[4], a[5]);
                    }
                    CommandKind::ClosePath => {
                        // canonicalize has already moved the current
                        // point back to the subpath start
                        let (sx, sy) = state.current_or_origin();
                        total += (sx - p0.0).hypot(sy - p0.1);
                        p0 = (sx, sy);
                    }
                    _ => {}
                }
            }
        }
        Ok(total)
    }

    /// Apply a point transform to every coordinate, converting the
    /// path to absolute form on the way. Horizontal/vertical lines are
    /// demoted to lines (a general affine map can introduce skew which
    /// breaks axis alignment). Elliptical arcs keep their radii and
    /// rotation unmodified with only the endpoint mapped - a known
    /// simplification, kept deliberately.
    pub fn transform(&self, t: &impl PointTransform) -> Result<PathData> {
        use CommandKind::*;
        let mut state = TraversalState::default();
        let mut out = Vec::new();
        for seg in &self.0 {
            if seg.kind() == CatmullRom {
                return Err(Error::UnsupportedSegment(
                    seg.command().letter().to_string(),
                ));
            }
            if !seg.is_valid() {
                continue;
            }
            if seg.kind() == Bearing {
                // consumed: the output is fully absolute
                if seg.is_absolute() {
                    state.bearing = seg.args()[0];
                } else {
                    state.bearing += seg.args()[0];
                }
                let pos = state.current_or_origin();
                state.note_endpoint(Bearing, pos);
                continue;
            }
            let orig_kind = seg.kind();
            let seg = if orig_kind == MoveTo && state.prev_kind == Some(MoveTo) {
                PathSegment::line_to(seg.is_absolute(), seg.args()[0], seg.args()[1])
            } else {
                seg.clone()
            };
            let (cpx, cpy) = state.current_or_origin();
            let seg = to_absolute(&seg, cpx, cpy, state.bearing);
            let a = seg.args().to_vec();
            let mapped = match seg.kind() {
                MoveTo => {
                    state.current = Some((a[0], a[1]));
                    state.subpath_start = state.current;
                    let (x, y) = t.transform_point(a[0], a[1]);
                    PathSegment::move_to(true, x, y)
                }
                LineTo => {
                    state.current = Some((a[0], a[1]));
                    let (x, y) = t.transform_point(a[0], a[1]);
                    PathSegment::line_to(true, x, y)
                }
                HorizontalLineTo => {
                    state.current = Some((a[0], cpy));
                    let (x, y) = t.transform_point(a[0], cpy);
                    PathSegment::line_to(true, x, y)
                }
                VerticalLineTo => {
                    state.current = Some((cpx, a[0]));
                    let (x, y) = t.transform_point(cpx, a[0]);
                    PathSegment::line_to(true, x, y)
                }
                CubicCurveTo => {
                    state.current = Some((a[4], a[5]));
                    let (x1, y1) = t.transform_point(a[0], a[1]);
                    let (x2, y2) = t.transform_point(a[2], a[3]);
                    let (x, y) = t.transform_point(a[4], a[5]);
                    PathSegment::cubic_to(true, x1, y1, x2, y2, x, y)
                }
                SmoothCubicCurveTo => {
                    state.current = Some((a[2], a[3]));
                    let (x2, y2) = t.transform_point(a[0], a[1]);
                    let (x, y) = t.transform_point(a[2], a[3]);
                    PathSegment::smooth_cubic_to(true, x2, y2, x, y)
                }
                QuadraticCurveTo => {
                    state.current = Some((a[2], a[3]));
                    let (x1, y1) = t.transform_point(a[0], a[1]);
                    let (x, y) = t.transform_point(a[2], a[3]);
                    PathSegment::quadratic_to(true, x1, y1, x, y)
                }
                SmoothQuadraticCurveTo => {
                    state.current = Some((a[0], a[1]));
                    let (x, y) = t.transform_point(a[0], a[1]);
                    PathSegment::smooth_quadratic_to(true, x, y)
                }
                EllipticalArcTo => {
                    state.current = Some((a[5], a[6]));
                    let (x, y) = t.transform_point(a[5], a[6]);
                    PathSegment::arc_to(true, a[0], a[1], a[2], a[3] != 0., a[4] != 0., x, y)
                }
                ClosePath => {
                    state.current = state.subpath_start.or(Some((0., 0.)));
                    seg.clone()
                }
                Bearing | CatmullRom => unreachable!("handled above"),
            };
            state.prev_kind = Some(orig_kind);
            out.push(mapped);
        }
        Ok(PathData(out))
    }

    /// Render the path as path-data text, eliding a command letter
    /// which repeats the previous segment's. Invalid segments render
    /// to nothing.
    pub fn to_svg(&self) -> Result<String> {
        let mut out = String::new();
        let mut prev_letter: Option<char> = None;
        for seg in &self.0 {
            if seg.kind() == CommandKind::CatmullRom {
                return Err(Error::UnsupportedSegment(
                    seg.command().letter().to_string(),
                ));
            }
            let rendered = seg.serialize();
            if rendered.is_empty() {
                continue;
            }
            let letter = seg.command().letter();
            let body = if prev_letter == Some(letter) {
                &rendered[1..]
            } else {
                &rendered[..]
            };
            if body.is_empty() {
                // a repeated closepath elides to nothing
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(body);
            prev_letter = Some(letter);
        }
        Ok(out)
    }
}

/// Length of a single arc segment, measured on the true ellipse using
/// the same center/extent derivation the canonicalization uses.
fn arc_length(seg: &PathSegment, state: &mut TraversalState, tol: &Tolerances) -> f64 {
    let (cpx, cpy) = state.current_or_origin();
    let abs = to_absolute(seg, cpx, cpy, state.bearing);
    let a = abs.args();
    let start = (cpx, cpy);
    let end = (a[5], a[6]);
    let len = if tol.close(start.0, end.0) && tol.close(start.1, end.1) {
        0.
    } else if tol.zero(a[0]) || tol.zero(a[1]) {
        (end.0 - start.0).hypot(end.1 - start.1)
    } else {
        let arc = arc_center(start, a[0], a[1], a[2], a[3] != 0., a[4] != 0., end);
        Ellipse::new(arc.cx, arc.cy, arc.rx, arc.ry, arc.rotation)
            .length(arc.theta.to_degrees(), arc.delta.to_degrees())
    };
    state.note_endpoint(CommandKind::EllipticalArcTo, end);
    len
}

impl From<Vec<PathSegment>> for PathData {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl FromStr for PathData {
    type Err = Error;

    /// Parsing is maximally permissive and does not fail: unmatched
    /// tokens are dropped (see `syntax`).
    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(scan_path_data(s)))
    }
}
