use assertables::{assert_in_delta, assert_not_contains};
use itertools::Itertools;

use pathdx::{Command, CommandKind, PathData, PathSegment, Tolerances};

fn parse(s: &str) -> PathData {
    s.parse().expect("parse is permissive")
}

#[test]
fn test_canonical_segments_roundtrip() {
    // already-canonical absolute segments pass through normalize
    // unchanged
    for seg in [
        PathSegment::move_to(true, 10., 20.),
        PathSegment::line_to(true, 30., 40.),
        PathSegment::cubic_to(true, 1., 2., 3., 4., 5., 6.),
        PathSegment::close(true),
    ] {
        let path = PathData::from(vec![seg.clone()]);
        assert_eq!(path.normalize().unwrap().segments(), &[seg]);
    }
}

#[test]
fn test_arity_invariant() {
    for letter in "MmLlHhVvCcSsQqTtAaBb".chars() {
        let command = Command::from_letter(letter).unwrap();
        let bad = PathSegment::new(command, vec![99.; command.arity() + 1]);
        assert!(!bad.is_valid(), "'{letter}' with excess operands");

        // an invalid segment contributes nothing to any operation
        let mut path = parse("M0,0 L10,0");
        path.push(bad);
        assert_eq!(path.length().unwrap(), 10.);
        let bb = path.bounding_box().unwrap().unwrap();
        assert_eq!((bb.x1, bb.y1, bb.x2, bb.y2), (0., 0., 10., 0.));
        assert_eq!(path.to_svg().unwrap(), "M0,0 L10,0");
        assert_eq!(path.normalize().unwrap().len(), 2);
    }
}

#[test]
fn test_arc_degenerate_radius() {
    // a zero radius degrades the arc to a straight line
    let path = parse("M0,0 A0,10 0 0 1 10,0");
    let norm = path.normalize().unwrap();
    assert_eq!(
        norm.segments(),
        &[
            PathSegment::move_to(true, 0., 0.),
            PathSegment::line_to(true, 10., 0.),
        ]
    );
    assert_in_delta!(path.length().unwrap(), 10., 1e-9);
}

#[test]
fn test_arc_degenerate_coincident() {
    // coincident endpoints draw nothing and measure nothing
    let path = parse("M10,10 A5,5 0 0 1 10,10");
    let norm = path.normalize().unwrap();
    assert_eq!(norm.segments(), &[PathSegment::move_to(true, 10., 10.)]);
    assert_eq!(path.length().unwrap(), 0.);
}

#[test]
fn test_smooth_reflection() {
    // the implicit control point of S reflects the previous cubic's
    // second control point through the current point
    let norm = parse("M0,0 C10,0 20,10 30,10 S50,20 60,10")
        .normalize()
        .unwrap();
    let second = &norm.segments()[2];
    assert_eq!(second.kind(), CommandKind::CubicCurveTo);
    assert_eq!(&second.args()[..2], &[40., 10.]);

    // a non-curve predecessor collapses the control point onto the
    // current point
    let norm = parse("M0,0 L30,10 S50,20 60,10").normalize().unwrap();
    let third = &norm.segments()[2];
    assert_eq!(&third.args()[..2], &[30., 10.]);
}

#[test]
fn test_closepath_length() {
    let len = parse("M0,0 L10,0 L10,10 Z").length().unwrap();
    assert_in_delta!(len, 10. + 10. + 200f64.sqrt(), 1e-9);
}

#[test]
fn test_curve_bbox_exceeds_endpoints() {
    // the arch peaks inside the control polygon, at 3/4 of the
    // control height
    let bb = parse("M0,0 C0,100 100,100 100,0")
        .bounding_box()
        .unwrap()
        .unwrap();
    assert!(bb.height() > 0. && bb.height() < 100.);
    assert_in_delta!(bb.height(), 75., 1e-9);
    assert_in_delta!(bb.width(), 100., 1e-9);
}

#[test]
fn test_scenario_arc_length() {
    // relative horizontal, large-arc sweep-0 normalization and
    // implicit close length together
    let len = parse("M300,200 h-150 a150,150 0 1,0 150,-150 z")
        .length()
        .unwrap();
    assert_in_delta!(len, 1006.96, 1.);
    // 150 + three quarters of a circle of radius 150 + 150
    assert_in_delta!(len, 300. + 150. * 1.5 * std::f64::consts::PI, 1e-6);
}

#[test]
fn test_golden_arc_normalize() {
    // regression-pinned two-cubic decomposition
    let norm = parse("M950,175 a25,100 0 0,1 50,-25").normalize().unwrap();
    let expected = [
        "M950,175",
        "C948.274,119.772 958.068,69.404 971.875,62.5",
        "C985.682,55.596 998.274,94.772 1000,150",
    ];
    for (seg, exp) in norm.segments().iter().zip_eq(expected) {
        assert_eq!(seg.serialize(), exp);
    }
    assert_eq!(
        norm.to_svg().unwrap(),
        "M950,175 C948.274,119.772 958.068,69.404 971.875,62.5 \
         985.682,55.596 998.274,94.772 1000,150"
    );
}

#[test]
fn test_serialization_compaction() {
    let text = parse("M0,0 L10,10 L20,20").to_svg().unwrap();
    assert_eq!(text, "M0,0 L10,10 20,20");
    assert_not_contains!(text, "L20");
}

#[test]
fn test_bearing_consumed_by_normalize() {
    // bearing redirects relative commands and leaves no trace in the
    // canonical output
    let path = parse("M0,0 b60 h10 b120 h10 z");
    let text = path.normalize().unwrap().to_svg().unwrap();
    assert_not_contains!(text, "b");
    assert_not_contains!(text, "B");
    assert_in_delta!(path.length().unwrap(), 30., 1e-6);
}

#[test]
fn test_tolerances_are_explicit() {
    // a generous absolute epsilon turns a thin arc into a line;
    // the default tolerances leave it curved
    let path = parse("M0,0 A0.2,10 0 0 1 10,0");
    let coarse = Tolerances {
        relative: 1e-6,
        absolute: 0.5,
    };
    let norm = path.normalize_with(&coarse).unwrap();
    assert_eq!(norm.segments()[1], PathSegment::line_to(true, 10., 0.));

    let norm = path.normalize().unwrap();
    assert!(norm
        .segments()
        .iter()
        .any(|s| s.kind() == CommandKind::CubicCurveTo));
}

#[test]
fn test_reparse_equivalence() {
    // serialize(parse(text)) need not equal text, but must re-parse
    // to an equivalent canonical form
    for text in [
        "M 0.6.5 l10 20 30 40",
        "M950,175 a25,100 0 0,1 50,-25",
        "M0,0 Q10,20 20,0 T40,0 t20,0",
        "m0 0 b45 h7 v7 z",
    ] {
        let path = parse(text);
        let again = parse(&path.to_svg().unwrap());
        assert_eq!(
            path.normalize().unwrap(),
            again.normalize().unwrap(),
            "failed for {text}"
        );
    }
}
