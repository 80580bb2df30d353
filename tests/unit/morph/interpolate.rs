use super::*;

fn path(d: &str) -> Path {
    Path::parse(d).unwrap()
}

#[test]
fn endpoints_are_exact() {
    let a = path("M 0.1 0.2 L 10.3 0.7 C 1 2 3 4 5.5 6.25 Z");
    let b = path("M 7 -3 L 0.9 1e3 C 9 8 7 6 5 4 Z");
    assert_eq!(interpolate(&a, &b, 0.0).unwrap(), a);
    assert_eq!(interpolate(&a, &b, 1.0).unwrap(), b);
}

#[test]
fn midpoint_blends_every_slot() {
    let a = path("M 0 0 Q 0 10 10 10");
    let b = path("M 10 0 Q 20 10 30 30");
    let mid = interpolate(&a, &b, 0.5).unwrap();
    assert_eq!(mid.to_svg(), "M 5 0 Q 10 10 20 20");
}

#[test]
fn first_move_start_stays_absent() {
    let a = path("M 0 0 L 1 0 M 5 5 L 6 6");
    let b = path("M 2 2 L 3 0 M 7 7 L 8 8");
    let mid = interpolate(&a, &b, 0.5).unwrap();
    assert_eq!(mid.command(0, 0).unwrap().start(), None);
    assert_eq!(
        mid.command(1, 0).unwrap().start(),
        Some(crate::Point::new(2.0, 0.0))
    );
}

#[test]
fn fraction_is_not_clamped() {
    let a = path("M 0 0 L 10 0");
    let b = path("M 0 0 L 20 0");
    assert_eq!(interpolate(&a, &b, 2.0).unwrap().to_svg(), "M 0 0 L 30 0");
    assert_eq!(interpolate(&a, &b, -1.0).unwrap().to_svg(), "M 0 0 L 0 0");
}

#[test]
fn non_finite_fraction_is_rejected() {
    let a = path("M 0 0 L 10 0 Z");
    let b = path("M 0 0 L 20 0 Z");
    for fraction in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = interpolate(&a, &b, fraction).unwrap_err();
        assert!(matches!(err, PathMorphError::InvalidEdit(_)), "{err}");
        assert!(err.to_string().contains("fraction must be finite"), "{err}");
    }
}

#[test]
fn result_has_fresh_ids() {
    let a = path("M 0 0 L 10 0");
    let mid = interpolate(&a, &a, 0.5).unwrap();
    assert_eq!(mid, a);
    assert_ne!(mid.command(0, 1).unwrap().id(), a.command(0, 1).unwrap().id());
}

#[test]
fn structural_mismatch_is_rejected() {
    let a = path("M 0 0 L 10 0");
    for other in ["M 0 0 L 10 0 L 5 5", "M 0 0 Q 1 1 10 0", "M 0 0 L 1 0 M 2 2 L 3 3"] {
        let err = interpolate(&a, &path(other), 0.5).unwrap_err();
        assert!(matches!(err, PathMorphError::UnmorphablePath(_)), "{other}");
    }
}
