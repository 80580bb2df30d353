use super::*;
use crate::foundation::error::PathMorphError;

#[test]
fn split_in_half_example() {
    let out = from_path_op_string("M 0 0 L 10 0", "SIH 0 0").unwrap();
    assert_eq!(out.to_svg(), "M 0 0 L 5 0 L 10 0");
}

#[test]
fn revert_example() {
    let original = Path::parse("M 0 0 L 10 0").unwrap();
    let out = from_path_op_string("M 0 0 L 10 0", "SIH 0 0 RT").unwrap();
    assert_eq!(out, original);
}

#[test]
fn transform_chain_example() {
    let out = from_path_op_string("M 0 0 L 1 0", "T translate 5 0 scale 2 2").unwrap();
    assert_eq!(out.to_svg(), "M 10 0 L 12 0");
}

#[test]
fn failing_instruction_is_located() {
    let err = from_path_op_string("M 0 0 L 10 0", "SIH 0 1 RV 4").unwrap_err();
    assert!(matches!(err, PathMorphError::IndexOutOfRange(_)));
    assert!(err.to_string().contains("op #1 `RV 4`"), "{err}");
}

#[test]
fn oversized_collapsing_count_is_an_error() {
    let err = from_path_op_string("M 0 0 L 10 0", "AC 1 1 18446744073709551615").unwrap_err();
    assert!(matches!(err, PathMorphError::InvalidEdit(_)), "{err}");
    assert!(err.to_string().contains("op #0"), "{err}");
}

#[test]
fn apply_stops_at_first_failure() {
    let path = Path::parse("M 0 0 L 10 0").unwrap();
    let mut m = path.mutate();
    let ins = parse_op_script("SIH 0 1 US 0 9 SIH 0 1").unwrap();
    assert!(apply_instructions(&mut m, &ins).is_err());
    assert_eq!(m.path().to_svg(), "M 0 0 L 5 0 L 10 0");
}

#[test]
fn malformed_inputs_surface_their_kind() {
    let err = from_path_op_string("L 1 1", "RT").unwrap_err();
    assert!(matches!(err, PathMorphError::MalformedPath(_)));

    let err = from_path_op_string("M 0 0 L 1 1", "ZZ").unwrap_err();
    assert!(matches!(err, PathMorphError::InvalidOp(_)));

    let err = from_path_op_string("M 0 0 L 1 1", "T warp").unwrap_err();
    assert!(matches!(err, PathMorphError::InvalidTransformOp(_)));
}
