use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PathMorphError::malformed_path("x")
            .to_string()
            .contains("malformed path:")
    );
    assert!(
        PathMorphError::unmorphable_path("x")
            .to_string()
            .contains("unmorphable paths:")
    );
    assert!(
        PathMorphError::index_out_of_range("x")
            .to_string()
            .contains("index out of range:")
    );
    assert!(
        PathMorphError::not_split("x")
            .to_string()
            .contains("not split:")
    );
    assert!(
        PathMorphError::invalid_op("x")
            .to_string()
            .contains("invalid op:")
    );
    assert!(
        PathMorphError::invalid_transform_op("x")
            .to_string()
            .contains("invalid transform op:")
    );
    assert!(
        PathMorphError::invalid_edit("x")
            .to_string()
            .contains("invalid edit:")
    );
}

#[test]
fn context_keeps_variant_and_prefixes_message() {
    let err = PathMorphError::index_out_of_range("sub-path 4 of 2").with_context("op #3 `RV 4`");
    assert_eq!(
        err,
        PathMorphError::IndexOutOfRange("op #3 `RV 4`: sub-path 4 of 2".to_string())
    );
}
