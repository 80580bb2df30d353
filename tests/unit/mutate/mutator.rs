use super::*;
use crate::foundation::core::{scale, translate};

const SQUARE: &str = "M 0 0 L 10 0 L 10 10 L 0 10 Z";

fn path(d: &str) -> Path {
    Path::parse(d).unwrap()
}

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn split_in_half_then_unsplit_restores() {
    let original = path("M 0 0 L 10 0 L 10 10 Z");

    let mut m = original.mutate();
    m.split_command_in_half(0, 1).unwrap();
    assert_eq!(m.path().to_svg(), "M 0 0 L 5 0 L 10 0 L 10 10 Z");
    m.unsplit_command(0, 1).unwrap();
    assert_eq!(m.path(), &original);

    let mut m = original.mutate();
    m.split_command_in_half(0, 1).unwrap();
    m.unsplit_command(0, 2).unwrap();
    assert_eq!(m.build(), original);
}

#[test]
fn split_then_unsplit_restores_a_constructed_path() {
    let original = Path::from_commands(vec![
        Command::move_to(Some(p(3.0, 3.0)), p(0.0, 0.0)),
        Command::line_to(p(0.0, 0.0), p(10.0, 0.0)),
    ])
    .unwrap();

    let mut m = original.mutate();
    m.split_command_in_half(0, 1).unwrap();
    m.unsplit_command(0, 1).unwrap();
    assert_eq!(m.build(), original);
}

#[test]
fn command_edits_on_the_move_target_the_first_segment() {
    let mut m = path("M 0 0 L 10 0").mutate();
    m.split_command_in_half(0, 0).unwrap();
    assert_eq!(m.path().to_svg(), "M 0 0 L 5 0 L 10 0");

    let err = path("M 1 1").mutate().split_command_in_half(0, 0).unwrap_err();
    assert!(matches!(err, PathMorphError::InvalidEdit(_)));
}

#[test]
fn split_positions_are_validated() {
    let original = path("M 0 0 L 10 0");
    let mut m = original.mutate();
    let cases: [&[f64]; 6] = [&[], &[0.5, 0.5], &[0.7, 0.2], &[1.0], &[0.0], &[f64::NAN]];
    for ts in cases {
        let err = m.split_command(0, 1, ts).unwrap_err();
        assert!(matches!(err, PathMorphError::InvalidEdit(_)), "{ts:?}");
    }
    assert_eq!(m.path(), &original);

    m.split_command(0, 1, &[0.2, 0.6]).unwrap();
    assert_eq!(m.path().to_svg(), "M 0 0 L 2 0 L 6 0 L 10 0");
}

#[test]
fn split_close_and_merge_back() {
    let original = path("M 0 0 L 10 0 L 10 10 Z");
    let mut m = original.mutate();
    m.split_command_in_half(0, 3).unwrap();
    assert_eq!(m.path().to_svg(), "M 0 0 L 10 0 L 10 10 L 5 5 Z");
    m.unsplit_command(0, 4).unwrap();
    assert_eq!(m.path(), &original);
}

#[test]
fn unsplit_requires_a_split_command() {
    let mut m = path("M 0 0 L 10 0 L 10 10").mutate();
    let err = m.unsplit_command(0, 1).unwrap_err();
    assert!(matches!(err, PathMorphError::NotSplit(_)));
}

#[test]
fn out_of_range_indices_are_reported() {
    let mut m = path("M 0 0 L 10 0").mutate();
    let err = m.reverse_sub_path(3).unwrap_err();
    assert_eq!(
        err,
        PathMorphError::IndexOutOfRange(
            "reverse_sub_path: sub-path 3 does not exist (path has 1)".to_string()
        )
    );

    let err = m.split_command_in_half(0, 7).unwrap_err();
    assert!(matches!(err, PathMorphError::IndexOutOfRange(_)));
    assert!(err.to_string().contains("command 7"));
}

#[test]
fn convert_and_unconvert() {
    let original = path("M 0 0 L 9 0 L 9 9 Z");
    let mut m = original.mutate();
    m.convert_command(0, 1, CommandKind::Cubic)
        .unwrap()
        .convert_command(0, 2, CommandKind::Quad)
        .unwrap();
    let kinds: Vec<_> = m.path().commands().map(Command::kind).collect();
    assert_eq!(
        kinds,
        [
            CommandKind::Move,
            CommandKind::Cubic,
            CommandKind::Quad,
            CommandKind::Close
        ]
    );

    m.unconvert_sub_path(0).unwrap();
    assert_eq!(m.path(), &original);
}

#[test]
fn convert_rejects_move_and_close() {
    let mut m = path("M 0 0 L 9 0 L 9 9 Z").mutate();
    let err = m.convert_command(0, 1, CommandKind::Close).unwrap_err();
    assert!(matches!(err, PathMorphError::InvalidEdit(_)));
    let err = m.convert_command(0, 3, CommandKind::Line).unwrap_err();
    assert!(matches!(err, PathMorphError::InvalidEdit(_)));
}

#[test]
fn move_sub_path_relinks_moves() {
    let mut m = path("M 0 0 L 1 0 M 5 5 L 6 5 M 9 9 L 9 8").mutate();
    m.move_sub_path(0, 2).unwrap();
    let out = m.build();
    assert_eq!(out.to_svg(), "M 5 5 L 6 5 M 9 9 L 9 8 M 0 0 L 1 0");
    assert_eq!(out.command(0, 0).unwrap().start(), None);
    assert_eq!(out.command(1, 0).unwrap().start(), Some(p(6.0, 5.0)));
    assert_eq!(out.command(2, 0).unwrap().start(), Some(p(9.0, 8.0)));
}

#[test]
fn collapsing_sub_paths_come_and_go() {
    let original = path("M 0 0 L 10 0");
    let mut m = original.mutate();
    m.add_collapsing_sub_path(p(3.0, 3.0), 3).unwrap();

    let added = m.path().sub_path(1).unwrap();
    assert!(added.is_collapsing());
    assert_eq!(added.len(), 3);
    assert!(added.commands().iter().all(|c| c.end() == p(3.0, 3.0)));
    assert_eq!(added.commands()[0].start(), Some(p(10.0, 0.0)));

    m.delete_collapsing_sub_paths();
    assert_eq!(m.path(), &original);

    let err = m.add_collapsing_sub_path(p(0.0, 0.0), 0).unwrap_err();
    assert!(matches!(err, PathMorphError::InvalidEdit(_)));
}

#[test]
fn oversized_collapsing_sub_path_is_rejected() {
    let original = path("M 0 0 L 10 0");
    let mut m = original.mutate();
    for n in [MAX_COLLAPSING_COMMANDS + 1, usize::MAX] {
        let err = m.add_collapsing_sub_path(p(1.0, 1.0), n).unwrap_err();
        assert!(matches!(err, PathMorphError::InvalidEdit(_)), "{err}");
    }
    assert_eq!(m.path(), &original);

    m.add_collapsing_sub_path(p(1.0, 1.0), MAX_COLLAPSING_COMMANDS).unwrap();
    assert_eq!(m.path().sub_path(1).unwrap().len(), MAX_COLLAPSING_COMMANDS);
}

#[test]
fn reverse_and_shift() {
    let mut m = path(SQUARE).mutate();
    m.shift_sub_path_forward(0).unwrap();
    assert_eq!(m.path().to_svg(), "M 10 0 L 10 10 L 0 10 L 0 0 Z");
    m.shift_sub_path_back(0).unwrap().reverse_sub_path(0).unwrap();
    assert_eq!(m.path().to_svg(), "M 0 0 L 0 10 L 10 10 L 10 0 Z");

    let err = path("M 0 0 L 10 0").mutate().shift_sub_path_back(0).unwrap_err();
    assert!(matches!(err, PathMorphError::InvalidEdit(_)));
}

#[test]
fn stroked_split_and_delete() {
    let original = path("M 0 0 L 10 0 L 10 10 L 0 10");
    let mut m = original.mutate();
    m.split_stroked_sub_path(0, 2).unwrap();
    assert_eq!(m.path().to_svg(), "M 0 0 L 10 0 L 10 10 M 10 10 L 0 10");
    assert!(m.path().sub_path(1).unwrap().is_split());

    m.delete_stroked_sub_path(1).unwrap();
    assert_eq!(m.path(), &original);

    for cmd in [0, 3] {
        let err = m.split_stroked_sub_path(0, cmd).unwrap_err();
        assert!(matches!(err, PathMorphError::InvalidEdit(_)));
    }
    let err = m.delete_stroked_sub_path(0).unwrap_err();
    assert!(matches!(err, PathMorphError::NotSplit(_)));
}

#[test]
fn filled_split_and_delete() {
    let original = path(SQUARE);
    let mut m = original.mutate();
    m.split_filled_sub_path(0, 2, 1).unwrap();
    assert_eq!(
        m.path().to_svg(),
        "M 0 0 L 10 0 L 10 10 Z M 10 10 L 0 10 L 0 0 Z"
    );

    m.delete_filled_sub_path(1).unwrap();
    assert_eq!(m.path(), &original);

    m.split_filled_sub_path(0, 2, 1).unwrap();
    m.delete_filled_sub_path(0).unwrap();
    assert_eq!(m.path().to_svg(), "M 10 10 L 0 10 L 0 0 L 10 0 Z");
}

#[test]
fn delete_split_segment_keeps_the_addressed_sub_path() {
    let original = path(SQUARE);
    let mut m = original.mutate();
    m.split_filled_sub_path(0, 2, 0).unwrap();
    assert_eq!(
        m.path().to_svg(),
        "M 10 10 L 0 10 L 0 0 Z M 0 0 L 10 0 L 10 10 Z"
    );

    let err = m.delete_sub_path_split_segment(1, 1).unwrap_err();
    assert!(matches!(err, PathMorphError::NotSplit(_)));

    m.delete_sub_path_split_segment(1, 3).unwrap();
    assert_eq!(m.path(), &original);
}

#[test]
fn nested_filled_splits_unwind() {
    let original = path(SQUARE);
    let mut m = original.mutate();
    m.split_filled_sub_path(0, 2, 1)
        .unwrap()
        .split_filled_sub_path(0, 1, 2)
        .unwrap();
    assert_eq!(m.path().sub_paths().len(), 3);

    m.delete_filled_sub_path(2).unwrap();
    assert_eq!(m.path().to_svg(), "M 0 0 L 10 0 L 10 10 Z M 10 10 L 0 10 L 0 0 Z");
    m.delete_filled_sub_path(1).unwrap();
    assert_eq!(m.path(), &original);
}

#[test]
fn filled_split_preconditions() {
    let mut m = path("M 0 0 L 10 0 L 10 10 L 0 10").mutate();
    let err = m.split_filled_sub_path(0, 1, 1).unwrap_err();
    assert!(matches!(err, PathMorphError::InvalidEdit(_)));

    let mut m = path(SQUARE).mutate();
    let err = m.split_filled_sub_path(0, 1, 5).unwrap_err();
    assert!(matches!(err, PathMorphError::IndexOutOfRange(_)));
}

#[test]
fn transforms_apply_in_listed_order() {
    let mut m = path("M 0 0 L 1 0").mutate();
    m.add_transforms(&[translate(5.0, 0.0), scale(2.0, 2.0)]);
    assert_eq!(m.path().to_svg(), "M 10 0 L 12 0");
}

#[test]
fn transforms_carry_into_unsplit() {
    let mut m = path("M 0 0 L 10 0").mutate();
    m.split_command_in_half(0, 1).unwrap();
    m.add_transforms(&[translate(0.0, 3.0)]);
    m.unsplit_command(0, 1).unwrap();
    assert_eq!(m.path().to_svg(), "M 0 3 L 10 3");
}

#[test]
fn revert_restores_baseline() {
    let original = path(SQUARE);
    let mut m = original.mutate();
    m.split_command_in_half(0, 2)
        .unwrap()
        .reverse_sub_path(0)
        .unwrap()
        .add_collapsing_sub_path(p(1.0, 1.0), 2)
        .unwrap();
    assert_ne!(m.path(), &original);
    m.revert();
    assert_eq!(m.path(), m.baseline());
    assert_eq!(m.build(), original);
}

#[test]
fn failed_edit_leaves_working_path_untouched() {
    let mut m = path(SQUARE).mutate();
    m.split_command_in_half(0, 1).unwrap();
    let before = m.path().clone();

    assert!(m.unsplit_command(0, 3).is_err());
    assert!(m.delete_filled_sub_path(0).is_err());
    assert!(m.move_sub_path(0, 1).is_err());
    assert_eq!(m.path(), &before);
}
