use super::*;
use crate::path::model::Path;

fn sub(d: &str) -> SubPath {
    Path::parse(d).unwrap().sub_paths()[0].clone()
}

fn svg(sp: &SubPath) -> String {
    Path::relinked(vec![sp.clone()]).to_svg()
}

#[test]
fn stroked_split_and_join() {
    let sp = sub("M 0 0 L 10 0 L 10 10 L 0 10");
    let (head, tail) = split_stroked(&sp, 1);
    assert_eq!(svg(&head), "M 0 0 L 10 0");
    assert_eq!(svg(&tail), "M 10 0 L 10 10 L 0 10");

    let (hm, tm) = (head.split.clone().unwrap(), tail.split.clone().unwrap());
    assert_eq!(hm.group, tm.group);
    assert_eq!((hm.role, tm.role), (SplitRole::Head, SplitRole::Tail));

    let joined = join_stroked(&head, &tail).unwrap();
    assert_eq!(joined, sp);
    assert!(joined.split.is_none());
}

#[test]
fn stroked_split_of_closed_outline_restores_close() {
    let sp = sub("M 0 0 L 10 0 L 10 10 Z");
    let (head, tail) = split_stroked(&sp, 1);
    assert_eq!(svg(&tail), "M 10 0 L 10 10 L 0 0");
    assert_eq!(join_stroked(&head, &tail).unwrap(), sp);
}

#[test]
fn stroked_halves_must_still_meet() {
    let sp = sub("M 0 0 L 10 0 L 10 10 L 0 10");
    let (head, tail) = split_stroked(&sp, 1);
    let err = join_stroked(&head, &tail.reversed()).unwrap_err();
    assert!(matches!(err, PathMorphError::InvalidEdit(_)));
}

#[test]
fn filled_split_closes_both_halves_along_the_chord() {
    let sp = sub("M 0 0 L 10 0 L 10 10 L 0 10 Z");
    let (head, tail) = split_filled(&sp, 2);
    assert_eq!(svg(&head), "M 0 0 L 10 0 L 10 10 Z");
    assert_eq!(svg(&tail), "M 10 10 L 0 10 L 0 0 Z");
    assert!(head.is_closed() && tail.is_closed());

    let id = head.split.as_ref().unwrap().group;
    assert_eq!(find_chord(&head, id), Some(2));
    assert_eq!(find_chord(&tail, id), Some(2));
    assert!(head.commands()[3].is_split_segment());
}

#[test]
fn filled_join_restores_the_region() {
    let sp = sub("M 0 0 L 10 0 L 10 10 L 0 10 Z");
    let (head, tail) = split_filled(&sp, 2);
    let id = head.split.as_ref().unwrap().group;

    let joined = join_filled(&head, &tail, id).unwrap();
    assert_eq!(joined, sp);
    assert!(joined.split.is_none());

    let from_tail = join_filled(&tail, &head, id).unwrap();
    assert_eq!(svg(&from_tail), "M 10 10 L 0 10 L 0 0 L 10 0 Z");
}

#[test]
fn filled_join_needs_the_chord_on_both_sides() {
    let sp = sub("M 0 0 L 10 0 L 10 10 L 0 10 Z");
    let (head, tail) = split_filled(&sp, 2);
    let id = head.split.as_ref().unwrap().group;
    let err = join_filled(&head, &sp, id).unwrap_err();
    assert!(matches!(err, PathMorphError::NotSplit(_)));
    assert!(join_filled(&head, &tail, id + 1_000_000).is_err());
}
