use super::*;

#[test]
fn sorts_descending_by_sub_then_cmd() {
    let mut ops = vec![
        PathOp::new(0, 1),
        PathOp::new(2, 0),
        PathOp::new(0, 3),
        PathOp::new(1, 2),
        PathOp::new(2, 5),
    ];
    sort_path_ops(&mut ops);
    assert_eq!(
        ops,
        [
            PathOp::new(2, 5),
            PathOp::new(2, 0),
            PathOp::new(1, 2),
            PathOp::new(0, 3),
            PathOp::new(0, 1),
        ]
    );
}

#[test]
fn duplicates_and_empty_batches() {
    let mut ops = vec![PathOp::new(1, 1), PathOp::new(3, 0), PathOp::new(1, 1)];
    sort_path_ops(&mut ops);
    assert_eq!(ops, [PathOp::new(3, 0), PathOp::new(1, 1), PathOp::new(1, 1)]);

    let mut none: Vec<PathOp> = Vec::new();
    sort_path_ops(&mut none);
    assert!(none.is_empty());
}

#[test]
fn natural_order_is_ascending() {
    assert!(PathOp::new(0, 9) < PathOp::new(1, 0));
    assert!(PathOp::new(1, 0) < PathOp::new(1, 1));
}
