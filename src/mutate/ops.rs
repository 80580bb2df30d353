use std::cmp::Reverse;

/// A reference to one command, used when batching edits.
///
/// Orders by `sub_idx`, then `cmd_idx`, ascending.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PathOp {
    /// Sub-path index.
    pub sub_idx: usize,
    /// Command index within the sub-path.
    pub cmd_idx: usize,
}

impl PathOp {
    /// Reference command `cmd_idx` of sub-path `sub_idx`.
    pub fn new(sub_idx: usize, cmd_idx: usize) -> Self {
        Self { sub_idx, cmd_idx }
    }
}

/// Order a batch so that index-shifting edits can be applied front to back: descending by
/// `sub_idx`, then descending by `cmd_idx`.
///
/// Applying an edit at one op never moves the indices of ops later in the batch. The sort is
/// stable, so duplicates keep their relative order.
pub fn sort_path_ops(ops: &mut [PathOp]) {
    ops.sort_by_key(|op| Reverse(*op));
}

#[cfg(test)]
#[path = "../../tests/unit/mutate/ops.rs"]
mod tests;
