/// Result alias used across the crate.
pub type PathMorphResult<T> = Result<T, PathMorphError>;

/// Every way a path construction, edit, interpolation or op-script can fail.
///
/// Variants carry a human-readable message that names the offending indices or tokens, so a
/// failing edit can be located inside a script.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PathMorphError {
    /// A command list or path text violates the structural invariants.
    #[error("malformed path: {0}")]
    MalformedPath(String),

    /// Two paths were interpolated that do not share the same structure.
    #[error("unmorphable paths: {0}")]
    UnmorphablePath(String),

    /// A sub-path or command index does not exist in the current working path.
    #[error("index out of range: {0}")]
    IndexOutOfRange(String),

    /// An unsplit/delete targeted something that was never produced by a split.
    #[error("not split: {0}")]
    NotSplit(String),

    /// The op-script contains an unknown opcode or a bad argument.
    #[error("invalid op: {0}")]
    InvalidOp(String),

    /// A `T` instruction contains an unknown transform sub-opcode.
    #[error("invalid transform op: {0}")]
    InvalidTransformOp(String),

    /// The edit is well-addressed but not applicable to its target.
    #[error("invalid edit: {0}")]
    InvalidEdit(String),
}

impl PathMorphError {
    /// Build a [`PathMorphError::MalformedPath`] value.
    pub fn malformed_path(msg: impl Into<String>) -> Self {
        Self::MalformedPath(msg.into())
    }

    /// Build a [`PathMorphError::UnmorphablePath`] value.
    pub fn unmorphable_path(msg: impl Into<String>) -> Self {
        Self::UnmorphablePath(msg.into())
    }

    /// Build a [`PathMorphError::IndexOutOfRange`] value.
    pub fn index_out_of_range(msg: impl Into<String>) -> Self {
        Self::IndexOutOfRange(msg.into())
    }

    /// Build a [`PathMorphError::NotSplit`] value.
    pub fn not_split(msg: impl Into<String>) -> Self {
        Self::NotSplit(msg.into())
    }

    /// Build a [`PathMorphError::InvalidOp`] value.
    pub fn invalid_op(msg: impl Into<String>) -> Self {
        Self::InvalidOp(msg.into())
    }

    /// Build a [`PathMorphError::InvalidTransformOp`] value.
    pub fn invalid_transform_op(msg: impl Into<String>) -> Self {
        Self::InvalidTransformOp(msg.into())
    }

    /// Build a [`PathMorphError::InvalidEdit`] value.
    pub fn invalid_edit(msg: impl Into<String>) -> Self {
        Self::InvalidEdit(msg.into())
    }

    /// Prefix the message with `ctx`, keeping the variant.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        let wrap = |msg: String| format!("{ctx}: {msg}");
        match self {
            Self::MalformedPath(m) => Self::MalformedPath(wrap(m)),
            Self::UnmorphablePath(m) => Self::UnmorphablePath(wrap(m)),
            Self::IndexOutOfRange(m) => Self::IndexOutOfRange(wrap(m)),
            Self::NotSplit(m) => Self::NotSplit(wrap(m)),
            Self::InvalidOp(m) => Self::InvalidOp(wrap(m)),
            Self::InvalidTransformOp(m) => Self::InvalidTransformOp(wrap(m)),
            Self::InvalidEdit(m) => Self::InvalidEdit(wrap(m)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
