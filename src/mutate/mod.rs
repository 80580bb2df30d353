pub(crate) mod mutator;
pub(crate) mod ops;
pub(crate) mod split;
