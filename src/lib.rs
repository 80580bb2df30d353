//! Pathmorph is a vector-path editing and morphing engine.
//!
//! A [`Path`] is an immutable list of sub-paths, each a run of drawing [`Command`]s that starts
//! with a move. Paths are edited through a [`Mutator`] and blended with [`interpolate`].
//!
//! # Editing and morphing
//!
//! 1. **Parse**: SVG path data becomes a [`Path`] (`M`/`L`/`Q`/`C`/`Z` after normalization)
//! 2. **Edit**: [`Path::mutate`] opens a session whose operations split, merge, reorder, reverse,
//!    convert and transform commands; [`Mutator::build`] returns a new `Path`
//! 3. **Morph**: two paths with the same structure are blended point by point
//!
//! Edits can also be driven by an op-script, a compact text form of the same operations:
//!
//! ```
//! # fn main() -> pathmorph::PathMorphResult<()> {
//! let path = pathmorph::from_path_op_string("M 0 0 L 10 0", "SIH 0 0")?;
//! assert_eq!(path.to_svg(), "M 0 0 L 5 0 L 10 0");
//! # Ok(())
//! # }
//! ```
//!
//! Editing a pair of keyframes until they share a structure and then interpolating between them
//! is the intended workflow; [`Path::is_morphable_with`] reports whether that point is reached.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Immutable values**: edits never modify an existing `Path`, so any number of them can be
//!   shared across threads.
//! - **All or nothing**: a failing edit leaves the mutator's working path untouched.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod morph;
mod mutate;
mod path;
mod script;

pub use foundation::core::{Affine, BezPath, Lerp, Point, Vec2, compose_in_order};
pub use foundation::error::{PathMorphError, PathMorphResult};
pub use morph::interpolate::interpolate;
pub use mutate::mutator::Mutator;
pub use mutate::ops::{PathOp, sort_path_ops};
pub use path::command::{Command, CommandId, CommandKind};
pub use path::model::Path;
pub use path::subpath::SubPath;
pub use script::exec::{apply_instructions, from_path_op_string};
pub use script::parser::{Instruction, TransformOp, parse_op_script};
