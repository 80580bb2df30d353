use crate::{
    foundation::{
        core::Lerp,
        error::{PathMorphError, PathMorphResult},
    },
    path::{command::Command, model::Path, subpath::SubPath},
};

/// Blend two morphable paths point by point.
///
/// Every point slot becomes `start * (1 - fraction) + end * fraction`, so `fraction = 0` and
/// `fraction = 1` reproduce `start` and `end` exactly. A slot absent on either side stays
/// absent. `fraction` is not clamped: values outside `[0, 1]` extrapolate past the endpoints.
///
/// Fails with [`PathMorphError::InvalidEdit`] when `fraction` is NaN or infinite, and with
/// [`PathMorphError::UnmorphablePath`] when the paths differ in sub-path count, command count or
/// any command kind.
#[tracing::instrument(skip(start, end))]
pub fn interpolate(start: &Path, end: &Path, fraction: f64) -> PathMorphResult<Path> {
    if !fraction.is_finite() {
        return Err(PathMorphError::invalid_edit(format!(
            "interpolate: fraction must be finite, got {fraction}"
        )));
    }
    if let Some(mismatch) = start.morph_mismatch(end) {
        return Err(PathMorphError::unmorphable_path(mismatch));
    }

    let sub_paths = start
        .sub_paths()
        .iter()
        .zip(end.sub_paths())
        .map(|(a, b)| {
            let commands = a
                .commands()
                .iter()
                .zip(b.commands())
                .map(|(ca, cb)| lerp_command(ca, cb, fraction))
                .collect::<PathMorphResult<Vec<_>>>()?;
            SubPath::new(commands)
        })
        .collect::<PathMorphResult<Vec<_>>>()?;
    Path::from_sub_paths(sub_paths)
}

fn lerp_command(a: &Command, b: &Command, t: f64) -> PathMorphResult<Command> {
    let points = a
        .points()
        .into_iter()
        .zip(b.points())
        .map(|(pa, pb)| match (pa, pb) {
            (Some(pa), Some(pb)) => Some(Lerp::lerp(&pa, &pb, t)),
            _ => None,
        });
    Command::new(a.kind(), points)
}

#[cfg(test)]
#[path = "../../tests/unit/morph/interpolate.rs"]
mod tests;
