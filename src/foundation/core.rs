pub use kurbo::{Affine, BezPath, Point, Vec2};

/// Linear interpolation between two values.
///
/// Implementations reproduce `a` at `t = 0` and `b` at `t = 1` exactly. `t` is not clamped.
pub trait Lerp: Sized {
    /// Blend `a` toward `b` by `t`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        // Two-sided form so both endpoints are bit-exact.
        a * (1.0 - t) + b * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(Lerp::lerp(&a.x, &b.x, t), Lerp::lerp(&a.y, &b.y, t))
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(Lerp::lerp(&a.x, &b.x, t), Lerp::lerp(&a.y, &b.y, t))
    }
}

/// Scale about the origin.
pub fn scale(sx: f64, sy: f64) -> Affine {
    Affine::scale_non_uniform(sx, sy)
}

/// Rotation about the origin, in degrees.
pub fn rotate_degrees(degrees: f64) -> Affine {
    Affine::rotate(degrees.to_radians())
}

/// Translation by `(tx, ty)`.
pub fn translate(tx: f64, ty: f64) -> Affine {
    Affine::translate(Vec2::new(tx, ty))
}

/// Compose a chain of transforms so that `chain[0]` is applied first.
pub fn compose_in_order(chain: &[Affine]) -> Affine {
    chain.iter().fold(Affine::IDENTITY, |acc, m| *m * acc)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
