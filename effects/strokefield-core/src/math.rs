//! Interpolation helpers shared by the kernel and the animators

/// Trait for types that can be linearly interpolated
pub trait Lerp: Clone {
    /// Linear interpolation between self and other
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

/// Shader-style `mix(a, b, t)`
///
/// Returns `a` exactly at `t = 0` and whenever `a == b`.
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a.lerp(&b, t)
}
