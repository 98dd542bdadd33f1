//! Per-vertex transform kernel and the visibility/blend rule
//!
//! Every function here is pure: it reads one particle's static
//! attributes, the frame's uniform snapshot and (for the blend rule) the
//! two mask samples at the particle's mask coordinate, and returns new
//! values. Nothing is shared between invocations, so the kernel can run
//! on a GPU or, as in [`evaluate_instances`], batched on the CPU.
//!
//! Work is split in two stages. [`prepare_instance`] computes everything
//! that is constant across a particle's vertices (alpha, length,
//! rotation, placement); [`apply_vertex`] then moves one base-shape
//! vertex. [`transform_vertex`] chains both for a single vertex.

use glam::{Mat4, Vec2, Vec3, Vec4};
use strokefield_mask::{MaskId, MaskProvider, binarize};

use crate::math::mix;
use crate::particles::{ParticleAttributes, ParticleField};

/// Scale of the per-particle depth offset
pub const DEPTH_JITTER: f32 = 0.0111;

/// Scale applied to the curve amount before it becomes an offset
pub const CURVE_SCALE: f32 = 0.001;

/// Spatial frequency of the curve wave along the mask's vertical axis
pub const CURVE_FREQUENCY: f32 = 2.0;

/// Time multiplier of the rotation angle
pub const SPIN_RATE: f32 = 10.0;

/// Phase multiplier of the rotation angle
pub const SPIN_PHASE: f32 = 1000.0;

/// Rotation divisor is `random.y * SPIN_DIVISOR_SCALE + SPIN_DIVISOR_BASE`
pub const SPIN_DIVISOR_SCALE: f32 = 50.0;

/// See [`SPIN_DIVISOR_SCALE`]
pub const SPIN_DIVISOR_BASE: f32 = 50.0;

/// Subtracted from the mask coordinate to center the particle cloud
pub const PLACEMENT_BIAS: Vec2 = Vec2::new(0.5, 0.25);

/// Center of the scatter offset applied to hidden particles
pub const SCATTER_CENTER: f32 = 0.5;

/// Read-only control snapshot shared by every invocation within a frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameUniforms {
    /// Cross-fade weight, 0 = start mask, 1 = end mask
    pub transition: f32,
    /// Interpolation factor between each particle's two lengths
    pub line_width: f32,
    /// Horizontal scale of every stroke
    pub line_thickness: f32,
    /// Amplitude of the curve wave
    pub curve: f32,
    /// Animation clock
    pub time: f32,
}

/// Raw samples of both masks at one coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MaskSamples {
    pub start: f32,
    pub end: f32,
}

impl MaskSamples {
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Sample both masks at `coord`
    pub fn fetch<M: MaskProvider + ?Sized>(masks: &M, coord: Vec2) -> Self {
        Self {
            start: masks.sample(MaskId::Start, coord),
            end: masks.sample(MaskId::End, coord),
        }
    }
}

/// Visibility/blend rule
///
/// Both samples are binarized at 0.5. A particle off in both masks has
/// alpha 0; otherwise alpha cross-fades the two 0/1 memberships by
/// `transition`.
#[inline]
pub fn visibility_alpha(samples: MaskSamples, transition: f32) -> f32 {
    let show_start = binarize(samples.start);
    let show_end = binarize(samples.end);
    let show = show_start.max(show_end);
    show * mix(show_start, show_end, transition)
}

/// Divisor of the rotation angle, in [50, 100) for `random_y` in [0, 1)
#[inline]
pub fn spin_divisor(random_y: f32) -> f32 {
    random_y * SPIN_DIVISOR_SCALE + SPIN_DIVISOR_BASE
}

/// Rotation angle in radians of a particle at `time`
#[inline]
pub fn rotation_angle(time: f32, random: Vec3) -> f32 {
    (time * SPIN_RATE + random.z * SPIN_PHASE) / spin_divisor(random.y)
}

/// Visual stroke length for the current width weight
#[inline]
pub fn stroke_length(length_range: Vec2, line_width: f32) -> f32 {
    mix(length_range.x, length_range.y, line_width)
}

/// Horizontal curve offset for a particle at `mask_y`
#[inline]
pub fn curve_offset(curve: f32, mask_y: f32, time: f32) -> f32 {
    curve * CURVE_SCALE * (mask_y * CURVE_FREQUENCY + time).sin()
}

/// Rotate `v` by `angle`, shader `mat2(c, -s, s, c) * v` convention (clockwise)
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(c * v.x + s * v.y, -s * v.x + c * v.y)
}

/// Resting position of a particle plus the scatter of hidden particles
///
/// At alpha 1 this is `mask_coord - (0.5, 0.25)`; as alpha drops the
/// particle is pushed by up to `random.xy - 0.5`. Recomputed every frame
/// from the same seed, so it never accumulates.
#[inline]
pub fn placement(mask_coord: Vec2, random: Vec3, alpha: f32) -> Vec2 {
    let scatter = Vec2::new(random.x, random.y) - Vec2::splat(SCATTER_CENTER);
    mask_coord - PLACEMENT_BIAS + (1.0 - alpha) * scatter
}

/// Per-instance part of the kernel, shared by all vertices of one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceState {
    /// Visibility/blend alpha
    pub alpha: f32,
    /// Pass-through color
    pub color: Vec3,
    /// Z offset
    pub depth: f32,
    /// Vertical scale
    pub length: f32,
    /// Horizontal scale
    pub thickness: f32,
    /// Horizontal curve offset
    pub curve_offset: f32,
    /// Rotation angle in radians
    pub angle: f32,
    /// Final translation in the XY plane
    pub origin: Vec2,
}

impl InstanceState {
    /// Whether any fragment of this instance survives the discard test
    pub fn is_visible(&self) -> bool {
        self.alpha != 0.0
    }
}

/// Compute the per-instance state for one particle
pub fn prepare_instance(
    attrs: &ParticleAttributes,
    uniforms: &FrameUniforms,
    samples: MaskSamples,
) -> InstanceState {
    let alpha = visibility_alpha(samples, uniforms.transition);
    InstanceState {
        alpha,
        color: attrs.color,
        depth: attrs.random.z * DEPTH_JITTER,
        length: stroke_length(attrs.length_range, uniforms.line_width),
        thickness: uniforms.line_thickness,
        curve_offset: curve_offset(uniforms.curve, attrs.mask_coord.y, uniforms.time),
        angle: rotation_angle(uniforms.time, attrs.random),
        origin: placement(attrs.mask_coord, attrs.random, alpha),
    }
}

/// Move one base-shape vertex into model space
///
/// Order: depth offset, length scale, thickness scale, curve, rotation,
/// placement.
pub fn apply_vertex(instance: &InstanceState, vertex: Vec3) -> Vec3 {
    let z = vertex.z + instance.depth;
    let scaled = Vec2::new(
        vertex.x * instance.thickness + instance.curve_offset,
        vertex.y * instance.length,
    );
    let xy = rotate(scaled, instance.angle) + instance.origin;
    Vec3::new(xy.x, xy.y, z)
}

/// Output of the kernel for one vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelOutput {
    /// Model-space position
    pub position: Vec3,
    /// Clip-space position
    pub clip: Vec4,
    pub color: Vec3,
    pub alpha: f32,
}

/// Run the whole kernel for one vertex of one particle
pub fn transform_vertex(
    attrs: &ParticleAttributes,
    uniforms: &FrameUniforms,
    samples: MaskSamples,
    vertex: Vec3,
    view_projection: &Mat4,
) -> KernelOutput {
    let instance = prepare_instance(attrs, uniforms, samples);
    let position = apply_vertex(&instance, vertex);
    KernelOutput {
        position,
        clip: *view_projection * position.extend(1.0),
        color: instance.color,
        alpha: instance.alpha,
    }
}

/// Fragment stage: discard at alpha 0, otherwise straight RGBA
#[inline]
pub fn shade_fragment(color: Vec3, alpha: f32) -> Option<Vec4> {
    if alpha == 0.0 {
        None
    } else {
        Some(color.extend(alpha))
    }
}

/// Evaluate the per-instance stage for every particle of a frame
///
/// Masks are sampled once per particle at its mask coordinate. Runs on
/// the rayon pool when the `parallel` feature is enabled.
pub fn evaluate_instances<M>(
    field: &ParticleField,
    uniforms: &FrameUniforms,
    masks: &M,
) -> Vec<InstanceState>
where
    M: MaskProvider + Sync + ?Sized,
{
    let evaluate = |attrs: &ParticleAttributes| {
        prepare_instance(attrs, uniforms, MaskSamples::fetch(masks, attrs.mask_coord))
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        field.as_slice().par_iter().map(evaluate).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        field.as_slice().iter().map(evaluate).collect()
    }
}
