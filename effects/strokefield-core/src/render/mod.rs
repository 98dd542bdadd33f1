//! Render surface abstraction
//!
//! The effect issues exactly one instanced draw per frame. A
//! [`RenderSurface`] receives it as a [`DrawCall`] carrying everything the
//! kernel reads: the particle field, the shared base shape, the frame's
//! uniforms, the masks and the camera matrix.

mod cpu;

pub use cpu::CpuSurface;

use glam::{Mat4, Vec4};
use strokefield_mask::MaskProvider;

use crate::camera::Viewport;
use crate::kernel::{FrameUniforms, InstanceState};
use crate::particles::{BaseShape, ParticleField};

/// One instanced draw of every particle
#[derive(Clone, Copy)]
pub struct DrawCall<'a> {
    pub field: &'a ParticleField,
    pub shape: &'a BaseShape,
    pub uniforms: FrameUniforms,
    pub masks: &'a (dyn MaskProvider + Sync),
    pub view_projection: Mat4,
}

/// Summary of one draw
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawStats {
    /// Instances submitted
    pub instances: usize,
    /// Instances with non-zero alpha
    pub visible: usize,
    /// Sum of alpha over all instances
    pub alpha_sum: f64,
}

impl DrawStats {
    pub fn from_instances(instances: &[InstanceState]) -> Self {
        instances.iter().fold(
            Self {
                instances: instances.len(),
                ..Self::default()
            },
            |mut stats, instance| {
                if instance.is_visible() {
                    stats.visible += 1;
                }
                stats.alpha_sum += f64::from(instance.alpha);
                stats
            },
        )
    }

    /// Mean alpha over all submitted instances, 0 for an empty draw
    pub fn mean_alpha(&self) -> f64 {
        if self.instances == 0 {
            0.0
        } else {
            self.alpha_sum / self.instances as f64
        }
    }
}

/// Target of the per-frame draw
pub trait RenderSurface {
    fn resize(&mut self, viewport: Viewport);

    fn clear(&mut self, color: Vec4);

    fn draw_instanced(&mut self, call: &DrawCall<'_>) -> DrawStats;
}

/// Evaluates the kernel and reports stats without producing pixels
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface {
    viewport: Option<Viewport>,
}

impl NullSurface {
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }
}

impl RenderSurface for NullSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn clear(&mut self, _color: Vec4) {}

    fn draw_instanced(&mut self, call: &DrawCall<'_>) -> DrawStats {
        let instances = crate::kernel::evaluate_instances(call.field, &call.uniforms, call.masks);
        DrawStats::from_instances(&instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    fn instance(alpha: f32) -> InstanceState {
        InstanceState {
            alpha,
            color: Vec3::ONE,
            depth: 0.0,
            length: 1.0,
            thickness: 1.0,
            curve_offset: 0.0,
            angle: 0.0,
            origin: Vec2::ZERO,
        }
    }

    #[test]
    fn test_stats_from_instances() {
        let stats = DrawStats::from_instances(&[instance(1.0), instance(0.0), instance(0.5)]);
        assert_eq!(stats.instances, 3);
        assert_eq!(stats.visible, 2);
        assert!((stats.mean_alpha() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats() {
        let stats = DrawStats::from_instances(&[]);
        assert_eq!(stats, DrawStats::default());
        assert_eq!(stats.mean_alpha(), 0.0);
    }
}
