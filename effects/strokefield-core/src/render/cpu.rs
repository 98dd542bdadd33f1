//! Software rasterizer for the instanced draw

use glam::{Vec2, Vec4};
use log::trace;

use crate::camera::Viewport;
use crate::kernel::{self, InstanceState};
use crate::particles::BaseShape;

use super::{DrawCall, DrawStats, RenderSurface};

/// RGBA float framebuffer filled by rasterizing kernel output
///
/// Triangles are filled by edge functions at pixel centers with no face
/// culling and no depth test; instances land in submission order.
/// Fragments blend straight-alpha over the destination.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuSurface {
    width: u32,
    height: u32,
    pixels: Vec<Vec4>,
}

impl CpuSurface {
    pub fn new(viewport: Viewport) -> Self {
        let mut surface = Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        surface.resize(viewport);
        surface
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, row 0 at the top
    pub fn pixel(&self, x: u32, y: u32) -> Option<Vec4> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    pub fn pixels(&self) -> &[Vec4] {
        &self.pixels
    }

    /// Framebuffer as 8-bit RGBA, row 0 at the top
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| {
                p.to_array()
                    .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
            })
            .collect()
    }

    fn blend(&mut self, x: u32, y: u32, src: Vec4) {
        let index = (y * self.width + x) as usize;
        if let Some(dst) = self.pixels.get_mut(index) {
            let alpha = src.w;
            let rgb = dst.truncate().lerp(src.truncate(), alpha);
            *dst = rgb.extend(dst.w + (1.0 - dst.w) * alpha);
        }
    }

    fn to_screen(&self, clip: Vec4) -> Option<Vec2> {
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc.y) * 0.5 * self.height as f32,
        ))
    }

    fn draw_instance(&mut self, instance: &InstanceState, shape: &BaseShape, call: &DrawCall<'_>) {
        let Some(fragment) = kernel::shade_fragment(instance.color, instance.alpha) else {
            return;
        };

        let screen: Vec<Option<Vec2>> = shape
            .vertices()
            .iter()
            .map(|v| {
                let position = kernel::apply_vertex(instance, v.position);
                self.to_screen(call.view_projection * position.extend(1.0))
            })
            .collect();

        for [a, b, c] in shape.triangles() {
            if let (Some(a), Some(b), Some(c)) = (screen[a], screen[b], screen[c]) {
                self.fill_triangle(a, b, c, fragment);
            }
        }
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Vec4) {
        let area = edge(a, b, c);
        if area == 0.0 || !area.is_finite() {
            return;
        }

        let min = a.min(b).min(c).max(Vec2::ZERO);
        let max = a
            .max(b)
            .max(c)
            .min(Vec2::new(self.width as f32, self.height as f32));
        if min.x >= max.x || min.y >= max.y {
            return;
        }

        let (x0, y0) = (min.x.floor() as u32, min.y.floor() as u32);
        let (x1, y1) = (max.x.ceil() as u32, max.y.ceil() as u32);

        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b, c, p);
                let w1 = edge(c, a, p);
                let w2 = edge(a, b, p);
                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if inside {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b - a).perp_dot(p - a)
}

impl RenderSurface for CpuSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.width = viewport.width;
        self.height = viewport.height;
        self.pixels = vec![Vec4::ZERO; (viewport.width as usize) * (viewport.height as usize)];
    }

    fn clear(&mut self, color: Vec4) {
        self.pixels.fill(color);
    }

    fn draw_instanced(&mut self, call: &DrawCall<'_>) -> DrawStats {
        let instances = kernel::evaluate_instances(call.field, &call.uniforms, call.masks);
        for instance in &instances {
            self.draw_instance(instance, call.shape, call);
        }
        let stats = DrawStats::from_instances(&instances);
        trace!(
            "Rasterized {} of {} instances",
            stats.visible, stats.instances
        );
        stats
    }
}
