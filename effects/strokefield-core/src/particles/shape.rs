//! The subdivided quad every particle instance is drawn from

use glam::{Vec2, Vec3};

/// Width and height of the default stroke quad
pub const STROKE_SIZE: f32 = 0.02;

/// Subdivisions along each axis of the default stroke quad
pub const STROKE_SEGMENTS: u32 = 10;

/// One vertex of the base shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Indexed triangle mesh shared read-only by all instances
#[derive(Debug, Clone, PartialEq)]
pub struct BaseShape {
    vertices: Vec<BaseVertex>,
    indices: Vec<u32>,
}

impl BaseShape {
    /// Build a plane in the XY plane centered on the origin, facing +Z
    ///
    /// Rows run top to bottom: the first row sits at `y = height / 2`
    /// with `uv.y = 1`. Each grid cell is split into two triangles.
    pub fn plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(1);
        let height_segments = height_segments.max(1);
        let seg_w = width / width_segments as f32;
        let seg_h = height / height_segments as f32;
        let row = width_segments + 1;

        let mut vertices = Vec::with_capacity((row * (height_segments + 1)) as usize);
        let mut indices = Vec::with_capacity((width_segments * height_segments * 6) as usize);

        for iy in 0..=height_segments {
            let y = iy as f32 * seg_h - height / 2.0;
            for ix in 0..=width_segments {
                let x = ix as f32 * seg_w - width / 2.0;
                vertices.push(BaseVertex {
                    position: Vec3::new(x, -y, 0.0),
                    normal: Vec3::Z,
                    uv: Vec2::new(
                        ix as f32 / width_segments as f32,
                        1.0 - iy as f32 / height_segments as f32,
                    ),
                });

                if iy == height_segments || ix == width_segments {
                    continue;
                }
                let a = ix + iy * row;
                let b = ix + (iy + 1) * row;
                let c = ix + (iy + 1) * row + 1;
                let d = ix + iy * row + 1;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self { vertices, indices }
    }

    /// The 0.02 × 0.02 quad with 10 × 10 segments used for strokes
    pub fn stroke() -> Self {
        Self::plane(STROKE_SIZE, STROKE_SIZE, STROKE_SEGMENTS, STROKE_SEGMENTS)
    }

    pub fn vertices(&self) -> &[BaseVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex indices of each triangle
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }
}

impl Default for BaseShape {
    fn default() -> Self {
        Self::stroke()
    }
}
