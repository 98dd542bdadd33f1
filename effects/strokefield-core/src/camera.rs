//! Perspective camera and the controllers that move it

use glam::{Mat4, Vec3};
use log::debug;

use crate::error::{FieldError, Result};

/// Vertical field of view in degrees
pub const DEFAULT_FOV: f32 = 15.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 100.0;
/// Distance of the camera from the origin along +Z
pub const DEFAULT_DISTANCE: f32 = 3.0;

/// Size of the render target in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Create a viewport, rejecting zero dimensions
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Right-handed perspective camera looking at a target
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    aspect: f32,
    viewport: Option<Viewport>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_FOV)
    }
}

impl Camera {
    /// Camera at `(0, 0, 3)` looking at the origin
    pub fn new(fov: f32) -> Self {
        Self {
            fov,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            position: Vec3::new(0.0, 0.0, DEFAULT_DISTANCE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            viewport: None,
        }
    }

    /// Store the viewport size and update the aspect ratio to match
    pub fn resize(&mut self, width: u32, height: u32) -> Result<Viewport> {
        let viewport = Viewport::new(width, height)?;
        self.viewport = Some(viewport);
        self.set_perspective(viewport.aspect());
        debug!("Camera resized to {}x{}", width, height);
        Ok(viewport)
    }

    pub fn set_perspective(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// OpenGL-style projection, clip z in [-w, w]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

/// Per-frame camera update hook
pub trait CameraController {
    fn update(&mut self, camera: &mut Camera);
}

/// Leaves the camera where it is
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCamera;

impl CameraController for FixedCamera {
    fn update(&mut self, _camera: &mut Camera) {}
}

/// Orbits the camera around its target
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitController {
    /// Radians around the Y axis, 0 looks down -Z
    pub yaw: f32,
    /// Radians above the XZ plane
    pub pitch: f32,
    pub distance: f32,
    /// Yaw added on every update
    pub auto_rotate: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: DEFAULT_DISTANCE,
            auto_rotate: 0.0,
        }
    }
}

impl OrbitController {
    const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.distance = (self.distance * factor).max(DEFAULT_NEAR);
    }

    fn offset(&self) -> Vec3 {
        Vec3::new(
            self.distance * self.pitch.cos() * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            self.distance * self.pitch.cos() * self.yaw.cos(),
        )
    }
}

impl CameraController for OrbitController {
    fn update(&mut self, camera: &mut Camera) {
        self.yaw += self.auto_rotate;
        camera.position = camera.target + self.offset();
    }
}
