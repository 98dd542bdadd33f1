//! Frame driver: clock, uniforms, camera update and the per-frame draw

use std::sync::Arc;

use glam::Vec4;
use log::{debug, trace, warn};
use strokefield_mask::MaskProvider;

use crate::camera::{Camera, CameraController, FixedCamera, Viewport};
use crate::controls::ControlPanel;
use crate::error::{FieldError, Result};
use crate::kernel::FrameUniforms;
use crate::particles::{BaseShape, ParticleField};
use crate::render::{DrawCall, DrawStats, RenderSurface};

/// Clock advance per frame at speed 1
pub const CLOCK_STEP: f32 = 0.01;

/// Default clear color, opaque white
pub const CLEAR_COLOR: Vec4 = Vec4::ONE;

/// Lifecycle of a [`FrameDriver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    /// Waiting for the first viewport
    #[default]
    Idle,
    Running,
}

/// What one tick produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Zero-based index of the frame
    pub frame: u64,
    pub time: f32,
    pub uniforms: FrameUniforms,
    pub stats: DrawStats,
}

/// Drives the effect one frame at a time
#[derive(Debug, Clone)]
pub struct FrameDriver<C: CameraController = FixedCamera> {
    state: DriverState,
    field: ParticleField,
    shape: Arc<BaseShape>,
    camera: Camera,
    controller: C,
    time: f32,
    frame: u64,
    clock_step: f32,
    clear_color: Vec4,
}

impl FrameDriver<FixedCamera> {
    /// Driver with the default camera and a fixed controller
    pub fn new(field: ParticleField) -> Self {
        Self::with_controller(field, Camera::default(), FixedCamera)
    }
}

impl<C: CameraController> FrameDriver<C> {
    pub fn with_controller(field: ParticleField, camera: Camera, controller: C) -> Self {
        Self {
            state: DriverState::Idle,
            field,
            shape: Arc::new(BaseShape::stroke()),
            camera,
            controller,
            time: 0.0,
            frame: 0,
            clock_step: CLOCK_STEP,
            clear_color: CLEAR_COLOR,
        }
    }

    /// Use another base shape for every instance
    pub fn with_shape(mut self, shape: Arc<BaseShape>) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_clear_color(mut self, color: Vec4) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_clock_step(mut self, step: f32) -> Self {
        self.clock_step = step;
        self
    }

    /// Size camera and surface to the viewport and enter the running state
    pub fn start<S>(&mut self, viewport: Viewport, surface: &mut S) -> Result<()>
    where
        S: RenderSurface + ?Sized,
    {
        if self.state == DriverState::Running {
            return Err(FieldError::AlreadyRunning);
        }

        let viewport = self.camera.resize(viewport.width, viewport.height)?;
        surface.resize(viewport);
        self.state = DriverState::Running;
        debug!(
            "Frame driver running: {} particles at {}x{}",
            self.field.len(),
            viewport.width,
            viewport.height
        );
        Ok(())
    }

    /// Forward a window resize to the camera and the surface
    pub fn resize<S>(&mut self, width: u32, height: u32, surface: &mut S) -> Result<()>
    where
        S: RenderSurface + ?Sized,
    {
        let viewport = self.camera.resize(width, height)?;
        surface.resize(viewport);
        Ok(())
    }

    /// Produce one frame
    ///
    /// Advances the panel's pulse by `dt` seconds, then the clock by
    /// `speed * clock_step`, snapshots the control state into uniforms,
    /// updates the camera and issues one draw of every particle.
    pub fn tick<M, S>(
        &mut self,
        panel: &mut ControlPanel,
        masks: &M,
        dt: f32,
        surface: &mut S,
    ) -> Result<FrameReport>
    where
        M: MaskProvider + Sync,
        S: RenderSurface + ?Sized,
    {
        if self.state == DriverState::Idle {
            return Err(FieldError::DriverNotStarted);
        }

        panel.advance(dt);
        let controls = *panel.state();
        self.time += controls.speed * self.clock_step;
        let uniforms = controls.uniforms(self.time);

        self.controller.update(&mut self.camera);

        surface.clear(self.clear_color);
        let stats = surface.draw_instanced(&DrawCall {
            field: &self.field,
            shape: &self.shape,
            uniforms,
            masks,
            view_projection: self.camera.view_projection(),
        });

        if stats.instances > 0 && stats.visible == 0 && self.frame == 0 {
            warn!("First frame shows no particles; masks may still be loading");
        }
        trace!(
            "Frame {}: t={:.3} visible={}/{}",
            self.frame, self.time, stats.visible, stats.instances
        );

        let report = FrameReport {
            frame: self.frame,
            time: self.time,
            uniforms,
            stats,
        };
        self.frame += 1;
        Ok(report)
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Frames produced so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn shape(&self) -> &Arc<BaseShape> {
        &self.shape
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::ControlParam;
    use crate::palette::{PaletteSource, PresetPalette};
    use crate::render::NullSurface;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use strokefield_mask::{MaskImage, MaskSet, MaskSnapshot};

    fn field(count: usize) -> ParticleField {
        let palette = PresetPalette::new(3).unwrap().palette();
        ParticleField::generate(count, &palette, &mut StdRng::seed_from_u64(11))
    }

    fn masks() -> MaskSnapshot {
        MaskSet::with_images(
            MaskImage::uniform(2, 2, 1.0).unwrap(),
            MaskImage::uniform(2, 2, 0.0).unwrap(),
        )
        .snapshot()
    }

    #[test]
    fn test_tick_before_start_fails() {
        let mut driver = FrameDriver::new(field(4));
        let mut panel = ControlPanel::default();
        let mut surface = NullSurface::default();

        let result = driver.tick(&mut panel, &masks(), 0.016, &mut surface);
        assert!(matches!(result, Err(FieldError::DriverNotStarted)));
        assert_eq!(driver.state(), DriverState::Idle);
    }

    #[test]
    fn test_start_once() {
        let mut driver = FrameDriver::new(field(4));
        let mut surface = NullSurface::default();
        let viewport = Viewport::new(64, 32).unwrap();

        driver.start(viewport, &mut surface).unwrap();
        assert_eq!(driver.state(), DriverState::Running);
        assert_eq!(surface.viewport(), Some(viewport));
        assert_eq!(driver.camera().aspect(), 2.0);

        assert!(matches!(
            driver.start(viewport, &mut surface),
            Err(FieldError::AlreadyRunning)
        ));
    }

    #[test]
    fn test_clock_follows_speed() {
        let mut driver = FrameDriver::new(field(4));
        let mut panel = ControlPanel::default();
        let mut surface = NullSurface::default();
        driver
            .start(Viewport::new(8, 8).unwrap(), &mut surface)
            .unwrap();

        let first = driver.tick(&mut panel, &masks(), 0.016, &mut surface).unwrap();
        assert_eq!(first.frame, 0);
        assert!((first.time - 0.01).abs() < 1e-7);

        panel.set(ControlParam::Speed, 3.0);
        let second = driver.tick(&mut panel, &masks(), 0.016, &mut surface).unwrap();
        assert_eq!(second.frame, 1);
        assert!((second.time - 0.04).abs() < 1e-6);
        assert_eq!(driver.frame(), 2);
    }

    #[test]
    fn test_uniforms_copied_from_panel() {
        let mut driver = FrameDriver::new(field(16));
        let mut panel = ControlPanel::default();
        let mut surface = NullSurface::default();
        driver
            .start(Viewport::new(8, 8).unwrap(), &mut surface)
            .unwrap();

        panel.set(ControlParam::Transition, 1.0);
        panel.set(ControlParam::Curve, 7.0);
        let report = driver.tick(&mut panel, &masks(), 0.016, &mut surface).unwrap();

        assert_eq!(report.uniforms.transition, 1.0);
        assert_eq!(report.uniforms.curve, 7.0);
        assert_eq!(report.uniforms.time, report.time);
        // Only the start mask is on, fully weighted toward the end
        assert_eq!(report.stats.instances, 16);
        assert_eq!(report.stats.visible, 0);
    }

    #[test]
    fn test_invalid_viewport() {
        let mut driver = FrameDriver::new(field(1));
        let mut surface = NullSurface::default();
        let result = driver.resize(0, 0, &mut surface);
        assert!(matches!(result, Err(FieldError::InvalidViewport { .. })));
    }
}
