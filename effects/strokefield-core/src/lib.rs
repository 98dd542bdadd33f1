//! Instanced stroke-particle effect that cross-dissolves between two masks.
//!
//! A fixed field of short, randomly tinted strokes is drawn every frame.
//! Each stroke samples a start mask and an end mask at its own coordinate;
//! the transition control fades between the two, so the cloud looks like
//! whichever image is weighted higher.
//!
//! # Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use strokefield_core::{
//!     ControlPanel, ControlParam, FrameDriver, ParticleField, Viewport,
//!     palette::{PaletteSource, PresetPalette},
//!     render::CpuSurface,
//! };
//! use strokefield_mask::{MaskImage, MaskSet};
//!
//! let palette = PresetPalette::new(0)?.palette();
//! let field = ParticleField::generate(500, &palette, &mut StdRng::seed_from_u64(1));
//!
//! let masks = MaskSet::with_images(
//!     MaskImage::uniform(16, 16, 1.0).unwrap(),
//!     MaskImage::uniform(16, 16, 0.0).unwrap(),
//! );
//! let viewport = Viewport::new(64, 64)?;
//! let mut surface = CpuSurface::new(viewport);
//! let mut panel = ControlPanel::default();
//! let mut driver = FrameDriver::new(field);
//!
//! driver.start(viewport, &mut surface)?;
//! panel.set(ControlParam::Transition, 0.0);
//! let report = driver.tick(&mut panel, &masks.snapshot(), 1.0 / 60.0, &mut surface)?;
//! assert_eq!(report.stats.visible, 500);
//! # Ok::<(), strokefield_core::FieldError>(())
//! ```

#![forbid(unsafe_code)]

pub mod animation;
pub mod camera;
pub mod controls;
pub mod driver;
pub mod error;
pub mod kernel;
pub mod math;
pub mod palette;
pub mod particles;
pub mod render;

pub use camera::{Camera, CameraController, FixedCamera, OrbitController, Viewport};
pub use controls::{ControlPanel, ControlParam, ControlState};
pub use driver::{CLOCK_STEP, DriverState, FrameDriver, FrameReport};
pub use error::{FieldError, Result};
pub use kernel::{FrameUniforms, InstanceState, KernelOutput, MaskSamples};
pub use palette::{Palette, PaletteSource};
pub use particles::{BaseShape, ParticleAttributes, ParticleField};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
