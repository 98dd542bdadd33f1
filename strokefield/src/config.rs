//! Effect configuration loaded from YAML or JSON files

use std::fs;
use std::path::{Path, PathBuf};

use glam::{Vec3, Vec4};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use strokefield_core::animation::PulseConfig;
use strokefield_core::camera::{DEFAULT_DISTANCE, DEFAULT_FOV};
use strokefield_core::palette::{FixedPalette, Palette, PaletteSource, PresetPalette, hex_to_rgb};
use strokefield_core::{Camera, ControlState, OrbitController, Viewport};
use thiserror::Error;

/// Particle count of the reference effect
pub const DEFAULT_PARTICLES: usize = 19_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),
}

/// Where particle colors come from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteChoice {
    /// A preset chosen at random once per run
    #[default]
    Random,
    /// A preset by index
    Preset(usize),
    /// `#rrggbb` colors, at least five
    Custom(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub distance: f32,
    /// Radians of yaw added per frame
    pub auto_rotate: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: DEFAULT_FOV,
            distance: DEFAULT_DISTANCE,
            auto_rotate: 0.0,
        }
    }
}

/// Everything needed to set up and run the effect headlessly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub particles: usize,
    /// Fixed RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    pub palette: PaletteChoice,
    pub controls: ControlState,
    pub pulse: PulseConfig,
    pub camera: CameraConfig,
    /// `#rrggbb`
    pub clear_color: String,
    pub width: u32,
    pub height: u32,
    pub frames: u64,
    /// Frames per second the pulse is timed against
    pub frame_rate: f32,
    /// Clock advance per frame at speed 1
    pub clock_step: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particles: DEFAULT_PARTICLES,
            seed: None,
            palette: PaletteChoice::default(),
            controls: ControlState::default(),
            pulse: PulseConfig::default(),
            camera: CameraConfig::default(),
            clear_color: "#ffffff".to_string(),
            width: 800,
            height: 600,
            frames: 60,
            frame_rate: 60.0,
            clock_step: strokefield_core::CLOCK_STEP,
        }
    }
}

impl FieldConfig {
    /// Load from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        match extension(path).as_deref() {
            Some("yaml" | "yml") => Ok(serde_yaml_ng::from_str(&text)?),
            Some("json") => Ok(serde_json::from_str(&text)?),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Random source for generation, seeded when a seed is configured
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    pub fn palette(&self, rng: &mut StdRng) -> strokefield_core::Result<Palette> {
        match &self.palette {
            PaletteChoice::Random => Ok(PresetPalette::random(rng)?.palette()),
            PaletteChoice::Preset(index) => Ok(PresetPalette::new(*index)?.palette()),
            PaletteChoice::Custom(colors) => Ok(FixedPalette(Palette::from_hex(colors)?).palette()),
        }
    }

    pub fn clear_color(&self) -> strokefield_core::Result<Vec4> {
        hex_to_rgb(&self.clear_color).map(|rgb| rgb.extend(1.0))
    }

    pub fn viewport(&self) -> strokefield_core::Result<Viewport> {
        Viewport::new(self.width, self.height)
    }

    pub fn camera(&self) -> Camera {
        let mut camera = Camera::new(self.camera.fov);
        camera.position = Vec3::new(0.0, 0.0, self.camera.distance);
        camera
    }

    pub fn orbit(&self) -> OrbitController {
        OrbitController {
            distance: self.camera.distance,
            auto_rotate: self.camera.auto_rotate,
            ..OrbitController::default()
        }
    }

    /// Seconds per frame
    pub fn frame_time(&self) -> f32 {
        if self.frame_rate > 0.0 {
            1.0 / self.frame_rate
        } else {
            0.0
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}
