//! Color palettes for particle tinting
//!
//! The generator tints every particle with one of the first
//! [`PALETTE_DRAW_COUNT`] colors of a palette. [`Palette`] enforces that
//! minimum at construction, so generation can index it without checks.

use glam::Vec3;
use log::debug;
use rand::Rng;

use crate::error::{FieldError, Result};

/// Number of leading palette entries particles draw their color from
pub const PALETTE_DRAW_COUNT: usize = 5;

/// Preset five-color palettes, `#rrggbb` encoded
pub const PRESET_PALETTES: &[[&str; PALETTE_DRAW_COUNT]] = &[
    ["#69d2e7", "#a7dbd8", "#e0e4cc", "#f38630", "#fa6900"],
    ["#fe4365", "#fc9d9a", "#f9cdad", "#c8c8a9", "#83af9b"],
    ["#ecd078", "#d95b43", "#c02942", "#542437", "#53777a"],
    ["#556270", "#4ecdc4", "#c7f464", "#ff6b6b", "#c44d58"],
    ["#774f38", "#e08e79", "#f1d4af", "#ece5ce", "#c5e0dc"],
    ["#e8ddcb", "#cdb380", "#036564", "#033649", "#031634"],
    ["#490a3d", "#bd1550", "#e97f02", "#f8ca00", "#8a9b0f"],
    ["#594f4f", "#547980", "#45ada8", "#9de0ad", "#e5fcc2"],
    ["#00a0b0", "#6a4a3c", "#cc333f", "#eb6841", "#edc951"],
    ["#e94e77", "#d68189", "#c6a49a", "#c6e5d9", "#f4ead5"],
    ["#d9ceb2", "#948c75", "#d5ded9", "#7a6a53", "#99b2b7"],
    ["#ffffff", "#cbe86b", "#f2e9e1", "#1c140d", "#cbe86b"],
    ["#efffcd", "#dce9be", "#555152", "#2e2633", "#99173c"],
    ["#3fb8af", "#7fc7af", "#dad8a7", "#ff9e9d", "#ff3d7f"],
    ["#343838", "#005f6b", "#008c9e", "#00b4cc", "#00dffc"],
    ["#413e4a", "#73626e", "#b38184", "#f0b49e", "#f7e4be"],
    ["#99b898", "#fecea8", "#ff847c", "#e84a5f", "#2a363b"],
    ["#ff4e50", "#fc913a", "#f9d423", "#ede574", "#e1f5c4"],
    ["#655643", "#80bca3", "#f6f7bd", "#e6ac27", "#bf4d28"],
    ["#351330", "#424254", "#64908a", "#e8caa4", "#cc2a41"],
];

/// Parse `#rrggbb` (the `#` is optional, case-insensitive) into RGB in [0, 1]
pub fn hex_to_rgb(hex: &str) -> Result<Vec3> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(FieldError::InvalidHexColor(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map(|v| f32::from(v) / 255.0)
            .map_err(|_| FieldError::InvalidHexColor(hex.to_string()))
    };

    Ok(Vec3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Ordered list of RGB colors with at least [`PALETTE_DRAW_COUNT`] entries
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Vec3>,
}

impl Palette {
    /// Create a palette, rejecting lists too short to draw from
    pub fn new(colors: Vec<Vec3>) -> Result<Self> {
        if colors.len() < PALETTE_DRAW_COUNT {
            return Err(FieldError::PaletteTooSmall {
                len: colors.len(),
                required: PALETTE_DRAW_COUNT,
            });
        }
        Ok(Self { colors })
    }

    /// Create a palette from `#rrggbb` strings
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self> {
        let colors = hex
            .iter()
            .map(|h| hex_to_rgb(h.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Draw one of the leading [`PALETTE_DRAW_COUNT`] colors uniformly
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        self.colors[rng.random_range(0..PALETTE_DRAW_COUNT)]
    }
}

/// Supplier of the palette used for a run
pub trait PaletteSource {
    fn palette(&self) -> Palette;
}

/// A palette given up front
#[derive(Debug, Clone, PartialEq)]
pub struct FixedPalette(pub Palette);

impl PaletteSource for FixedPalette {
    fn palette(&self) -> Palette {
        self.0.clone()
    }
}

/// One entry of [`PRESET_PALETTES`]
#[derive(Debug, Clone, PartialEq)]
pub struct PresetPalette {
    index: usize,
    palette: Palette,
}

impl PresetPalette {
    /// Select a preset by index
    pub fn new(index: usize) -> Result<Self> {
        let hex = PRESET_PALETTES
            .get(index)
            .ok_or(FieldError::UnknownPreset {
                index,
                available: PRESET_PALETTES.len(),
            })?;
        Ok(Self {
            index,
            palette: Palette::from_hex(hex)?,
        })
    }

    /// Select a preset uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Result<Self> {
        let index = rng.random_range(0..PRESET_PALETTES.len());
        debug!("Selected preset palette {}", index);
        Self::new(index)
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl PaletteSource for PresetPalette {
    fn palette(&self) -> Palette {
        self.palette.clone()
    }
}
