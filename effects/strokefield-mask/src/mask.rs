//! Decoded mask images and texture-style sampling

use std::path::Path;

use glam::Vec2;
use image::{DynamicImage, ImageReader};
use log::debug;

use crate::error::{MaskError, Result};

/// Intensity at or above which a mask texel counts as "on"
pub const MASK_THRESHOLD: f32 = 0.5;

/// Binarize a mask sample: 1.0 when `value >= 0.5`, otherwise 0.0
#[inline]
pub fn binarize(value: f32) -> f32 {
    if value >= MASK_THRESHOLD { 1.0 } else { 0.0 }
}

/// Single-channel mask image with values normalized to [0, 1]
///
/// Texels are stored row-major with row 0 at the top of the decoded
/// image. Sampling follows texture conventions instead: `v = 0` is the
/// bottom edge and `v = 1` the top edge, as an image uploaded with a
/// vertical flip would be addressed.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskImage {
    width: u32,
    height: u32,
    texels: Vec<f32>,
}

impl MaskImage {
    /// Create a mask from raw texel values (row-major, top row first)
    pub fn from_texels(width: u32, height: u32, texels: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MaskError::EmptyImage { width, height });
        }
        let expected = width as usize * height as usize;
        if texels.len() != expected {
            return Err(MaskError::SizeMismatch {
                width,
                height,
                actual: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Create a mask by evaluating `f(x, y)` for every texel (y = 0 is the top row)
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> f32,
    {
        let mut texels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                texels.push(f(x, y).clamp(0.0, 1.0));
            }
        }
        Self::from_texels(width, height, texels)
    }

    /// Create a mask where every texel has the same value
    pub fn uniform(width: u32, height: u32, value: f32) -> Result<Self> {
        Self::from_fn(width, height, |_, _| value)
    }

    /// Build a mask from the red channel of a decoded image
    pub fn from_dynamic(image: &DynamicImage) -> Result<Self> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let texels = rgba.pixels().map(|p| f32::from(p[0]) / 255.0).collect();
        Self::from_texels(width, height, texels)
    }

    /// Decode a mask from in-memory image bytes (format is guessed)
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?;
        Self::from_dynamic(&image)
    }

    /// Load and decode a mask from an image file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
        debug!(
            "Decoded mask {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Self::from_dynamic(&image)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw texel at integer coordinates, y = 0 being the top row
    pub fn texel(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.texels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Sample the mask at a normalized coordinate
    ///
    /// Bilinear filtering between texel centers with clamp-to-edge
    /// addressing, so coordinates outside [0, 1] return the nearest edge.
    pub fn sample(&self, coord: Vec2) -> f32 {
        let x = coord.x * self.width as f32 - 0.5;
        let y = coord.y * self.height as f32 - 0.5;

        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;

        let c00 = self.fetch_clamped(x0 as i64, y0 as i64);
        let c10 = self.fetch_clamped(x0 as i64 + 1, y0 as i64);
        let c01 = self.fetch_clamped(x0 as i64, y0 as i64 + 1);
        let c11 = self.fetch_clamped(x0 as i64 + 1, y0 as i64 + 1);

        let bottom = c00 + (c10 - c00) * fx;
        let top = c01 + (c11 - c01) * fx;
        bottom + (top - bottom) * fy
    }

    /// Fraction of texels that binarize to "on"
    pub fn coverage(&self) -> f32 {
        let on = self
            .texels
            .iter()
            .filter(|&&v| v >= MASK_THRESHOLD)
            .count();
        on as f32 / self.texels.len() as f32
    }

    /// Fetch a texel in texture space (row 0 = bottom), clamping to the edges
    fn fetch_clamped(&self, x: i64, y_from_bottom: i64) -> f32 {
        let x = x.clamp(0, i64::from(self.width) - 1) as usize;
        let y_from_bottom = y_from_bottom.clamp(0, i64::from(self.height) - 1) as usize;
        let row = self.height as usize - 1 - y_from_bottom;
        self.texels[row * self.width as usize + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.0, 0.0 ; "zero")]
    #[test_case(0.499, 0.0 ; "just below")]
    #[test_case(0.5, 1.0 ; "at threshold")]
    #[test_case(1.0, 1.0 ; "full")]
    fn test_binarize(value: f32, expected: f32) {
        assert_eq!(binarize(value), expected);
    }

    #[test]
    fn test_empty_image_rejected() {
        assert!(matches!(
            MaskImage::from_texels(0, 4, vec![]),
            Err(MaskError::EmptyImage { .. })
        ));
    }

    #[test]
    fn test_size_mismatch_rejected() {
        assert!(matches!(
            MaskImage::from_texels(2, 2, vec![0.0; 3]),
            Err(MaskError::SizeMismatch { actual: 3, .. })
        ));
    }

    #[test]
    fn test_uniform_sample_is_exact() {
        let mask = MaskImage::uniform(7, 5, 1.0).unwrap();
        for &(u, v) in &[(0.0, 0.0), (0.3, 0.9), (1.0, 1.0), (0.5, 0.5)] {
            assert_eq!(mask.sample(Vec2::new(u, v)), 1.0);
        }
    }

    #[test]
    fn test_sample_is_flipped_vertically() {
        // Top half bright, bottom half dark
        let mask = MaskImage::from_fn(4, 4, |_, y| if y < 2 { 1.0 } else { 0.0 }).unwrap();

        assert_eq!(mask.sample(Vec2::new(0.5, 0.95)), 1.0);
        assert_eq!(mask.sample(Vec2::new(0.5, 0.05)), 0.0);
    }

    #[test]
    fn test_sample_clamps_outside_unit_square() {
        let mask = MaskImage::from_fn(2, 1, |x, _| x as f32).unwrap();
        assert_eq!(mask.sample(Vec2::new(-3.0, 0.5)), 0.0);
        assert_eq!(mask.sample(Vec2::new(4.0, 0.5)), 1.0);
    }

    #[test]
    fn test_sample_bilinear_midpoint() {
        let mask = MaskImage::from_fn(2, 1, |x, _| x as f32).unwrap();
        let mid = mask.sample(Vec2::new(0.5, 0.5));
        assert!((mid - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_coverage() {
        let mask = MaskImage::from_fn(4, 1, |x, _| if x == 0 { 1.0 } else { 0.2 }).unwrap();
        assert!((mask.coverage() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_texel_bounds() {
        let mask = MaskImage::uniform(2, 2, 0.25).unwrap();
        assert_eq!(mask.texel(1, 1), Some(0.25));
        assert_eq!(mask.texel(2, 0), None);
    }
}
