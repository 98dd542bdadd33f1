//! Static per-particle attributes and their one-time generation

use std::sync::Arc;

use glam::{Vec2, Vec3};
use log::debug;
use rand::Rng;

use crate::palette::Palette;

/// Half extent of the square seed positions are drawn from
pub const SEED_EXTENT: f32 = 0.5;

/// Exclusive upper bound of the first (short) stroke length
pub const SHORT_LENGTH_MAX: f32 = 1.0;

/// Exclusive upper bound of the second (long) stroke length
pub const LONG_LENGTH_MAX: f32 = 6.0;

/// Floats per particle in [`ParticleField::fill_instance_data`]
/// - offset.xyz
/// - random.xyz
/// - color.rgb
/// - mask_coord.uv
/// - length_range.xy
pub const FLOATS_PER_INSTANCE: usize = 13;

/// Immutable attributes of one particle, drawn once at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleAttributes {
    /// Point in [-0.5, 0.5]² the particle is placed around
    pub seed_position: Vec2,
    /// Three independent uniform [0, 1) values
    pub random: Vec3,
    /// Tint drawn from the palette
    pub color: Vec3,
    /// Where both masks are sampled, always `seed_position + 0.5`
    pub mask_coord: Vec2,
    /// Short length in [0, 1) and long length in [0, 6)
    pub length_range: Vec2,
}

impl ParticleAttributes {
    /// Assemble attributes from their independent parts, deriving the mask coordinate
    pub fn new(seed_position: Vec2, random: Vec3, color: Vec3, length_range: Vec2) -> Self {
        Self {
            seed_position,
            random,
            color,
            mask_coord: seed_position + Vec2::splat(SEED_EXTENT),
            length_range,
        }
    }

    /// Draw one particle's attributes
    pub fn generate<R: Rng + ?Sized>(palette: &Palette, rng: &mut R) -> Self {
        let seed_position = Vec2::new(
            (rng.random::<f32>() * 2.0 - 1.0) * SEED_EXTENT,
            (rng.random::<f32>() * 2.0 - 1.0) * SEED_EXTENT,
        );
        let length_range = Vec2::new(
            rng.random::<f32>() * SHORT_LENGTH_MAX,
            rng.random::<f32>() * LONG_LENGTH_MAX,
        );
        let color = palette.draw(&mut *rng);
        let random = Vec3::new(rng.random(), rng.random(), rng.random());

        Self::new(seed_position, random, color, length_range)
    }
}

/// The fixed set of particles rendered every frame
///
/// Generated once; cloning shares the same immutable storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    particles: Arc<[ParticleAttributes]>,
}

impl ParticleField {
    /// Generate `count` particles tinted from `palette`
    pub fn generate<R: Rng + ?Sized>(count: usize, palette: &Palette, rng: &mut R) -> Self {
        let particles: Vec<_> = (0..count)
            .map(|_| ParticleAttributes::generate(palette, &mut *rng))
            .collect();
        debug!("Generated {} particles", particles.len());
        Self::from_attributes(particles)
    }

    /// Wrap attributes produced elsewhere
    pub fn from_attributes(particles: Vec<ParticleAttributes>) -> Self {
        Self {
            particles: particles.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ParticleAttributes> {
        self.particles.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticleAttributes> {
        self.particles.iter()
    }

    pub fn as_slice(&self) -> &[ParticleAttributes] {
        &self.particles
    }

    /// Pack all attributes into one interleaved buffer for GPU upload
    ///
    /// See [`FLOATS_PER_INSTANCE`] for the per-instance layout.
    pub fn fill_instance_data(&self) -> Vec<f32> {
        let mut data = vec![0.0; self.particles.len() * FLOATS_PER_INSTANCE];

        for (i, p) in self.particles.iter().enumerate() {
            let base = i * FLOATS_PER_INSTANCE;

            // Offset
            data[base] = p.seed_position.x;
            data[base + 1] = p.seed_position.y;
            data[base + 2] = 0.0;

            // Random
            data[base + 3] = p.random.x;
            data[base + 4] = p.random.y;
            data[base + 5] = p.random.z;

            // Color
            data[base + 6] = p.color.x;
            data[base + 7] = p.color.y;
            data[base + 8] = p.color.z;

            // Mask coordinate
            data[base + 9] = p.mask_coord.x;
            data[base + 10] = p.mask_coord.y;

            // Length range
            data[base + 11] = p.length_range.x;
            data[base + 12] = p.length_range.y;
        }

        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{PaletteSource, PresetPalette};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn palette() -> Palette {
        PresetPalette::new(0).unwrap().palette()
    }

    #[test]
    fn test_mask_coord_boundaries() {
        let low = ParticleAttributes::new(Vec2::splat(-0.5), Vec3::ZERO, Vec3::ONE, Vec2::ZERO);
        assert_eq!(low.mask_coord, Vec2::ZERO);

        let high = ParticleAttributes::new(Vec2::splat(0.5), Vec3::ZERO, Vec3::ONE, Vec2::ZERO);
        assert_eq!(high.mask_coord, Vec2::ONE);
    }

    #[test]
    fn test_generate_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = ParticleField::generate(1000, &palette(), &mut rng);
        assert_eq!(field.len(), 1000);
        assert!(!field.is_empty());
    }

    #[test]
    fn test_generated_ranges() {
        let palette = palette();
        let mut rng = StdRng::seed_from_u64(2);
        let field = ParticleField::generate(5000, &palette, &mut rng);

        for p in field.iter() {
            assert!((-0.5..=0.5).contains(&p.seed_position.x));
            assert!((-0.5..=0.5).contains(&p.seed_position.y));
            assert!((0.0..=1.0).contains(&p.mask_coord.x));
            assert!((0.0..=1.0).contains(&p.mask_coord.y));
            assert!((0.0..SHORT_LENGTH_MAX).contains(&p.length_range.x));
            assert!((0.0..LONG_LENGTH_MAX).contains(&p.length_range.y));
            for r in p.random.to_array() {
                assert!((0.0..1.0).contains(&r));
            }
            assert!(palette.colors()[..5].contains(&p.color));
        }
    }

    #[test]
    fn test_seeded_generation_reproducible() {
        let palette = palette();
        let a = ParticleField::generate(64, &palette, &mut StdRng::seed_from_u64(42));
        let b = ParticleField::generate(64, &palette, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_clone_shares_storage() {
        let field = ParticleField::generate(8, &palette(), &mut StdRng::seed_from_u64(3));
        let copy = field.clone();
        assert!(std::ptr::eq(field.as_slice(), copy.as_slice()));
    }

    #[test]
    fn test_fill_instance_data_layout() {
        let p = ParticleAttributes::new(
            Vec2::new(0.1, -0.2),
            Vec3::new(0.3, 0.4, 0.5),
            Vec3::new(0.6, 0.7, 0.8),
            Vec2::new(0.9, 5.0),
        );
        let field = ParticleField::from_attributes(vec![p, p]);
        let data = field.fill_instance_data();

        assert_eq!(data.len(), 2 * FLOATS_PER_INSTANCE);
        let expected = [
            0.1, -0.2, 0.0, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.6, 0.3, 0.9, 5.0,
        ];
        for (got, want) in data[FLOATS_PER_INSTANCE..].iter().zip(expected) {
            assert!((got - want).abs() < 1e-6, "{got} != {want}");
        }
    }
}
