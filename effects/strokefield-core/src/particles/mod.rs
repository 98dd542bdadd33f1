//! Particle set and the shape each particle is drawn with
//!
//! # Architecture
//!
//! - `ParticleAttributes`: static per-particle data, drawn once
//! - `ParticleField`: the immutable set of all particles
//! - `BaseShape`: the subdivided quad shared by every instance
//!
//! # Usage
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use strokefield_core::palette::{PaletteSource, PresetPalette};
//! use strokefield_core::particles::{BaseShape, ParticleField};
//!
//! let palette = PresetPalette::new(3)?.palette();
//! let mut rng = StdRng::seed_from_u64(7);
//! let field = ParticleField::generate(19_000, &palette, &mut rng);
//! let shape = BaseShape::stroke();
//!
//! // Per-instance data for GPU upload
//! let instance_data = field.fill_instance_data();
//! assert_eq!(instance_data.len(), field.len() * 13);
//! assert_eq!(shape.triangle_count(), 200);
//! # Ok::<(), strokefield_core::FieldError>(())
//! ```

mod attributes;
mod shape;

pub use attributes::{
    FLOATS_PER_INSTANCE, LONG_LENGTH_MAX, ParticleAttributes, ParticleField, SEED_EXTENT,
    SHORT_LENGTH_MAX,
};
pub use shape::{BaseShape, BaseVertex, STROKE_SEGMENTS, STROKE_SIZE};
