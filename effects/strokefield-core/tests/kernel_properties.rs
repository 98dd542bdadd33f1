//! Property tests for particle generation and the visibility rule
//!
//! 1. Mask coordinates stay in the unit square.
//! 2. Alpha stays in [0, 1] for any samples and transition.
//! 3. Alpha is 0 when both masks are off, 1 when both are on.
//! 4. Start-only alpha falls and end-only alpha rises with the transition.
//! 5. The rotation divisor stays in [50, 100).
//! 6. Evaluating a frame never changes the particle attributes.

use glam::{Vec2, Vec3};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use strokefield_core::kernel::{
    FrameUniforms, MaskSamples, evaluate_instances, spin_divisor, visibility_alpha,
};
use strokefield_core::palette::{PaletteSource, PresetPalette};
use strokefield_core::particles::{ParticleAttributes, ParticleField};
use strokefield_mask::{MaskImage, MaskSet};

fn sample_strategy() -> impl Strategy<Value = f32> {
    prop_oneof![Just(0.0f32), Just(0.5f32), Just(1.0f32), 0.0f32..=1.0]
}

fn uniforms_strategy() -> impl Strategy<Value = FrameUniforms> {
    (0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=30.0, 0.0f32..1000.0).prop_map(
        |(transition, line_width, line_thickness, curve, time)| FrameUniforms {
            transition,
            line_width,
            line_thickness,
            curve,
            time,
        },
    )
}

proptest! {
    #[test]
    fn mask_coord_in_unit_square(seed in any::<u64>()) {
        let palette = PresetPalette::new(0).unwrap().palette();
        let field = ParticleField::generate(256, &palette, &mut StdRng::seed_from_u64(seed));
        for p in field.iter() {
            prop_assert!((0.0..=1.0).contains(&p.mask_coord.x));
            prop_assert!((0.0..=1.0).contains(&p.mask_coord.y));
            prop_assert_eq!(p.mask_coord, p.seed_position + Vec2::splat(0.5));
        }
    }

    #[test]
    fn alpha_in_unit_range(
        start in sample_strategy(),
        end in sample_strategy(),
        transition in 0.0f32..=1.0,
    ) {
        let alpha = visibility_alpha(MaskSamples::new(start, end), transition);
        prop_assert!((0.0..=1.0).contains(&alpha), "alpha {} out of range", alpha);
    }

    #[test]
    fn alpha_fixed_when_masks_agree(
        off_start in 0.0f32..0.5,
        off_end in 0.0f32..0.5,
        on_start in 0.5f32..=1.0,
        on_end in 0.5f32..=1.0,
        transition in 0.0f32..=1.0,
    ) {
        prop_assert_eq!(visibility_alpha(MaskSamples::new(off_start, off_end), transition), 0.0);
        prop_assert_eq!(visibility_alpha(MaskSamples::new(on_start, on_end), transition), 1.0);
    }

    #[test]
    fn alpha_monotonic_in_transition(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        let fading_out = |t| visibility_alpha(MaskSamples::new(1.0, 0.0), t);
        let fading_in = |t| visibility_alpha(MaskSamples::new(0.0, 1.0), t);

        prop_assert!(fading_out(lo) >= fading_out(hi));
        prop_assert!(fading_in(lo) <= fading_in(hi));
        prop_assert!((fading_out(lo) - (1.0 - lo)).abs() < 1e-6);
        prop_assert!((fading_in(hi) - hi).abs() < 1e-6);
    }

    #[test]
    fn spin_divisor_bounded(random_y in 0.0f32..1.0) {
        let d = spin_divisor(random_y);
        prop_assert!((50.0..100.0).contains(&d), "divisor {} out of range", d);
    }

    #[test]
    fn frames_leave_attributes_untouched(
        seed in any::<u64>(),
        frames in prop::collection::vec(uniforms_strategy(), 1..6),
    ) {
        let palette = PresetPalette::new(5).unwrap().palette();
        let field = ParticleField::generate(64, &palette, &mut StdRng::seed_from_u64(seed));
        let before: Vec<ParticleAttributes> = field.as_slice().to_vec();
        let masks = MaskSet::with_images(
            MaskImage::from_fn(8, 8, |x, _| if x < 4 { 1.0 } else { 0.0 }).unwrap(),
            MaskImage::uniform(8, 8, 1.0).unwrap(),
        )
        .snapshot();

        for uniforms in &frames {
            let instances = evaluate_instances(&field, uniforms, &masks);
            prop_assert_eq!(instances.len(), field.len());
            for (state, p) in instances.iter().zip(field.iter()) {
                prop_assert_eq!(state.color, p.color);
                prop_assert!(state.origin.is_finite());
            }
        }

        prop_assert_eq!(field.as_slice(), &before[..]);
    }
}

#[test]
fn boundary_seeds_map_to_corners() {
    let low = ParticleAttributes::new(Vec2::splat(-0.5), Vec3::ZERO, Vec3::ONE, Vec2::ONE);
    let high = ParticleAttributes::new(Vec2::splat(0.5), Vec3::ZERO, Vec3::ONE, Vec2::ONE);
    assert_eq!(low.mask_coord, Vec2::ZERO);
    assert_eq!(high.mask_coord, Vec2::ONE);
}
