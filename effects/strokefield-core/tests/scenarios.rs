//! End-to-end frames through the driver with uniform masks

use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use strokefield_core::animation::{PulseConfig, RetriggerPolicy, RunOutcome};
use strokefield_core::palette::{PaletteSource, PresetPalette};
use strokefield_core::render::{CpuSurface, NullSurface};
use strokefield_core::{
    ControlPanel, ControlParam, ControlState, FrameDriver, ParticleField, Viewport,
};
use strokefield_mask::{MaskId, MaskImage, MaskSet, MaskSnapshot};
use test_case::test_case;

const PARTICLES: usize = 2_000;

fn field() -> ParticleField {
    let palette = PresetPalette::new(1).unwrap().palette();
    ParticleField::generate(PARTICLES, &palette, &mut StdRng::seed_from_u64(0x5eed))
}

fn uniform_masks(start: f32, end: f32) -> MaskSnapshot {
    MaskSet::with_images(
        MaskImage::uniform(8, 8, start).unwrap(),
        MaskImage::uniform(8, 8, end).unwrap(),
    )
    .snapshot()
}

fn running_driver() -> (FrameDriver, NullSurface) {
    let mut driver = FrameDriver::new(field());
    let mut surface = NullSurface::default();
    driver
        .start(Viewport::new(320, 240).unwrap(), &mut surface)
        .unwrap();
    (driver, surface)
}

#[test_case(1.0, 0.0, 0.0, PARTICLES, 1.0 ; "start on at transition 0 shows all")]
#[test_case(1.0, 0.0, 1.0, 0, 0.0 ; "start on at transition 1 hides all")]
#[test_case(0.0, 0.0, 0.0, 0, 0.0 ; "both off at transition 0 hides all")]
#[test_case(0.0, 0.0, 0.6, 0, 0.0 ; "both off midway hides all")]
#[test_case(0.0, 0.0, 1.0, 0, 0.0 ; "both off at transition 1 hides all")]
#[test_case(1.0, 1.0, 0.3, PARTICLES, 1.0 ; "both on shows all")]
fn frame_visibility(start: f32, end: f32, transition: f32, visible: usize, mean: f64) {
    let (mut driver, mut surface) = running_driver();
    let mut panel = ControlPanel::default();
    panel.set(ControlParam::Transition, transition);

    let report = driver
        .tick(&mut panel, &uniform_masks(start, end), 1.0 / 60.0, &mut surface)
        .unwrap();

    assert_eq!(report.stats.instances, PARTICLES);
    assert_eq!(report.stats.visible, visible);
    assert!((report.stats.mean_alpha() - mean).abs() < 1e-6);
}

#[test]
fn pending_masks_show_nothing() {
    let (mut driver, mut surface) = running_driver();
    let mut panel = ControlPanel::default();
    let masks = MaskSet::new().snapshot();

    let report = driver
        .tick(&mut panel, &masks, 1.0 / 60.0, &mut surface)
        .unwrap();
    assert_eq!(report.stats.visible, 0);
}

#[test]
fn masks_become_visible_after_upload() {
    let (mut driver, mut surface) = running_driver();
    let mut panel = ControlPanel::default();
    let mut masks = MaskSet::new();

    let before = driver
        .tick(&mut panel, &masks.snapshot(), 1.0 / 60.0, &mut surface)
        .unwrap();
    masks.upload(MaskId::Start, MaskImage::uniform(4, 4, 1.0).unwrap());
    masks.upload(MaskId::End, MaskImage::uniform(4, 4, 0.0).unwrap());
    let after = driver
        .tick(&mut panel, &masks.snapshot(), 1.0 / 60.0, &mut surface)
        .unwrap();

    assert_eq!(before.stats.visible, 0);
    assert_eq!(after.stats.visible, PARTICLES);
}

#[test]
fn complementary_masks_cross_fade() {
    let (mut driver, mut surface) = running_driver();
    let mut panel = ControlPanel::default();
    // Start mask on the left half, end mask on the right half
    let masks = MaskSet::with_images(
        MaskImage::from_fn(64, 64, |x, _| if x < 32 { 1.0 } else { 0.0 }).unwrap(),
        MaskImage::from_fn(64, 64, |x, _| if x >= 32 { 1.0 } else { 0.0 }).unwrap(),
    )
    .snapshot();

    let mut visible_at = |t: f32| {
        panel.set(ControlParam::Transition, t);
        driver
            .tick(&mut panel, &masks, 1.0 / 60.0, &mut surface)
            .unwrap()
            .stats
    };

    let start = visible_at(0.0);
    let midway = visible_at(0.5);
    let end = visible_at(1.0);

    // Every coordinate is on in at least one mask
    assert_eq!(midway.visible, PARTICLES);
    assert!(midway.mean_alpha() >= 0.5);
    assert!(start.visible > PARTICLES / 3);
    assert!(end.visible > PARTICLES / 3);
    assert!(start.visible + end.visible >= PARTICLES);
}

#[test]
fn pulse_restores_rest_values() {
    let (mut driver, mut surface) = running_driver();
    let mut panel = ControlPanel::default();
    let masks = uniform_masks(1.0, 0.0);
    let before = *panel.state();

    assert_eq!(panel.run(), RunOutcome::Started);
    let mut peak_speed: f32 = 0.0;
    for _ in 0..90 {
        driver
            .tick(&mut panel, &masks, 1.0 / 60.0, &mut surface)
            .unwrap();
        peak_speed = peak_speed.max(panel.state().speed);
    }

    assert!(panel.pulse().is_resting());
    assert!(peak_speed > 5.0);
    // The clock ran faster than 90 frames at speed 1
    assert!(driver.time() > 90.0 * 0.01);
    assert_eq!(*panel.state(), before);
}

#[test]
fn queued_pulse_also_restores_rest_values() {
    let (mut driver, mut surface) = running_driver();
    let mut panel = ControlPanel::new(
        ControlState::default(),
        PulseConfig {
            policy: RetriggerPolicy::Queue,
            ..PulseConfig::default()
        },
    );
    let masks = uniform_masks(1.0, 0.0);

    panel.run();
    for frame in 0..150 {
        if frame == 10 {
            assert_eq!(panel.run(), RunOutcome::Queued);
        }
        driver
            .tick(&mut panel, &masks, 1.0 / 60.0, &mut surface)
            .unwrap();
    }

    assert!(panel.pulse().is_resting());
    assert_eq!(*panel.state(), ControlState::default());
}

#[test]
fn rasterized_frame_matches_stats() {
    let field = field();
    let mut driver = FrameDriver::new(field);
    let viewport = Viewport::new(96, 96).unwrap();
    let mut surface = CpuSurface::new(viewport);
    driver.start(viewport, &mut surface).unwrap();

    let mut panel = ControlPanel::default();
    panel.set(ControlParam::Transition, 1.0);
    let hidden = driver
        .tick(&mut panel, &uniform_masks(1.0, 0.0), 1.0 / 60.0, &mut surface)
        .unwrap();
    assert_eq!(hidden.stats.visible, 0);
    assert!(surface.to_rgba8().iter().all(|&c| c == 255));

    panel.set(ControlParam::Transition, 0.0);
    let shown = driver
        .tick(&mut panel, &uniform_masks(1.0, 0.0), 1.0 / 60.0, &mut surface)
        .unwrap();
    assert_eq!(shown.stats.visible, PARTICLES);
    assert!(surface.to_rgba8().chunks_exact(4).any(|p| p[..3] != [255, 255, 255]));
}
