//! Timed interpolation of control scalars

use crate::controls::{ControlParam, ControlState};
use crate::math::Lerp;

use super::easing::Ease;

/// One scalar moved by a tween
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenTrack {
    pub param: ControlParam,
    pub from: f32,
    pub to: f32,
}

/// Result of advancing a tween
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenStep {
    Running,
    /// Targets reached; `overshoot` is the part of the step past the end
    Finished { overshoot: f32 },
}

/// Eases a set of control scalars from their start to their target values
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    tracks: Vec<TweenTrack>,
    duration: f32,
    elapsed: f32,
    ease: Ease,
}

impl Tween {
    pub fn new(tracks: Vec<TweenTrack>, duration: f32, ease: Ease) -> Self {
        Self {
            tracks,
            duration: duration.max(0.0),
            elapsed: 0.0,
            ease,
        }
    }

    /// Tween from the current values in `state` toward `targets`
    pub fn towards(
        state: &ControlState,
        targets: &[(ControlParam, f32)],
        duration: f32,
        ease: Ease,
    ) -> Self {
        let tracks = targets
            .iter()
            .map(|&(param, to)| TweenTrack {
                param,
                from: state.get(param),
                to,
            })
            .collect();
        Self::new(tracks, duration, ease)
    }

    pub fn tracks(&self) -> &[TweenTrack] {
        &self.tracks
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Linear progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    /// Advance by `dt` seconds and write the eased values into `state`
    ///
    /// On completion every track is set to exactly its target.
    pub fn advance(&mut self, dt: f32, state: &mut ControlState) -> TweenStep {
        self.elapsed += dt.max(0.0);

        if self.elapsed >= self.duration {
            for track in &self.tracks {
                state.set(track.param, track.to);
            }
            return TweenStep::Finished {
                overshoot: self.elapsed - self.duration,
            };
        }

        let t = self.ease.apply(self.progress());
        for track in &self.tracks {
            state.set(track.param, track.from.lerp(&track.to, t));
        }
        TweenStep::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_towards_captures_current_values() {
        let state = ControlState::default();
        let tween = Tween::towards(
            &state,
            &[(ControlParam::Curve, 20.0)],
            0.5,
            Ease::Linear,
        );
        assert_eq!(
            tween.tracks(),
            &[TweenTrack {
                param: ControlParam::Curve,
                from: 0.5,
                to: 20.0
            }]
        );
    }

    #[test]
    fn test_linear_midpoint() {
        let mut state = ControlState::default();
        let mut tween = Tween::towards(&state, &[(ControlParam::Speed, 3.0)], 1.0, Ease::Linear);

        assert_eq!(tween.advance(0.5, &mut state), TweenStep::Running);
        assert!((state.speed - 2.0).abs() < 1e-6);
        assert!((tween.progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_finish_snaps_and_reports_overshoot() {
        let mut state = ControlState::default();
        let mut tween = Tween::towards(
            &state,
            &[(ControlParam::LineThickness, 0.01)],
            0.5,
            Ease::QuadOut,
        );

        assert_eq!(tween.advance(0.3, &mut state), TweenStep::Running);
        match tween.advance(0.3, &mut state) {
            TweenStep::Finished { overshoot } => assert!((overshoot - 0.1).abs() < 1e-6),
            TweenStep::Running => panic!("tween should have finished"),
        }
        assert_eq!(state.line_thickness, 0.01);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut state = ControlState::default();
        let mut tween = Tween::towards(&state, &[(ControlParam::Curve, 9.0)], 0.0, Ease::Linear);
        assert_eq!(
            tween.advance(0.25, &mut state),
            TweenStep::Finished { overshoot: 0.25 }
        );
        assert_eq!(state.curve, 9.0);
    }
}
