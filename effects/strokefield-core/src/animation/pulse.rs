//! The `run()` pulse: ease curve, thickness and speed to their peaks and back
//!
//! A single [`Tween`] is active at a time. The animator moves through
//! `Resting → EasingOut → EasingBack → Resting`; what a `run()` request
//! does while a pulse is in flight is decided by [`RetriggerPolicy`].

use log::{debug, trace};

use crate::controls::{ControlParam, ControlState};

use super::easing::Ease;
use super::tween::{Tween, TweenStep};

/// Request handling while a pulse is already animating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RetriggerPolicy {
    /// Drop the request
    #[default]
    Ignore,
    /// Ease toward the peaks again from the current values
    Restart,
    /// Hold one request and start it once the animator is resting
    Queue,
}

/// Timing and peak values of a pulse
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PulseConfig {
    /// Seconds per phase
    pub duration: f32,
    pub peak_curve: f32,
    pub peak_thickness: f32,
    pub peak_speed: f32,
    pub ease: Ease,
    pub policy: RetriggerPolicy,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            duration: 0.5,
            peak_curve: 20.0,
            peak_thickness: 0.01,
            peak_speed: 10.0,
            ease: Ease::default(),
            policy: RetriggerPolicy::default(),
        }
    }
}

impl PulseConfig {
    fn peaks(&self) -> [(ControlParam, f32); 3] {
        [
            (ControlParam::Curve, self.peak_curve),
            (ControlParam::LineThickness, self.peak_thickness),
            (ControlParam::Speed, self.peak_speed),
        ]
    }
}

/// Current phase of the pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PulsePhase {
    #[default]
    Resting,
    EasingOut,
    EasingBack,
}

/// What a `run()` request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Started,
    Ignored,
    Restarted,
    Queued,
}

/// Values a pulse returns to, captured when it starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestValues {
    pub curve: f32,
    pub thickness: f32,
    pub speed: f32,
}

impl RestValues {
    fn capture(state: &ControlState) -> Self {
        Self {
            curve: state.curve,
            thickness: state.line_thickness,
            speed: state.speed,
        }
    }

    fn targets(&self) -> [(ControlParam, f32); 3] {
        [
            (ControlParam::Curve, self.curve),
            (ControlParam::LineThickness, self.thickness),
            (ControlParam::Speed, self.speed),
        ]
    }
}

/// Two-phase pulse state machine
#[derive(Debug, Clone, Default)]
pub struct PulseAnimator {
    config: PulseConfig,
    phase: PulsePhase,
    tween: Option<Tween>,
    rest: Option<RestValues>,
    queued: bool,
}

impl PulseAnimator {
    pub fn new(config: PulseConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &PulseConfig {
        &self.config
    }

    pub fn phase(&self) -> PulsePhase {
        self.phase
    }

    pub fn is_resting(&self) -> bool {
        self.phase == PulsePhase::Resting
    }

    /// Rest values of the pulse in flight
    pub fn rest_values(&self) -> Option<RestValues> {
        self.rest
    }

    pub fn has_queued(&self) -> bool {
        self.queued
    }

    /// Request a pulse
    ///
    /// When resting, the current curve, thickness and speed become the
    /// values the pulse returns to. Otherwise the configured policy
    /// applies; a restart keeps the rest values of the pulse in flight.
    pub fn run(&mut self, state: &ControlState) -> RunOutcome {
        if self.is_resting() {
            self.start(state);
            return RunOutcome::Started;
        }

        match self.config.policy {
            RetriggerPolicy::Ignore => {
                debug!("Pulse already in {:?}, request ignored", self.phase);
                RunOutcome::Ignored
            }
            RetriggerPolicy::Restart => {
                debug!("Pulse restarted from {:?}", self.phase);
                self.ease_out(state);
                RunOutcome::Restarted
            }
            RetriggerPolicy::Queue if self.queued => RunOutcome::Ignored,
            RetriggerPolicy::Queue => {
                debug!("Pulse queued behind {:?}", self.phase);
                self.queued = true;
                RunOutcome::Queued
            }
        }
    }

    /// Advance the active tween by `dt` seconds, writing into `state`
    ///
    /// Time left over when a phase ends carries into the next phase.
    pub fn update(&mut self, dt: f32, state: &mut ControlState) {
        let mut remaining = dt;
        while let Some(tween) = self.tween.as_mut() {
            match tween.advance(remaining, state) {
                TweenStep::Running => break,
                TweenStep::Finished { overshoot } => {
                    remaining = overshoot;
                    self.finish_phase(state);
                }
            }
        }
    }

    fn start(&mut self, state: &ControlState) {
        self.rest = Some(RestValues::capture(state));
        self.ease_out(state);
    }

    fn ease_out(&mut self, state: &ControlState) {
        self.phase = PulsePhase::EasingOut;
        self.tween = Some(Tween::towards(
            state,
            &self.config.peaks(),
            self.config.duration,
            self.config.ease,
        ));
        trace!("Pulse easing out");
    }

    fn finish_phase(&mut self, state: &ControlState) {
        match self.phase {
            PulsePhase::EasingOut => {
                let rest = self.rest.unwrap_or_else(|| RestValues::capture(state));
                self.phase = PulsePhase::EasingBack;
                self.tween = Some(Tween::towards(
                    state,
                    &rest.targets(),
                    self.config.duration,
                    self.config.ease,
                ));
                trace!("Pulse easing back");
            }
            PulsePhase::EasingBack | PulsePhase::Resting => {
                self.phase = PulsePhase::Resting;
                self.tween = None;
                self.rest = None;
                debug!("Pulse finished");
                if std::mem::take(&mut self.queued) {
                    self.start(state);
                }
            }
        }
    }
}
