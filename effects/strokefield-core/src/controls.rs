//! Control state and the panel binding that mutates it

use std::fmt;
use std::str::FromStr;

use crate::animation::{PulseAnimator, PulseConfig, RunOutcome};
use crate::error::{FieldError, Result};
use crate::kernel::FrameUniforms;

/// Scalars the effect is steered by
///
/// One instance per effect, owned by the [`ControlPanel`] and read once
/// per frame by the frame driver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControlState {
    /// 0 shows the start mask, 1 the end mask
    pub transition: f32,
    /// Weight between each particle's short and long length
    pub line_width: f32,
    pub line_thickness: f32,
    pub curve: f32,
    /// Clock multiplier
    pub speed: f32,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            transition: 0.0,
            line_width: 0.0,
            line_thickness: 0.1,
            curve: 0.5,
            speed: 1.0,
        }
    }
}

impl ControlState {
    pub fn get(&self, param: ControlParam) -> f32 {
        match param {
            ControlParam::Transition => self.transition,
            ControlParam::LineWidth => self.line_width,
            ControlParam::LineThickness => self.line_thickness,
            ControlParam::Curve => self.curve,
            ControlParam::Speed => self.speed,
        }
    }

    /// Store `value` as is; range checks are the caller's business
    pub fn set(&mut self, param: ControlParam, value: f32) {
        let slot = match param {
            ControlParam::Transition => &mut self.transition,
            ControlParam::LineWidth => &mut self.line_width,
            ControlParam::LineThickness => &mut self.line_thickness,
            ControlParam::Curve => &mut self.curve,
            ControlParam::Speed => &mut self.speed,
        };
        *slot = value;
    }

    /// Snapshot the state into the uniforms of a frame at `time`
    pub fn uniforms(&self, time: f32) -> FrameUniforms {
        FrameUniforms {
            transition: self.transition,
            line_width: self.line_width,
            line_thickness: self.line_thickness,
            curve: self.curve,
            time,
        }
    }
}

/// A bound control scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlParam {
    Transition,
    LineWidth,
    LineThickness,
    Curve,
    Speed,
}

impl ControlParam {
    pub const ALL: [Self; 5] = [
        Self::Transition,
        Self::LineWidth,
        Self::LineThickness,
        Self::Curve,
        Self::Speed,
    ];

    /// Panel slider step
    pub const STEP: f32 = 0.01;

    pub fn name(self) -> &'static str {
        match self {
            Self::Transition => "transition",
            Self::LineWidth => "line-width",
            Self::LineThickness => "line-thickness",
            Self::Curve => "curve",
            Self::Speed => "speed",
        }
    }

    /// Declared panel range `(min, max)`
    pub fn range(self) -> (f32, f32) {
        match self {
            Self::Transition | Self::LineWidth | Self::LineThickness => (0.0, 1.0),
            Self::Curve => (0.0, 30.0),
            Self::Speed => (f32::MIN_POSITIVE, f32::INFINITY),
        }
    }

    /// Clamp `value` into [`Self::range`]
    pub fn clamp(self, value: f32) -> f32 {
        let (min, max) = self.range();
        value.clamp(min, max)
    }
}

impl fmt::Display for ControlParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ControlParam {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|p| p.name() == normalized)
            .ok_or_else(|| FieldError::UnknownControl(s.to_string()))
    }
}

/// Read/write binding of the control scalars plus the pulse trigger
#[derive(Debug, Clone, Default)]
pub struct ControlPanel {
    state: ControlState,
    pulse: PulseAnimator,
}

impl ControlPanel {
    pub fn new(state: ControlState, pulse: PulseConfig) -> Self {
        Self {
            state,
            pulse: PulseAnimator::new(pulse),
        }
    }

    pub fn get(&self, param: ControlParam) -> f32 {
        self.state.get(param)
    }

    pub fn set(&mut self, param: ControlParam, value: f32) {
        self.state.set(param, value);
    }

    /// Trigger the pulse
    pub fn run(&mut self) -> RunOutcome {
        self.pulse.run(&self.state)
    }

    /// Advance the pulse by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.pulse.update(dt, &mut self.state);
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ControlState {
        &mut self.state
    }

    pub fn pulse(&self) -> &PulseAnimator {
        &self.pulse
    }
}
