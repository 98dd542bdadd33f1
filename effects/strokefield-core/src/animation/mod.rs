//! Control animation
//!
//! This module provides the scripted pulse that drives three control
//! scalars out to their peaks and back:
//! - Easing curves
//! - Single-tween interpolation of [`ControlState`](crate::ControlState) fields
//! - The pulse state machine with an explicit retrigger policy
//!
//! # Example
//!
//! ```rust
//! use strokefield_core::ControlState;
//! use strokefield_core::animation::{PulseAnimator, PulseConfig, RunOutcome};
//!
//! let mut state = ControlState::default();
//! let mut pulse = PulseAnimator::new(PulseConfig::default());
//!
//! assert_eq!(pulse.run(&state), RunOutcome::Started);
//! for _ in 0..120 {
//!     pulse.update(1.0 / 60.0, &mut state);
//! }
//! assert!(pulse.is_resting());
//! assert_eq!(state, ControlState::default());
//! ```

mod easing;
mod pulse;
mod tween;

pub use easing::Ease;
pub use pulse::{PulseAnimator, PulseConfig, PulsePhase, RestValues, RetriggerPolicy, RunOutcome};
pub use tween::{Tween, TweenStep, TweenTrack};
