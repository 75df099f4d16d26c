#![forbid(unsafe_code)]

//! Tick-driven animation primitives.
//!
//! Animations do not own a clock. The host calls [`Animation::tick`] once per
//! frame with the elapsed time, then reads the current position. This keeps
//! everything deterministic under test: advance time by hand and assert.
//!
//! # Invariants
//!
//! 1. [`Easing::apply`] maps `[0, 1]` into `[0, 1]` and is non-decreasing.
//! 2. Once `is_complete()` is true, further ticks change nothing.

mod tween;

pub use tween::Tween;

use web_time::Duration;

/// A time-driven animation.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;
}

/// Timing curve mapping linear progress to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    /// The host toolkit's default curve.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map `t` (clamped to `[0, 1]`) through the curve.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let k = -2.0 * t + 2.0;
                    1.0 - k * k * k / 2.0
                }
            }
        }
    }
}
