#![forbid(unsafe_code)]

//! Scalar tween between two positions.

use web_time::Duration;

use super::{Animation, Easing};

/// Interpolates a scalar from `from` to `to` over a fixed duration.
///
/// A zero-duration tween is complete from the start and sits at `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl Tween {
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    #[inline]
    #[must_use]
    pub fn from(&self) -> f64 {
        self.from
    }

    #[inline]
    #[must_use]
    pub fn to(&self) -> f64 {
        self.to
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Linear (un-eased) progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Current interpolated position.
    #[must_use]
    pub fn position(&self) -> f64 {
        if self.is_complete() {
            return self.to;
        }
        let k = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * k
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}
