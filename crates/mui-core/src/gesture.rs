#![forbid(unsafe_code)]

//! Pan gesture events as delivered by the host's gesture recognizer.
//!
//! The recognizer is expected to deliver one gesture at a time, in the order
//! `Began`, `Changed*`, then `Ended` or `Cancelled`. Consumers treat anything
//! else as a no-op.

use crate::geometry::Vector;

/// Recognizer phase of a pan event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

impl PanPhase {
    /// Whether this phase finishes the gesture.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Began => "began",
            Self::Changed => "changed",
            Self::Ended => "ended",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A single pan recognizer callback.
///
/// `translation` is cumulative since `Began`; `velocity` is in points per
/// second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanEvent {
    pub phase: PanPhase,
    pub translation: Vector,
    pub velocity: Vector,
}

impl PanEvent {
    #[must_use]
    pub const fn new(phase: PanPhase, translation: Vector, velocity: Vector) -> Self {
        Self {
            phase,
            translation,
            velocity,
        }
    }

    #[must_use]
    pub const fn began() -> Self {
        Self::new(PanPhase::Began, Vector::ZERO, Vector::ZERO)
    }

    #[must_use]
    pub const fn changed(translation: Vector, velocity: Vector) -> Self {
        Self::new(PanPhase::Changed, translation, velocity)
    }

    #[must_use]
    pub const fn ended(translation: Vector, velocity: Vector) -> Self {
        Self::new(PanPhase::Ended, translation, velocity)
    }

    #[must_use]
    pub const fn cancelled(translation: Vector) -> Self {
        Self::new(PanPhase::Cancelled, translation, Vector::ZERO)
    }
}
