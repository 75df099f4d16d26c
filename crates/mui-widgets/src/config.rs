#![forbid(unsafe_code)]

//! Bouncer configuration.
//!
//! # Environment Overrides
//!
//! [`BouncerConfig::with_env_overrides`] reads:
//!
//! | variable                      | field                          |
//! |-------------------------------|--------------------------------|
//! | `MUI_BOUNCER_DURATION_MS`     | `animation_duration` (ms)      |
//! | `MUI_BOUNCER_FLICK_VELOCITY`  | `flick.velocity_threshold`     |
//! | `MUI_BOUNCER_PREFERENCE_BAND` | `flick.preference_band`        |
//!
//! Unparseable values are ignored.

use mui_core::Axis;
use mui_core::animation::Easing;
use thiserror::Error;
use web_time::Duration;

use crate::chooser::FlickConfig;
use crate::elastic::Elasticity;

pub const ENV_DURATION_MS: &str = "MUI_BOUNCER_DURATION_MS";
pub const ENV_FLICK_VELOCITY: &str = "MUI_BOUNCER_FLICK_VELOCITY";
pub const ENV_PREFERENCE_BAND: &str = "MUI_BOUNCER_PREFERENCE_BAND";

/// Attractors used when none are given: a slight leading overscroll stop
/// and a trailing panel stop.
pub const DEFAULT_ATTRACTORS: [f64; 2] = [-20.0, 150.0];

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("attractor set is empty")]
    NoAttractors,

    #[error("attractor {index} is not finite: {value}")]
    NonFiniteAttractor { index: usize, value: f64 },

    #[error("flick velocity threshold must be a non-negative number, got {0}")]
    InvalidFlickThreshold(f64),

    #[error("preference band must be a finite, non-negative distance, got {0}")]
    InvalidPreferenceBand(f64),

    #[error("rubber-band coefficient must be positive and finite, got {0}")]
    InvalidElasticity(f64),
}

/// Configuration for a [`Bouncer`](crate::bouncer::Bouncer).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BouncerConfig {
    /// Drag axis. Default: horizontal.
    pub axis: Axis,
    /// Settle animation length. Default: 250ms.
    pub animation_duration: Duration,
    /// Initial attractor positions; the bouncer starts at the first one.
    /// Default: `[-20, 150]`.
    pub attractors: Vec<f64>,
    /// Release rule for settle-target selection.
    pub flick: FlickConfig,
    /// Drag behavior past the outermost attractors.
    pub elasticity: Elasticity,
    /// Settle timing curve. Default: ease-in-out.
    pub easing: Easing,
}

impl Default for BouncerConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Horizontal,
            animation_duration: Duration::from_millis(250),
            attractors: DEFAULT_ATTRACTORS.to_vec(),
            flick: FlickConfig::default(),
            elasticity: Elasticity::default(),
            easing: Easing::default(),
        }
    }
}

impl BouncerConfig {
    /// Horizontal bouncer with default attractors.
    #[must_use]
    pub fn horizontal(animation_duration: Duration) -> Self {
        Self::default()
            .with_axis(Axis::Horizontal)
            .with_duration(animation_duration)
    }

    /// Vertical bouncer with default attractors.
    #[must_use]
    pub fn vertical(animation_duration: Duration) -> Self {
        Self::default()
            .with_axis(Axis::Vertical)
            .with_duration(animation_duration)
    }

    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    #[must_use]
    pub fn with_attractors(mut self, attractors: impl Into<Vec<f64>>) -> Self {
        self.attractors = attractors.into();
        self
    }

    #[must_use]
    pub fn with_flick_threshold(mut self, velocity_threshold: f64) -> Self {
        self.flick.velocity_threshold = velocity_threshold;
        self
    }

    /// How much farther than the nearest attractor the preferred one may be
    /// and still win a snap.
    #[must_use]
    pub fn with_preference_band(mut self, band: f64) -> Self {
        self.flick.preference_band = band;
        self
    }

    #[must_use]
    pub fn with_elasticity(mut self, elasticity: Elasticity) -> Self {
        self.elasticity = elasticity;
        self
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Default configuration overlaid with `MUI_BOUNCER_*` variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values produced by `lookup` (an environment reader).
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = lookup(ENV_DURATION_MS)
            && let Ok(ms) = val.trim().parse::<u64>()
        {
            self.animation_duration = Duration::from_millis(ms);
        }
        if let Some(val) = lookup(ENV_FLICK_VELOCITY)
            && let Ok(v) = val.trim().parse::<f64>()
        {
            self.flick.velocity_threshold = v;
        }
        if let Some(val) = lookup(ENV_PREFERENCE_BAND)
            && let Ok(band) = val.trim().parse::<f64>()
        {
            self.flick.preference_band = band;
        }
        self
    }

    /// Check every field a bouncer relies on.
    pub fn validate(&self) -> Result<()> {
        if self.attractors.is_empty() {
            return Err(ConfigError::NoAttractors);
        }
        if let Some((index, &value)) = self
            .attractors
            .iter()
            .enumerate()
            .find(|(_, a)| !a.is_finite())
        {
            return Err(ConfigError::NonFiniteAttractor { index, value });
        }
        let threshold = self.flick.velocity_threshold;
        // Infinity is allowed: it disables flicks.
        if threshold.is_nan() || threshold < 0.0 {
            return Err(ConfigError::InvalidFlickThreshold(threshold));
        }
        let band = self.flick.preference_band;
        if !(band.is_finite() && band >= 0.0) {
            return Err(ConfigError::InvalidPreferenceBand(band));
        }
        if let Elasticity::Rubber { coefficient } = self.elasticity
            && !(coefficient.is_finite() && coefficient > 0.0)
        {
            return Err(ConfigError::InvalidElasticity(coefficient));
        }
        Ok(())
    }
}
