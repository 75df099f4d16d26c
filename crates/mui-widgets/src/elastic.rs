#![forbid(unsafe_code)]

//! Drag resistance outside the attractor range.

/// How a drag behaves once it passes the outermost attractors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Elasticity {
    /// Follow the finger with no resistance.
    Free,
    /// Stop dead at the bounds.
    Clamp,
    /// Rubber-band: overshoot grows ever slower and never exceeds the
    /// container extent.
    Rubber { coefficient: f64 },
}

impl Default for Elasticity {
    fn default() -> Self {
        Self::Rubber { coefficient: 0.55 }
    }
}

impl Elasticity {
    /// Map a raw drag position into an elastic one against `[lo, hi]`.
    ///
    /// `extent` is the container length along the drag axis.
    #[must_use]
    pub fn apply(self, value: f64, (lo, hi): (f64, f64), extent: f64) -> f64 {
        match self {
            Self::Free => value,
            Self::Clamp => value.max(lo).min(hi),
            Self::Rubber { coefficient } => {
                if value < lo {
                    lo - rubber_band(lo - value, coefficient, extent)
                } else if value > hi {
                    hi + rubber_band(value - hi, coefficient, extent)
                } else {
                    value
                }
            }
        }
    }
}

/// Resisted displacement for a raw `overshoot` (>= 0).
///
/// `extent * (1 - 1 / (overshoot * coefficient / extent + 1))`; zero when
/// the extent is unknown, which degrades to a clamp.
#[must_use]
pub fn rubber_band(overshoot: f64, coefficient: f64, extent: f64) -> f64 {
    if !(extent.is_finite() && extent > 0.0) || overshoot <= 0.0 {
        return 0.0;
    }
    extent * (1.0 - 1.0 / (overshoot * coefficient / extent + 1.0))
}
