#![forbid(unsafe_code)]

//! Settle-target selection.
//!
//! [`choose_attractor`] is the whole decision a bouncer makes when a drag
//! ends. It is pure so it can be tested and benchmarked without gestures.
//!
//! # Decision Rule
//!
//! ```text
//! if |velocity| >= flick.velocity_threshold
//!    and some attractor lies beyond offset in the direction of velocity:
//!        pick the closest such attractor            (flick)
//! else:
//!        pick the attractor nearest to offset       (snap)
//!        the preferred index wins if it is within flick.preference_band
//!        of the nearest distance; other ties go to the lowest index
//! ```
//!
//! # Failure Modes
//!
//! - Empty attractor set: `None`.
//! - Non-finite offset: every distance is undefined, so the preferred
//!   attractor (if valid) or the first one is chosen.
//! - Non-finite velocity: never a flick.

/// Positions closer than this are the same position.
pub const EPSILON: f64 = 1e-6;

/// A chosen attractor: its index in the configured set and its position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attractor {
    pub index: usize,
    pub position: f64,
}

/// Release rule: when a release is a flick, and how far the preferred
/// attractor reaches when it is not.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlickConfig {
    /// Minimum speed along the axis, in points per second. Default: 300.0.
    pub velocity_threshold: f64,
    /// The preferred attractor wins a snap when it is at most this much
    /// farther than the nearest one, in points. Default: 16.0.
    pub preference_band: f64,
}

impl Default for FlickConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: 300.0,
            preference_band: 16.0,
        }
    }
}

impl FlickConfig {
    /// A rule under which no release is a flick.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            velocity_threshold: f64::INFINITY,
            ..Self::default()
        }
    }

    /// Band actually applied: non-finite or sub-`EPSILON` values fall back
    /// to exact ties.
    #[must_use]
    pub fn effective_band(&self) -> f64 {
        if self.preference_band.is_finite() {
            self.preference_band.max(EPSILON)
        } else {
            EPSILON
        }
    }

    /// Direction (`1.0` or `-1.0`) of a flick at `velocity`, if it is one.
    #[must_use]
    pub fn direction(&self, velocity: f64) -> Option<f64> {
        if velocity.is_finite() && velocity != 0.0 && velocity.abs() >= self.velocity_threshold {
            Some(velocity.signum())
        } else {
            None
        }
    }
}

/// Pick the settle target for a release at `offset` moving at `velocity`.
#[must_use]
pub fn choose_attractor(
    offset: f64,
    velocity: f64,
    attractors: &[f64],
    preferred: Option<usize>,
    flick: &FlickConfig,
) -> Option<Attractor> {
    if attractors.is_empty() {
        return None;
    }
    if let Some(direction) = flick.direction(velocity)
        && let Some(ahead) = next_in_direction(offset, direction, attractors)
    {
        return Some(ahead);
    }
    nearest_attractor(offset, attractors, preferred, flick.effective_band())
}

/// The attractor nearest to `offset`.
///
/// `preferred` wins when its distance is within `band` of the nearest
/// distance. Pass [`EPSILON`] for exact ties only.
#[must_use]
pub fn nearest_attractor(
    offset: f64,
    attractors: &[f64],
    preferred: Option<usize>,
    band: f64,
) -> Option<Attractor> {
    if attractors.is_empty() {
        return None;
    }
    let distance = |i: usize| (attractors[i] - offset).abs();
    let best = (0..attractors.len())
        .map(distance)
        .fold(f64::INFINITY, f64::min);

    let preferred = preferred.filter(|&p| p < attractors.len());
    if !best.is_finite() {
        let index = preferred.unwrap_or(0);
        return Some(Attractor {
            index,
            position: attractors[index],
        });
    }

    let within = |i: usize, band: f64| distance(i) - best <= band;
    let index = preferred
        .filter(|&p| within(p, band.max(EPSILON)))
        .or_else(|| (0..attractors.len()).find(|&i| within(i, EPSILON)))?;
    Some(Attractor {
        index,
        position: attractors[index],
    })
}

/// Closest attractor strictly beyond `offset` in `direction`.
fn next_in_direction(offset: f64, direction: f64, attractors: &[f64]) -> Option<Attractor> {
    attractors
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, position)| (position - offset) * direction > EPSILON)
        .min_by(|a, b| (a.1 - offset).abs().total_cmp(&(b.1 - offset).abs()))
        .map(|(index, position)| Attractor { index, position })
}

/// Smallest and largest attractor, or `None` for an empty set.
#[must_use]
pub fn hull(attractors: &[f64]) -> Option<(f64, f64)> {
    let mut iter = attractors.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), a| (lo.min(a), hi.max(a))))
}

/// Whether `offset` coincides with one of `attractors`.
#[must_use]
pub fn is_member(offset: f64, attractors: &[f64]) -> bool {
    attractors.iter().any(|a| (a - offset).abs() <= EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIR: [f64; 2] = [0.0, 150.0];

    fn choose(offset: f64, velocity: f64) -> f64 {
        choose_attractor(offset, velocity, &PAIR, None, &FlickConfig::default())
            .expect("non-empty")
            .position
    }

    #[test]
    fn slow_release_snaps_to_nearest() {
        assert_eq!(choose(80.0, 0.0), 150.0);
        assert_eq!(choose(70.0, 5.0), 0.0);
        assert_eq!(choose(-40.0, 0.0), 0.0);
        assert_eq!(choose(200.0, 0.0), 150.0);
    }

    #[test]
    fn release_below_midpoint_settles_to_zero() {
        let r = choose_attractor(74.0, 0.0, &PAIR, None, &FlickConfig::default());
        assert_eq!(r, Some(Attractor { index: 0, position: 0.0 }));
    }

    #[test]
    fn flick_overrides_distance() {
        assert_eq!(choose(20.0, 900.0), 150.0);
        assert_eq!(choose(80.0, 900.0), 150.0);
        assert_eq!(choose(80.0, -900.0), 0.0);
        assert_eq!(choose(130.0, -900.0), 0.0);
    }

    #[test]
    fn flick_past_the_last_attractor_falls_back_to_nearest() {
        assert_eq!(choose(170.0, 900.0), 150.0);
        assert_eq!(choose(-10.0, -900.0), 0.0);
    }

    #[test]
    fn flick_picks_the_next_not_the_farthest() {
        let set = [0.0, 100.0, 200.0, 300.0];
        let r = choose_attractor(110.0, 1000.0, &set, None, &FlickConfig::default());
        assert_eq!(r.map(|a| a.position), Some(200.0));
    }

    #[test]
    fn flick_from_exactly_an_attractor_moves_on() {
        let r = choose_attractor(0.0, 500.0, &PAIR, None, &FlickConfig::default());
        assert_eq!(r.map(|a| a.index), Some(1));
    }

    #[test]
    fn below_threshold_is_not_a_flick() {
        let flick = FlickConfig {
            velocity_threshold: 1000.0,
            ..FlickConfig::default()
        };
        let r = choose_attractor(20.0, 999.0, &PAIR, None, &flick);
        assert_eq!(r.map(|a| a.position), Some(0.0));
        assert_eq!(
            choose_attractor(20.0, 1e9, &PAIR, None, &FlickConfig::disabled()).map(|a| a.index),
            Some(0)
        );
    }

    #[test]
    fn preferred_wins_ties() {
        let set = [0.0, 300.0];
        assert_eq!(nearest_attractor(150.0, &set, None, EPSILON).map(|a| a.index), Some(0));
        assert_eq!(
            nearest_attractor(150.0, &set, Some(1), EPSILON).map(|a| a.index),
            Some(1)
        );
    }

    #[test]
    fn preferred_does_not_beat_a_strictly_nearer_attractor() {
        let set = [0.0, 300.0];
        assert_eq!(
            nearest_attractor(140.0, &set, Some(1), 16.0).map(|a| a.index),
            Some(0)
        );
    }

    #[test]
    fn preferred_wins_within_the_band() {
        let flick = FlickConfig::default();
        let r = choose_attractor(80.0, 0.0, &PAIR, Some(0), &flick);
        assert_eq!(r, Some(Attractor { index: 0, position: 0.0 }));
        // 10pt farther is inside the default band, 20pt is not.
        let r = choose_attractor(85.0, 0.0, &PAIR, Some(0), &flick);
        assert_eq!(r.map(|a| a.position), Some(150.0));
        // A flick still beats the preference.
        let r = choose_attractor(80.0, 900.0, &PAIR, Some(0), &flick);
        assert_eq!(r.map(|a| a.position), Some(150.0));
    }

    #[test]
    fn degenerate_band_means_exact_ties() {
        let exact = FlickConfig {
            preference_band: 0.0,
            ..FlickConfig::default()
        };
        assert_eq!(exact.effective_band(), EPSILON);
        let r = choose_attractor(80.0, 0.0, &PAIR, Some(0), &exact);
        assert_eq!(r.map(|a| a.position), Some(150.0));
        let unbounded = FlickConfig {
            preference_band: f64::NAN,
            ..FlickConfig::default()
        };
        assert_eq!(unbounded.effective_band(), EPSILON);
    }

    #[test]
    fn out_of_range_preferred_is_ignored() {
        let set = [0.0, 300.0];
        assert_eq!(
            nearest_attractor(150.0, &set, Some(9), EPSILON).map(|a| a.index),
            Some(0)
        );
    }

    #[test]
    fn unsorted_sets_work() {
        let set = [150.0, -20.0, 40.0];
        assert_eq!(nearest_attractor(30.0, &set, None, EPSILON).map(|a| a.index), Some(2));
        let r = choose_attractor(45.0, 800.0, &set, None, &FlickConfig::default());
        assert_eq!(r.map(|a| a.position), Some(150.0));
        let r = choose_attractor(35.0, -800.0, &set, None, &FlickConfig::default());
        assert_eq!(r.map(|a| a.position), Some(-20.0));
    }

    #[test]
    fn empty_set_has_no_target() {
        assert_eq!(choose_attractor(0.0, 0.0, &[], None, &FlickConfig::default()), None);
        assert_eq!(hull(&[]), None);
    }

    #[test]
    fn non_finite_inputs_degrade_gracefully() {
        assert_eq!(
            nearest_attractor(f64::NAN, &PAIR, Some(1), EPSILON).map(|a| a.index),
            Some(1)
        );
        assert_eq!(nearest_attractor(f64::NAN, &PAIR, None, EPSILON).map(|a| a.index), Some(0));
        assert_eq!(FlickConfig::default().direction(f64::NAN), None);
        assert_eq!(FlickConfig::default().direction(f64::INFINITY), None);
    }

    #[test]
    fn hull_and_membership() {
        assert_eq!(hull(&[150.0, -20.0, 40.0]), Some((-20.0, 150.0)));
        assert!(is_member(150.0 + EPSILON / 2.0, &PAIR));
        assert!(!is_member(149.0, &PAIR));
    }
}
