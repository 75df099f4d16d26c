#![forbid(unsafe_code)]

//! Attractor bouncer: pan gestures in, settled offset out.
//!
//! A [`Bouncer`] follows a single-axis drag and, on release, settles to one
//! of a set of attractor positions. The offset is published on a stream so
//! layout code can apply it as a translation.
//!
//! # State Machine
//!
//! ```text
//!            Began                     Ended / Cancelled
//!   Idle ───────────▶ Dragging ─────────────────────────▶ Settling
//!    ▲                  ▲                                  │    │
//!    │                  └──────────── Began (pre-empt) ────┘    │
//!    └───────────────────────── tween complete ─────────────────┘
//! ```
//!
//! Events that do not fit the current state (`Changed` while idle, `Began`
//! while dragging, ...) are ignored.
//!
//! # Invariants
//!
//! 1. While settling, the offset stays inside `[min, max]` of the current
//!    attractors. Only a drag may leave that range, and only elastically.
//! 2. Every `Changed` event during a drag emits exactly one offset value.
//! 3. The elastic bounds of a drag are frozen at `Began`; attractor updates
//!    during the drag only affect the release.
//! 4. When idle, the offset is a member of the current attractor set.
//!
//! # Streams
//!
//! All three streams are behavior subjects handed out as read-only
//! [`Observable`] handles: subscribers immediately get the current value.
//! Emissions from one bouncer are queued FIFO, so a subscriber that
//! reconfigures the bouncer sees its own update published after the one in
//! flight, and the last value on every stream matches the bouncer state.
//!
//! - [`Bouncer::offset`]: current offset, live during drag and settle.
//! - [`Bouncer::attractors`]: current attractor set.
//! - [`Bouncer::attractor`]: position being settled to, or rested at.
//!
//! # Usage
//!
//! ```ignore
//! let pan = UiInput::<PanEvent>::new();
//! let bouncer = Bouncer::new(container, &pan, BouncerConfig::default()
//!     .with_attractors([0.0, 150.0]))?;
//! let _layout = bouncer.offset().subscribe(move |x| view.set_translation(Vector::new(*x, 0.0)));
//!
//! // host frame loop
//! bouncer.tick(frame_dt);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use mui_core::animation::{Animation, Tween};
use mui_core::logging::{debug, warn};
use mui_core::{HostView, PanEvent, PanPhase, UiScheduler, Vector};
use mui_runtime::reactive::{Observable, Source, Subject, Subscription};
use web_time::Duration;

use crate::chooser::{self, EPSILON, choose_attractor, nearest_attractor};
use crate::config::{self, BouncerConfig};

/// Externally visible interaction phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BouncerPhase {
    Idle,
    Dragging,
    Settling,
}

impl BouncerPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Settling => "settling",
        }
    }
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Dragging { start: f64, bounds: (f64, f64) },
    Settling(Tween),
}

/// Stream updates produced by one state transition, emitted after the
/// state borrow is released.
#[derive(Debug, Default)]
struct Emission {
    offset: Option<f64>,
    attractors: Option<Vec<f64>>,
    attractor: Option<f64>,
}

struct State {
    config: BouncerConfig,
    attractors: Vec<f64>,
    preferred: Option<usize>,
    offset: f64,
    target: f64,
    phase: Phase,
}

impl State {
    fn bounds(&self) -> (f64, f64) {
        // The attractor set is never empty.
        chooser::hull(&self.attractors).unwrap_or((self.offset, self.offset))
    }

    fn on_pan(&mut self, event: &PanEvent, extent: f64) -> Emission {
        let axis = self.config.axis;
        match (event.phase, &self.phase) {
            (PanPhase::Began, Phase::Dragging { .. }) => {
                debug!(message = "bouncer.pan_ignored", phase = "began", state = "dragging");
                Emission::default()
            }
            (PanPhase::Began, current) => {
                if matches!(current, Phase::Settling(_)) {
                    debug!(message = "bouncer.settle_preempted", offset = self.offset);
                }
                self.phase = Phase::Dragging {
                    start: self.offset,
                    bounds: self.bounds(),
                };
                Emission::default()
            }
            (PanPhase::Changed, &Phase::Dragging { start, bounds }) => {
                let delta = axis.component(event.translation);
                if !delta.is_finite() {
                    debug!(message = "bouncer.pan_ignored", phase = "changed", reason = "non-finite");
                    return Emission::default();
                }
                self.offset = self.config.elasticity.apply(start + delta, bounds, extent);
                Emission {
                    offset: Some(self.offset),
                    ..Emission::default()
                }
            }
            (PanPhase::Ended | PanPhase::Cancelled, Phase::Dragging { .. }) => {
                let velocity = axis.component(event.velocity);
                self.release(velocity)
            }
            _ => {
                debug!(
                    message = "bouncer.pan_ignored",
                    phase = event.phase.as_str(),
                    state = self.public_phase().as_str()
                );
                Emission::default()
            }
        }
    }

    fn release(&mut self, velocity: f64) -> Emission {
        let Some(target) = choose_attractor(
            self.offset,
            velocity,
            &self.attractors,
            self.preferred,
            &self.config.flick,
        ) else {
            self.phase = Phase::Idle;
            return Emission::default();
        };
        debug!(
            message = "bouncer.settle",
            from = self.offset,
            to = target.position,
            index = target.index,
            velocity
        );
        self.settle_towards(target.position)
    }

    /// Start (or restart) a settle from the current offset to `target`.
    fn settle_towards(&mut self, target: f64) -> Emission {
        let (lo, hi) = self.bounds();
        let from = self.offset.max(lo).min(hi);
        let moved = (from - self.offset).abs() > 0.0;
        self.offset = from;
        self.target = target;

        let duration = self.config.animation_duration;
        if duration.is_zero() || (target - from).abs() <= EPSILON {
            self.offset = target;
            self.phase = Phase::Idle;
            return Emission {
                offset: Some(target),
                attractor: Some(target),
                ..Emission::default()
            };
        }

        self.phase = Phase::Settling(Tween::new(from, target, duration, self.config.easing));
        Emission {
            offset: moved.then_some(from),
            attractor: Some(target),
            ..Emission::default()
        }
    }

    fn tick(&mut self, dt: Duration) -> (Emission, bool) {
        let Phase::Settling(tween) = &mut self.phase else {
            return (Emission::default(), false);
        };
        tween.tick(dt);
        self.offset = tween.position();
        let running = !tween.is_complete();
        if !running {
            self.offset = tween.to();
            self.phase = Phase::Idle;
        }
        (
            Emission {
                offset: Some(self.offset),
                ..Emission::default()
            },
            running,
        )
    }

    fn set_attractors(&mut self, positions: Vec<f64>) -> Emission {
        let dropped = positions.iter().filter(|p| !p.is_finite()).count();
        let cleaned: Vec<f64> = positions.into_iter().filter(|p| p.is_finite()).collect();
        if dropped > 0 {
            warn!(message = "bouncer.attractors_non_finite", dropped);
        }
        if cleaned.is_empty() {
            warn!(message = "bouncer.attractors_empty");
            return Emission::default();
        }
        self.attractors = cleaned;
        let mut emission = Emission {
            attractors: Some(self.attractors.clone()),
            ..Emission::default()
        };

        let band = self.config.flick.effective_band();
        match &self.phase {
            Phase::Idle => {
                if chooser::is_member(self.offset, &self.attractors) {
                    return emission;
                }
                if let Some(nearest) =
                    nearest_attractor(self.offset, &self.attractors, self.preferred, band)
                {
                    debug!(
                        message = "bouncer.resettle",
                        from = self.offset,
                        to = nearest.position
                    );
                    self.offset = nearest.position;
                    self.target = nearest.position;
                    emission.offset = Some(nearest.position);
                    emission.attractor = Some(nearest.position);
                }
            }
            Phase::Dragging { .. } => {}
            Phase::Settling(tween) => {
                let current_target = tween.to();
                if let Some(nearest) =
                    nearest_attractor(self.offset, &self.attractors, self.preferred, band)
                    && (nearest.position - current_target).abs() > EPSILON
                {
                    let retarget = self.settle_towards(nearest.position);
                    emission.offset = retarget.offset;
                    emission.attractor = retarget.attractor;
                } else {
                    // Same target, but the hull may have shrunk under the tween.
                    let (lo, hi) = self.bounds();
                    if self.offset < lo - EPSILON || self.offset > hi + EPSILON {
                        let retarget = self.settle_towards(current_target);
                        emission.offset = retarget.offset;
                        emission.attractor = retarget.attractor;
                    }
                }
            }
        }
        emission
    }

    fn snap_to(&mut self, index: usize) -> Emission {
        let Some(&position) = self.attractors.get(index) else {
            warn!(message = "bouncer.snap_out_of_range", index, len = self.attractors.len());
            return Emission::default();
        };
        match self.phase {
            Phase::Dragging { .. } => Emission::default(),
            Phase::Settling(_) => self.settle_towards(position),
            Phase::Idle => {
                if (position - self.offset).abs() <= EPSILON {
                    return Emission::default();
                }
                self.offset = position;
                self.target = position;
                Emission {
                    offset: Some(position),
                    attractor: Some(position),
                    ..Emission::default()
                }
            }
        }
    }

    fn public_phase(&self) -> BouncerPhase {
        match self.phase {
            Phase::Idle => BouncerPhase::Idle,
            Phase::Dragging { .. } => BouncerPhase::Dragging,
            Phase::Settling(_) => BouncerPhase::Settling,
        }
    }
}

struct Core {
    state: RefCell<State>,
    container: Rc<dyn HostView>,
    scheduler: UiScheduler,
    offset: Subject<f64>,
    attractors: Subject<Vec<f64>>,
    attractor: Subject<f64>,
}

impl Core {
    /// Emit on the scheduler. A publish from inside a subscriber runs after
    /// the current one finishes.
    fn publish(&self, emission: Emission) {
        if emission.offset.is_none()
            && emission.attractors.is_none()
            && emission.attractor.is_none()
        {
            return;
        }
        let offset = self.offset.clone();
        let attractors = self.attractors.clone();
        let attractor = self.attractor.clone();
        self.scheduler.schedule(move || {
            if let Some(value) = emission.attractors {
                attractors.emit(value);
            }
            if let Some(value) = emission.attractor {
                attractor.emit(value);
            }
            if let Some(value) = emission.offset {
                offset.emit(value);
            }
        });
    }

    fn handle_pan(&self, event: &PanEvent) {
        let axis = self.state.borrow().config.axis;
        // Read the host before borrowing state: the host may call back in.
        let extent = self.container.size().extent(axis);
        let emission = self.state.borrow_mut().on_pan(event, extent);
        self.publish(emission);
    }
}

/// Converts a pan gesture stream into a settled offset.
///
/// Dropping the bouncer disconnects it from the pan source and abandons any
/// settle in flight.
pub struct Bouncer {
    core: Rc<Core>,
    _pan: Subscription,
}

impl fmt::Debug for Bouncer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.core.state.borrow();
        f.debug_struct("Bouncer")
            .field("axis", &state.config.axis)
            .field("phase", &state.public_phase())
            .field("offset", &state.offset)
            .field("attractors", &state.attractors)
            .field("preferred", &state.preferred)
            .finish()
    }
}

impl Bouncer {
    /// Create a bouncer listening to `pan`, resting at the first attractor.
    ///
    /// `pan` is typically a `UiInput<PanEvent>` fed by the host gesture
    /// recognizer.
    pub fn new(
        container: Rc<dyn HostView>,
        pan: &impl Source<PanEvent>,
        config: BouncerConfig,
    ) -> config::Result<Self> {
        config.validate()?;
        let initial = config.attractors[0];
        let attractors = config.attractors.clone();

        let core = Rc::new(Core {
            state: RefCell::new(State {
                attractors: attractors.clone(),
                preferred: None,
                offset: initial,
                target: initial,
                phase: Phase::Idle,
                config,
            }),
            container,
            scheduler: UiScheduler::new(),
            offset: Subject::behavior(initial),
            attractors: Subject::behavior(attractors),
            attractor: Subject::behavior(initial),
        });

        let weak: Weak<Core> = Rc::downgrade(&core);
        let sub = pan.subscribe_with(Box::new(move |event: &PanEvent| {
            if let Some(core) = weak.upgrade() {
                core.handle_pan(event);
            }
        }));

        Ok(Self { core, _pan: sub })
    }

    /// Horizontal bouncer with attractors `[-20, 150]`.
    pub fn horizontal(
        container: Rc<dyn HostView>,
        pan: &impl Source<PanEvent>,
        animation_duration: Duration,
    ) -> config::Result<Self> {
        Self::new(container, pan, BouncerConfig::horizontal(animation_duration))
    }

    /// Vertical bouncer with attractors `[-20, 150]`.
    pub fn vertical(
        container: Rc<dyn HostView>,
        pan: &impl Source<PanEvent>,
        animation_duration: Duration,
    ) -> config::Result<Self> {
        Self::new(container, pan, BouncerConfig::vertical(animation_duration))
    }

    /// Feed one pan event directly (the pan source does this automatically).
    pub fn handle_pan(&self, event: &PanEvent) {
        self.core.handle_pan(event);
    }

    /// Advance an in-flight settle by `dt`. Returns whether it is still running.
    pub fn tick(&self, dt: Duration) -> bool {
        let (emission, running) = self.core.state.borrow_mut().tick(dt);
        self.core.publish(emission);
        running
    }

    /// Replace the attractor set.
    ///
    /// Non-finite positions are dropped; an update that leaves nothing is
    /// ignored. While idle off the new set, the offset jumps (no animation)
    /// to the nearest new attractor. While dragging, the drag is untouched.
    /// While settling, the settle is retargeted to the nearest new attractor.
    pub fn set_attractors(&self, positions: impl Into<Vec<f64>>) {
        let emission = self.core.state.borrow_mut().set_attractors(positions.into());
        self.core.publish(emission);
    }

    /// Mark the attractor at `index` as preferred: it wins a snap when it is
    /// within the configured preference band of the nearest attractor.
    /// `None` clears it.
    pub fn set_preferred_attractor(&self, index: Option<usize>) {
        self.core.state.borrow_mut().preferred = index;
    }

    /// Move to the attractor at `index` without user interaction.
    ///
    /// Idle: jumps there without animation. Settling: retargets the settle.
    /// Dragging: ignored, the release decides.
    pub fn snap_to_attractor(&self, index: usize) {
        let emission = self.core.state.borrow_mut().snap_to(index);
        self.core.publish(emission);
    }

    /// Offset stream.
    #[must_use]
    pub fn offset(&self) -> Observable<f64> {
        self.core.offset.observable()
    }

    /// Attractor-set stream.
    #[must_use]
    pub fn attractors(&self) -> Observable<Vec<f64>> {
        self.core.attractors.observable()
    }

    /// Targeted or settled attractor stream.
    #[must_use]
    pub fn attractor(&self) -> Observable<f64> {
        self.core.attractor.observable()
    }

    #[must_use]
    pub fn phase(&self) -> BouncerPhase {
        self.core.state.borrow().public_phase()
    }

    #[must_use]
    pub fn current_offset(&self) -> f64 {
        self.core.state.borrow().offset
    }

    #[must_use]
    pub fn current_attractors(&self) -> Vec<f64> {
        self.core.state.borrow().attractors.clone()
    }

    /// Position currently targeted (settling) or rested at (idle).
    #[must_use]
    pub fn current_target(&self) -> f64 {
        self.core.state.borrow().target
    }

    #[must_use]
    pub fn preferred_attractor(&self) -> Option<usize> {
        self.core.state.borrow().preferred
    }

    /// Current offset as a translation along the configured axis.
    #[must_use]
    pub fn translation(&self) -> Vector {
        let state = self.core.state.borrow();
        state.config.axis.vector(state.offset)
    }

    #[must_use]
    pub fn config(&self) -> BouncerConfig {
        self.core.state.borrow().config.clone()
    }
}
