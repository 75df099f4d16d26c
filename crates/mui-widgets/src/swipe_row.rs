#![forbid(unsafe_code)]

//! Swipeable row with trailing actions.
//!
//! The row content slides left to reveal a trailing panel of action buttons.
//! A horizontal [`Bouncer`] owns the slide; the row derives its attractors
//! from the panel width:
//!
//! ```text
//!   offset = w + s   closed   content translation 0
//!   offset = 0       open     content translation -(w + s)
//! ```
//!
//! where `w` is the trailing panel width and `s` the spacing between the
//! content and the panel. A zero-width panel leaves a single attractor.
//!
//! # Invariants
//!
//! 1. Content translation is always `offset - (w + s)` for the latest
//!    offset and width.
//! 2. Every width update re-derives the attractors, prefers the closed
//!    position and closes the row.
//! 3. Only visible actions can be triggered.

use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::rc::{Rc, Weak};

use ahash::AHashSet;
use mui_core::logging::{debug, warn};
use mui_core::{HostView, PanEvent, Vector};
use mui_runtime::reactive::{
    CombineLatest, InputWriter, Observable, Source, Subject, Subscription, UiInput,
    combine_latest,
};
use web_time::Duration;

use crate::bouncer::Bouncer;
use crate::chooser::EPSILON;
use crate::config::{self, BouncerConfig};

/// Attractors for a trailing panel of `width` separated by `spacing`.
///
/// The closed position is last so it wins as the preferred index.
#[must_use]
pub fn trailing_attractors(width: f64, spacing: f64) -> Vec<f64> {
    if width == 0.0 {
        vec![0.0]
    } else {
        vec![0.0, width + spacing]
    }
}

/// Model of a row whose content can be swiped to reveal trailing actions.
pub struct SwipeRow<A> {
    bouncer: Rc<Bouncer>,
    trailing_width: UiInput<f64>,
    spacing: f64,
    translation: CombineLatest<Vector>,
    trailing_inset: Subject<f64>,
    visible: RefCell<AHashSet<A>>,
    triggered: Subject<A>,
    _bindings: Subscription,
}

impl<A: fmt::Debug> fmt::Debug for SwipeRow<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeRow")
            .field("bouncer", &self.bouncer)
            .field("trailing_width", &self.trailing_width.value())
            .field("spacing", &self.spacing)
            .field("visible", &self.visible.borrow())
            .finish()
    }
}

impl<A: Eq + Hash + Clone + 'static> SwipeRow<A> {
    /// Build a row.
    ///
    /// `container` is the row frame (pan surface and elastic extent),
    /// `content` receives the translation.
    pub fn new(
        container: Rc<dyn HostView>,
        content: Rc<dyn HostView>,
        pan: &impl Source<PanEvent>,
        trailing_width: f64,
        spacing: f64,
        animation_duration: Duration,
    ) -> config::Result<Self> {
        let config = BouncerConfig::horizontal(animation_duration)
            .with_attractors(trailing_attractors(trailing_width, spacing));
        let bouncer = Rc::new(Bouncer::new(container, pan, config)?);
        let width_input = UiInput::with_value(trailing_width);
        let trailing_inset = Subject::replay();

        let width_binding = {
            let bouncer: Weak<Bouncer> = Rc::downgrade(&bouncer);
            let inset = trailing_inset.downgrade();
            width_input.subscribe(move |width: &f64| {
                let width = *width;
                if !width.is_finite() || width < 0.0 {
                    warn!(message = "swipe_row.width_ignored", width);
                    return;
                }
                if let Some(bouncer) = bouncer.upgrade() {
                    let attractors = trailing_attractors(width, spacing);
                    let closed = attractors.len() - 1;
                    bouncer.set_attractors(attractors);
                    bouncer.set_preferred_attractor(Some(closed));
                    bouncer.snap_to_attractor(closed);
                }
                if let Some(inset) = inset.upgrade() {
                    inset.emit(-(width + spacing));
                }
            })
        };

        let translation = combine_latest(
            &bouncer.offset(),
            &width_input,
            move |offset: &f64, width: &f64| Vector::new(offset - width - spacing, 0.0),
        );
        let layout_binding = translation.subscribe(move |t: &Vector| content.set_translation(*t));

        Ok(Self {
            bouncer,
            trailing_width: width_input,
            spacing,
            translation,
            trailing_inset,
            visible: RefCell::new(AHashSet::new()),
            triggered: Subject::publish(),
            _bindings: width_binding.join(layout_binding),
        })
    }

    /// Write handle for the trailing panel width.
    #[must_use]
    pub fn trailing_width(&self) -> InputWriter<f64> {
        self.trailing_width.writer()
    }

    #[must_use]
    pub fn current_trailing_width(&self) -> Option<f64> {
        self.trailing_width.value()
    }

    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Content translation stream.
    #[must_use]
    pub fn translation(&self) -> &CombineLatest<Vector> {
        &self.translation
    }

    /// Inset of the content's trailing edge, `-(w + s)`.
    #[must_use]
    pub fn trailing_inset(&self) -> Observable<f64> {
        self.trailing_inset.observable()
    }

    #[must_use]
    pub fn bouncer(&self) -> &Bouncer {
        &self.bouncer
    }

    /// Whether the row currently rests fully closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        let offset = self.bouncer.current_offset();
        self.bouncer
            .current_attractors()
            .last()
            .is_some_and(|closed| (offset - closed).abs() <= EPSILON)
    }

    /// Advance the settle animation. Returns whether it is still running.
    pub fn tick(&self, dt: Duration) -> bool {
        self.bouncer.tick(dt)
    }

    /// Show exactly `actions` and resize the trailing panel to `width`.
    pub fn set_visible_actions(&self, actions: impl IntoIterator<Item = A>, width: f64) {
        {
            let mut visible = self.visible.borrow_mut();
            visible.clear();
            visible.extend(actions);
        }
        self.trailing_width.write(width);
    }

    #[must_use]
    pub fn is_action_visible(&self, action: &A) -> bool {
        self.visible.borrow().contains(action)
    }

    #[must_use]
    pub fn visible_action_count(&self) -> usize {
        self.visible.borrow().len()
    }

    /// Fire `action` on the [`triggered`](Self::triggered) stream if it is visible.
    pub fn trigger(&self, action: &A) -> bool {
        if !self.is_action_visible(action) {
            debug!(message = "swipe_row.trigger_hidden");
            return false;
        }
        self.triggered.emit(action.clone());
        true
    }

    /// Stream of triggered actions.
    #[must_use]
    pub fn triggered(&self) -> Observable<A> {
        self.triggered.observable()
    }
}
