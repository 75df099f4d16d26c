#![forbid(unsafe_code)]

//! Combine the latest values of two sources.
//!
//! # Invariants
//!
//! 1. Nothing is emitted until both sources have produced a value.
//! 2. After that, every value from either source produces exactly one
//!    combined value.
//! 3. The combined subject retains its latest value, so subscribers that
//!    arrive after construction still see the current combination.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::observable::Observable;
use super::subject::{Source, Subject, Subscription};

/// Output of [`combine_latest`]. Dropping it disconnects from both sources.
pub struct CombineLatest<C> {
    output: Subject<C>,
    _upstream: Subscription,
}

impl<C: fmt::Debug> fmt::Debug for CombineLatest<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombineLatest")
            .field("output", &self.output)
            .finish()
    }
}

impl<C: Clone + 'static> CombineLatest<C> {
    /// Latest combined value, once both sources have produced one.
    #[must_use]
    pub fn value(&self) -> Option<C> {
        self.output.value()
    }

    /// Observe combined values. Replays the latest one if present.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, observer: impl Fn(&C) + 'static) -> Subscription {
        self.output.subscribe(observer)
    }

    /// Subscribe-only handle to the combined channel.
    #[must_use]
    pub fn observable(&self) -> Observable<C> {
        self.output.observable()
    }
}

impl<C: Clone + 'static> Source<C> for CombineLatest<C> {
    fn subscribe_with(&self, observer: Box<dyn Fn(&C)>) -> Subscription {
        self.output.subscribe(move |value: &C| observer(value))
    }
}

/// Combine `a` and `b` through `combine` whenever either produces a value.
pub fn combine_latest<A, B, C>(
    a: &impl Source<A>,
    b: &impl Source<B>,
    combine: impl Fn(&A, &B) -> C + 'static,
) -> CombineLatest<C>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
{
    let output = Subject::replay();
    let latest: Rc<RefCell<(Option<A>, Option<B>)>> = Rc::new(RefCell::new((None, None)));
    let combine: Rc<dyn Fn(&A, &B) -> C> = Rc::new(combine);

    let push = {
        let output = output.downgrade();
        let latest = Rc::clone(&latest);
        move || {
            let combined = {
                let latest = latest.borrow();
                match (&latest.0, &latest.1) {
                    (Some(a), Some(b)) => Some(combine(a, b)),
                    _ => None,
                }
            };
            if let (Some(value), Some(output)) = (combined, output.upgrade()) {
                output.emit(value);
            }
        }
    };
    let push: Rc<dyn Fn()> = Rc::new(push);

    let sub_a = {
        let latest = Rc::clone(&latest);
        let push = Rc::clone(&push);
        a.subscribe_with(Box::new(move |value: &A| {
            latest.borrow_mut().0 = Some(value.clone());
            push();
        }))
    };
    let sub_b = {
        let latest = Rc::clone(&latest);
        let push = Rc::clone(&push);
        b.subscribe_with(Box::new(move |value: &B| {
            latest.borrow_mut().1 = Some(value.clone());
            push();
        }))
    };

    CombineLatest {
        output,
        _upstream: sub_a.join(sub_b),
    }
}
