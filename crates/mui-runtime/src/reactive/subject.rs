#![forbid(unsafe_code)]

//! Value-only multicast subjects.
//!
//! # Modes
//!
//! | constructor            | retains latest | replays on subscribe |
//! |------------------------|----------------|----------------------|
//! | [`Subject::publish`]   | no             | never                |
//! | [`Subject::behavior`]  | yes            | always (has a value) |
//! | [`Subject::replay`]    | yes            | once something was emitted |
//!
//! The mode is fixed at construction.
//!
//! # Failure Modes
//!
//! - **Callback panics**: the panic propagates out of `emit`; subscribers
//!   after the panicking one miss that value.
//! - **Re-entrant emit**: a callback may emit on the same subject. The nested
//!   emission completes before the outer one continues, so delivery order is
//!   depth-first. Use a [`UiInput`](super::UiInput) when FIFO order matters.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = dyn Fn(&T);

struct SubjectInner<T> {
    /// Latest value, only ever set when `retains` is true.
    current: Option<T>,
    retains: bool,
    subscribers: Vec<Weak<Callback<T>>>,
}

/// A multicast channel of plain values.
///
/// Cloning a `Subject` creates a new handle to the **same** channel.
pub struct Subject<T> {
    inner: Rc<RefCell<SubjectInner<T>>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Subject")
            .field("current", &inner.current)
            .field("retains", &inner.retains)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + 'static> Subject<T> {
    fn with_mode(current: Option<T>, retains: bool) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SubjectInner {
                current,
                retains,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Stateless subject: values reach only subscribers live at emission.
    #[must_use]
    pub fn publish() -> Self {
        Self::with_mode(None, false)
    }

    /// Stateful subject seeded with `initial`.
    #[must_use]
    pub fn behavior(initial: T) -> Self {
        Self::with_mode(Some(initial), true)
    }

    /// Stateful subject that starts empty and retains the latest emission.
    #[must_use]
    pub fn replay() -> Self {
        Self::with_mode(None, true)
    }

    /// Whether this subject retains its latest value.
    #[must_use]
    pub fn is_stateful(&self) -> bool {
        self.inner.borrow().retains
    }

    /// Latest retained value. Always `None` for a publish subject.
    #[must_use]
    pub fn value(&self) -> Option<T> {
        self.inner.borrow().current.clone()
    }

    /// Deliver `value` to every live subscriber, in registration order.
    pub fn emit(&self, value: T) {
        let callbacks: Vec<Rc<Callback<T>>> = {
            let mut inner = self.inner.borrow_mut();
            if inner.retains {
                inner.current = Some(value.clone());
            }
            inner.subscribers.retain(|weak| weak.strong_count() > 0);
            inner.subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        // Borrow released: callbacks may emit, subscribe or read freely.
        for callback in callbacks {
            callback(&value);
        }
    }

    /// Register `observer`. A retaining subject with a value calls it once
    /// before returning.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<Callback<T>> = Rc::new(observer);
        let replay = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.push(Rc::downgrade(&callback));
            inner.current.clone()
        };
        if let Some(value) = replay {
            callback(&value);
        }
        Subscription::new(callback)
    }

    /// Number of subscribers whose guard is still alive.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// A handle that does not keep the channel alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakSubject<T> {
        WeakSubject {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// Non-owning handle to a [`Subject`].
pub struct WeakSubject<T> {
    inner: Weak<RefCell<SubjectInner<T>>>,
}

impl<T> Clone for WeakSubject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for WeakSubject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakSubject")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl<T> WeakSubject<T> {
    #[must_use]
    pub fn upgrade(&self) -> Option<Subject<T>> {
        self.inner.upgrade().map(|inner| Subject { inner })
    }
}

/// Anything that can be subscribed to for values of `T`.
pub trait Source<T> {
    /// Register `observer`; delivery stops when the guard drops.
    fn subscribe_with(&self, observer: Box<dyn Fn(&T)>) -> Subscription;
}

impl<T: Clone + 'static> Source<T> for Subject<T> {
    fn subscribe_with(&self, observer: Box<dyn Fn(&T)>) -> Subscription {
        self.subscribe(move |value: &T| observer(value))
    }
}

/// RAII guard for one or more subscriptions.
///
/// Dropping it unsubscribes. Guards can be merged with [`Subscription::join`]
/// so a widget can hold all of its bindings in one field.
#[must_use = "dropping the Subscription unsubscribes immediately"]
#[derive(Default)]
pub struct Subscription {
    guards: Vec<Box<dyn Any>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("guards", &self.guards.len())
            .finish()
    }
}

impl Subscription {
    fn new<T: 'static>(callback: Rc<Callback<T>>) -> Self {
        Self {
            guards: vec![Box::new(callback)],
        }
    }

    /// Keep `value` alive for as long as this guard lives.
    pub(crate) fn holding(value: impl Any) -> Self {
        Self {
            guards: vec![Box::new(value)],
        }
    }

    /// A guard that holds nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge `other` into this guard.
    pub fn join(mut self, other: Subscription) -> Self {
        self.guards.extend(other.guards);
        self
    }

    /// Whether this guard holds no subscription.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Unsubscribe now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl FromIterator<Subscription> for Subscription {
    fn from_iter<I: IntoIterator<Item = Subscription>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::join)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(&T) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |v: &T| sink.borrow_mut().push(v.clone()))
    }

    #[test]
    fn publish_does_not_replay() {
        let subject = Subject::publish();
        subject.emit(1);
        let (log, f) = recorder::<i32>();
        let _sub = subject.subscribe(f);
        assert!(log.borrow().is_empty());
        subject.emit(2);
        assert_eq!(*log.borrow(), vec![2]);
        assert_eq!(subject.value(), None);
    }

    #[test]
    fn behavior_replays_initial_and_latest() {
        let subject = Subject::behavior(10);
        let (early, f) = recorder::<i32>();
        let _a = subject.subscribe(f);
        assert_eq!(*early.borrow(), vec![10]);

        subject.emit(11);
        let (late, g) = recorder::<i32>();
        let _b = subject.subscribe(g);
        assert_eq!(*early.borrow(), vec![10, 11]);
        assert_eq!(*late.borrow(), vec![11]);
        assert_eq!(subject.value(), Some(11));
    }

    #[test]
    fn replay_starts_empty() {
        let subject = Subject::replay();
        let (log, f) = recorder::<&str>();
        let _sub = subject.subscribe(f);
        assert!(log.borrow().is_empty());
        subject.emit("a");
        let (late, g) = recorder::<&str>();
        let _late = subject.subscribe(g);
        assert_eq!(*late.borrow(), vec!["a"]);
        assert!(subject.is_stateful());
    }

    #[test]
    fn equal_values_are_not_deduplicated() {
        let subject = Subject::publish();
        let (log, f) = recorder::<i32>();
        let _sub = subject.subscribe(f);
        subject.emit(5);
        subject.emit(5);
        assert_eq!(*log.borrow(), vec![5, 5]);
    }

    #[test]
    fn registration_order_is_notification_order() {
        let subject = Subject::publish();
        let order = Rc::new(RefCell::new(Vec::new()));
        let subs: Vec<_> = (0..4)
            .map(|i| {
                let o = Rc::clone(&order);
                subject.subscribe(move |_: &()| o.borrow_mut().push(i))
            })
            .collect();
        subject.emit(());
        assert_eq!(*order.borrow(), vec![0, 1, 2, 3]);
        drop(subs);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let subject = Subject::publish();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = subject.subscribe(move |_: &i32| h.set(h.get() + 1));
        subject.emit(1);
        assert_eq!(subject.subscriber_count(), 1);
        sub.unsubscribe();
        subject.emit(2);
        assert_eq!(hits.get(), 1);
        assert_eq!(subject.subscriber_count(), 0);
    }

    #[test]
    fn joined_subscription_drops_all() {
        let a = Subject::publish();
        let b = Subject::publish();
        let hits = Rc::new(Cell::new(0));
        let ha = Rc::clone(&hits);
        let hb = Rc::clone(&hits);
        let joined = a
            .subscribe(move |_: &u8| ha.set(ha.get() + 1))
            .join(b.subscribe(move |_: &u8| hb.set(hb.get() + 1)));
        a.emit(0);
        b.emit(0);
        assert_eq!(hits.get(), 2);
        drop(joined);
        a.emit(0);
        b.emit(0);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn callback_can_emit_reentrantly() {
        let subject = Subject::publish();
        let log = Rc::new(RefCell::new(Vec::new()));
        let s = subject.clone();
        let l = Rc::clone(&log);
        let _sub = subject.subscribe(move |v: &i32| {
            l.borrow_mut().push(*v);
            if *v < 3 {
                s.emit(v + 1);
            }
        });
        subject.emit(1);
        assert_eq!(*log.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn weak_subject_does_not_keep_channel_alive() {
        let subject = Subject::behavior(1);
        let weak = subject.downgrade();
        assert!(weak.upgrade().is_some());
        drop(subject);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn source_trait_delivers() {
        let subject = Subject::behavior(3);
        let (log, f) = recorder::<i32>();
        let _sub = Source::subscribe_with(&subject, Box::new(f));
        subject.emit(4);
        assert_eq!(*log.borrow(), vec![3, 4]);
    }

    #[test]
    fn subscription_collects_from_iterator() {
        let subject = Subject::publish();
        let joined: Subscription = (0..3).map(|_| subject.subscribe(|_: &i32| {})).collect();
        assert_eq!(subject.subscriber_count(), 3);
        assert!(!joined.is_empty());
        drop(joined);
        assert_eq!(subject.subscriber_count(), 0);
    }

    #[test]
    fn debug_format() {
        let subject = Subject::behavior(42);
        let dbg = format!("{subject:?}");
        assert!(dbg.contains("Subject"));
        assert!(dbg.contains("42"));
    }
}
