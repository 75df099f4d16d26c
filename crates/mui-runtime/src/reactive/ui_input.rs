#![forbid(unsafe_code)]

//! Widget-owned input ports.
//!
//! A widget keeps a [`UiInput<T>`] private and hands out [`InputWriter<T>`]
//! handles. Outside callers can only write; the widget subscribes to its own
//! port to react.
//!
//! ```ignore
//! use mui_runtime::reactive::UiInput;
//!
//! struct Spinner {
//!     loading: UiInput<bool>,
//!     _render: Subscription,
//! }
//!
//! let loading = UiInput::with_value(false);
//! let _render = loading.subscribe(|on| println!("spinner {on}"));
//! let writer = loading.writer();   // given to the presenter
//! writer.write(true);
//! ```
//!
//! # Modes
//!
//! - [`UiInput::new`]: stateless. A value reaches only subscribers that are
//!   subscribed when it is delivered.
//! - [`UiInput::with_value`]: stateful. The latest value is retained and
//!   delivered to every new subscriber right away.
//!
//! # Delivery
//!
//! Every write and every subscriber callback runs on a [`UiScheduler`] owned
//! by the port. Outside any delivery a write is observed synchronously,
//! before `write` returns. Writes made from inside a subscriber are queued
//! and delivered after the current delivery, so each subscriber sees values
//! in write order.
//!
//! # Failure Modes
//!
//! - **Terminal event bridged in**: [`UiInput::accept`] with
//!   [`StreamEvent::Error`] or [`StreamEvent::Completed`] logs and aborts the
//!   process. A port is plain state and cannot end.
//! - **Write after owner dropped**: silently ignored.

use std::fmt;
use std::rc::{Rc, Weak};

use mui_core::UiScheduler;
use mui_core::logging::{error, trace};

use super::event::StreamEvent;
use super::subject::{Source, Subject, Subscription};

struct Port<T> {
    subject: Subject<T>,
    scheduler: UiScheduler,
}

impl<T: Clone + 'static> Port<T> {
    fn write(this: &Rc<Self>, value: T) {
        let port = Rc::downgrade(this);
        this.scheduler.schedule(move || {
            if let Some(port) = port.upgrade() {
                trace!(message = "ui_input.emit", stateful = port.subject.is_stateful());
                port.subject.emit(value);
            }
        });
    }
}

/// A widget-owned reactive slot with a private UI scheduler.
pub struct UiInput<T> {
    port: Rc<Port<T>>,
}

impl<T: fmt::Debug> fmt::Debug for UiInput<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiInput")
            .field("subject", &self.port.subject)
            .field("scheduler", &self.port.scheduler)
            .finish()
    }
}

impl<T: Clone + 'static> Default for UiInput<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> UiInput<T> {
    fn from_subject(subject: Subject<T>) -> Self {
        Self {
            port: Rc::new(Port {
                subject,
                scheduler: UiScheduler::new(),
            }),
        }
    }

    /// Stateless port.
    #[must_use]
    pub fn new() -> Self {
        Self::from_subject(Subject::publish())
    }

    /// Stateful port holding `initial`.
    #[must_use]
    pub fn with_value(initial: T) -> Self {
        Self::from_subject(Subject::behavior(initial))
    }

    /// Whether the port retains its latest value.
    #[must_use]
    pub fn is_stateful(&self) -> bool {
        self.port.subject.is_stateful()
    }

    /// Latest value of a stateful port; `None` for a stateless one.
    #[must_use]
    pub fn value(&self) -> Option<T> {
        self.port.subject.value()
    }

    /// Deliver `value` to current subscribers.
    pub fn write(&self, value: T) {
        Port::write(&self.port, value);
    }

    /// Bridge one event of a fallible stream into the port.
    ///
    /// Aborts the process on `Error` or `Completed`.
    pub fn accept<E: fmt::Debug>(&self, event: StreamEvent<T, E>) {
        accept_into(Some(&self.port), event);
    }

    /// Write-only handle for outside callers.
    #[must_use]
    pub fn writer(&self) -> InputWriter<T> {
        InputWriter {
            port: Rc::downgrade(&self.port),
        }
    }

    /// Observe values on the port's scheduler.
    ///
    /// A stateful port delivers its current value before this returns.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        let observer: Rc<dyn Fn(&T)> = Rc::new(observer);
        let weak_observer = Rc::downgrade(&observer);
        let weak_port = Rc::downgrade(&self.port);
        let upstream = self.port.subject.subscribe(move |value: &T| {
            let Some(port) = weak_port.upgrade() else {
                return;
            };
            let observer = Weak::clone(&weak_observer);
            let value = value.clone();
            port.scheduler.schedule(move || {
                // Skip deliveries queued for an observer that unsubscribed.
                if let Some(observer) = observer.upgrade() {
                    observer(&value);
                }
            });
        });
        upstream.join(Subscription::holding(observer))
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.port.subject.subscriber_count()
    }
}

impl<T: Clone + 'static> Source<T> for UiInput<T> {
    fn subscribe_with(&self, observer: Box<dyn Fn(&T)>) -> Subscription {
        self.subscribe(move |value: &T| observer(value))
    }
}

/// The write-only face of a [`UiInput`].
///
/// Holds the port weakly: once the owning widget is gone, writes are no-ops.
pub struct InputWriter<T> {
    port: Weak<Port<T>>,
}

impl<T> Clone for InputWriter<T> {
    fn clone(&self) -> Self {
        Self {
            port: Weak::clone(&self.port),
        }
    }
}

impl<T> fmt::Debug for InputWriter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputWriter")
            .field("connected", &(self.port.strong_count() > 0))
            .finish()
    }
}

impl<T: Clone + 'static> InputWriter<T> {
    /// Deliver `value` to the port's subscribers.
    pub fn write(&self, value: T) {
        if let Some(port) = self.port.upgrade() {
            Port::write(&port, value);
        }
    }

    /// Bridge one event of a fallible stream into the port.
    ///
    /// Aborts the process on `Error` or `Completed`, even if the port is gone.
    pub fn accept<E: fmt::Debug>(&self, event: StreamEvent<T, E>) {
        let port = self.port.upgrade();
        accept_into(port.as_ref(), event);
    }

    /// Whether the owning port still exists.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.port.strong_count() > 0
    }
}

fn accept_into<T: Clone + 'static, E: fmt::Debug>(
    port: Option<&Rc<Port<T>>>,
    event: StreamEvent<T, E>,
) {
    match event {
        StreamEvent::Next(value) => {
            if let Some(port) = port {
                Port::write(port, value);
            }
        }
        StreamEvent::Error(err) => contract_violation(&format!("error bound to UiInput: {err:?}")),
        StreamEvent::Completed => contract_violation("completion bound to UiInput"),
    }
}

fn contract_violation(what: &str) -> ! {
    error!(message = "ui_input.violation", what);
    eprintln!("fatal: {what}");
    std::process::abort()
}
