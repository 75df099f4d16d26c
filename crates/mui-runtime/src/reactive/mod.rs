#![forbid(unsafe_code)]

//! Reactive data bindings for Mobecan UI.
//!
//! This module provides value-only push primitives for widget state:
//!
//! - [`Subject`]: a multicast channel of plain values. It has no error or
//!   completion variant, so a subject can never terminate.
//! - [`Observable`]: subscribe-only view of a subject, handed out by
//!   widgets for their output streams.
//! - [`Subscription`]: RAII guard that automatically unsubscribes on drop.
//! - [`UiInput`]: a widget-owned port with a narrow write-only companion,
//!   [`InputWriter`], for outside callers. Deliveries go through a
//!   [`UiScheduler`](mui_core::UiScheduler) private to the port.
//! - [`StreamEvent`]: the event type of *fallible* upstream streams. Only
//!   used to bridge such a stream into a port, where a terminal event is a
//!   fatal contract violation.
//! - [`combine_latest`]: derive a value from the latest of two sources.
//!
//! # Architecture
//!
//! `Subject<T>` uses `Rc<RefCell<..>>` for single-threaded shared ownership,
//! which also keeps every subject on the UI thread that created it.
//! Subscribers are stored as `Weak` function pointers and cleaned up lazily
//! during emission.
//!
//! # Invariants
//!
//! 1. Subscribers are notified in registration order.
//! 2. A retaining subject replays its latest value to each new subscriber,
//!    synchronously, inside `subscribe`.
//! 3. Every emitted value reaches every live subscriber; nothing is
//!    coalesced, deduplicated or dropped.
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    emission.
//! 5. Within one `UiInput`, each subscriber observes values in write order,
//!    including writes issued re-entrantly from a subscriber.

pub mod combine;
pub mod event;
pub mod observable;
pub mod subject;
pub mod ui_input;

pub use combine::{CombineLatest, combine_latest};
pub use event::StreamEvent;
pub use observable::Observable;
pub use subject::{Source, Subject, Subscription, WeakSubject};
pub use ui_input::{InputWriter, UiInput};
