#![forbid(unsafe_code)]

//! Read-only view of a [`Subject`].
//!
//! Widgets keep the `Subject` that feeds a stream and hand out an
//! [`Observable`] so that outside code can watch the stream but never push
//! into it.
//!
//! ```compile_fail
//! use mui_runtime::Subject;
//!
//! let subject = Subject::behavior(1);
//! subject.observable().emit(2);
//! ```

use std::fmt;

use super::subject::{Source, Subject, Subscription};

/// Subscribe-only handle to a subject's channel.
pub struct Observable<T> {
    subject: Subject<T>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Observable").field(&self.subject).finish()
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub(crate) fn new(subject: Subject<T>) -> Self {
        Self { subject }
    }

    /// Latest retained value, if the underlying subject retains one.
    #[must_use]
    pub fn value(&self) -> Option<T> {
        self.subject.value()
    }

    /// Observe values. Replays the current one if the subject retains it.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        self.subject.subscribe(observer)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subject.subscriber_count()
    }
}

impl<T: Clone + 'static> Source<T> for Observable<T> {
    fn subscribe_with(&self, observer: Box<dyn Fn(&T)>) -> Subscription {
        self.subject.subscribe(move |value: &T| observer(value))
    }
}

impl<T: Clone + 'static> Subject<T> {
    /// A handle that can watch this channel but not emit into it.
    #[must_use]
    pub fn observable(&self) -> Observable<T> {
        Observable::new(self.clone())
    }
}
