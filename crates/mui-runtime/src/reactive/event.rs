#![forbid(unsafe_code)]

//! Events of a fallible upstream stream.

/// One event of a stream that may fail or finish.
///
/// [`Subject`](super::Subject) never produces these; they only describe
/// foreign streams bound into a [`UiInput`](super::UiInput).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent<T, E> {
    Next(T),
    Error(E),
    Completed,
}

impl<T, E> StreamEvent<T, E> {
    /// Whether the event ends the stream.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Next(_))
    }

    /// The carried value, if any.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Next(value) => Some(value),
            Self::Error(_) | Self::Completed => None,
        }
    }
}

impl<T, E> From<Result<T, E>> for StreamEvent<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Next(value),
            Err(error) => Self::Error(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_classification() {
        assert!(!StreamEvent::<u8, ()>::Next(1).is_terminal());
        assert!(StreamEvent::<u8, ()>::Error(()).is_terminal());
        assert!(StreamEvent::<u8, ()>::Completed.is_terminal());
    }

    #[test]
    fn from_result() {
        let ok: StreamEvent<i32, &str> = Ok(3).into();
        let err: StreamEvent<i32, &str> = Err("boom").into();
        assert_eq!(ok.into_value(), Some(3));
        assert_eq!(err, StreamEvent::Error("boom"));
    }
}
