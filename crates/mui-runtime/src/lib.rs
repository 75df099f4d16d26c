#![forbid(unsafe_code)]

//! Runtime: reactive subjects and UI input ports.

pub mod reactive;

pub use reactive::{
    CombineLatest, InputWriter, Observable, Source, StreamEvent, Subject, Subscription, UiInput,
    combine_latest,
};
