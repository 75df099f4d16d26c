#![forbid(unsafe_code)]

//! Mobecan UI public facade crate.
//!
//! Re-exports the core, runtime and widget crates behind one dependency.

pub use mui_core as core;
pub use mui_runtime as runtime;
pub use mui_widgets as widgets;

pub mod prelude {
    pub use mui_core::animation::{Animation, Easing, Tween};
    pub use mui_core::{Axis, DetachedView, HostView, PanEvent, PanPhase, Size, Vector};
    pub use mui_runtime::{
        InputWriter, Observable, Source, StreamEvent, Subject, Subscription, UiInput, combine_latest,
    };
    pub use mui_widgets::{
        Bouncer, BouncerConfig, BouncerPhase, ConfigError, Elasticity, FlickConfig, SwipeRow,
    };
}
