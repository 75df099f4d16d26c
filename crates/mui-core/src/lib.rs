#![forbid(unsafe_code)]

//! Core: geometry, gesture events, host-view seam, UI-thread scheduling and
//! tick-driven animation.

pub mod animation;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod logging;
pub mod scheduler;

pub use geometry::{Axis, Size, Vector};
pub use gesture::{PanEvent, PanPhase};
pub use host::{DetachedView, HostView};
pub use scheduler::UiScheduler;
