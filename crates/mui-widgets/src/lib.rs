#![forbid(unsafe_code)]

//! Widgets: the attractor bouncer and the swipeable row built on it.
//!
//! - [`chooser`]: pure settle-target selection.
//! - [`elastic`]: drag resistance past the outermost attractors.
//! - [`config`]: [`BouncerConfig`] and its validation errors.
//! - [`bouncer`]: the pan-driven [`Bouncer`] state machine.
//! - [`swipe_row`]: [`SwipeRow`], a row that reveals trailing actions.

pub mod bouncer;
pub mod chooser;
pub mod config;
pub mod elastic;
pub mod swipe_row;

pub use bouncer::{Bouncer, BouncerPhase};
pub use chooser::{Attractor, FlickConfig, choose_attractor, nearest_attractor};
pub use config::{BouncerConfig, ConfigError};
pub use elastic::Elasticity;
pub use swipe_row::SwipeRow;
