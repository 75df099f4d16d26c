//! Logging shims.
//!
//! With the `tracing` feature the macros here are the `tracing` macros. Without
//! it they expand to nothing, so call sites never need their own `cfg` gates:
//!
//! ```ignore
//! use mui_core::logging::debug;
//!
//! debug!(message = "bouncer.pan_ignored", phase = ?event.phase);
//! ```

#[cfg(feature = "tracing")]
pub use tracing::{debug, error, info, trace, warn};

#[doc(hidden)]
#[macro_export]
macro_rules! __mui_log_noop {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
pub use crate::__mui_log_noop as debug;
#[cfg(not(feature = "tracing"))]
pub use crate::__mui_log_noop as error;
#[cfg(not(feature = "tracing"))]
pub use crate::__mui_log_noop as info;
#[cfg(not(feature = "tracing"))]
pub use crate::__mui_log_noop as trace;
#[cfg(not(feature = "tracing"))]
pub use crate::__mui_log_noop as warn;

/// Environment variable holding the `EnvFilter` directives for [`init_json`].
#[cfg(feature = "tracing-json")]
pub const LOG_ENV: &str = "MUI_LOG";

/// Install a global JSON subscriber filtered by `MUI_LOG` (default `info`).
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init()
        .is_ok()
}
