#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! With the `tracing` feature the usual macros are re-exported from `tracing`.
//! Without it, no-op macros with the same names keep call sites compiling, so
//! dependent crates can write `clif_core::debug!(...)` unconditionally.
//!
//! The `tracing-subscriber` feature adds [`init`], which binaries call once to
//! route events to stderr, filtered by the `CLIF_LOG` environment variable
//! (same syntax as `RUST_LOG`).

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, trace, warn};

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "CLIF_LOG";

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op debug_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// No-op error macro when tracing is disabled.
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }

    /// No-op info macro when tracing is disabled.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op warn macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}

/// Span stand-in used by `debug_span!` when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the span (does nothing).
    pub fn entered(self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard returned by [`NoopSpan::entered`].
#[cfg(not(feature = "tracing"))]
pub struct NoopGuard;

/// Install a stderr subscriber filtered by [`LOG_ENV`].
///
/// Defaults to `warn` when the variable is unset or unparsable. Calling this
/// twice is harmless: the second installation attempt is ignored.
#[cfg(feature = "tracing-subscriber")]
pub fn init() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
