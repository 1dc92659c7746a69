//! Zero-cost logging helpers.
//!
//! With the `tracing` feature enabled these macros forward to the `tracing`
//! crate. Without it (the default) they expand to nothing, so the rewrite
//! loop pays nothing for its log statements.
//!
//! # Usage
//!
//! ```bash
//! # Plain build, no logging
//! cargo build --release
//!
//! # Tests with logging
//! cargo test --features tracing
//!
//! # Watch every write of the demo binary
//! RUST_LOG=renumber::rewrite=trace cargo run --features tracing -- 8 7 3 6 2 1 4
//! ```
//!
//! Stage functions are instrumented with
//! `#[cfg_attr(feature = "tracing", tracing::instrument(...))]`, which is
//! likewise a no-op without the feature.

#![allow(unused_macros, unused_imports)]

/// Trace-level logging. Used for individual element writes.
#[cfg(feature = "tracing")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

/// Debug-level logging. Used for per-stage and per-cycle summaries.
#[cfg(feature = "tracing")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

/// Warn-level logging. Used when a caller breaks the input contract.
#[cfg(feature = "tracing")]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        tracing::warn!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! warn_log {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_log;
pub(crate) use trace_log;
pub(crate) use warn_log;
