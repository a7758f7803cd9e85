//! Observability for aerofilter
//!
//! Structured logging goes through `tracing`; the library never installs
//! a subscriber. Each record carries a typed [`Event`] in its `event` field.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on compilation
//! 3. Per-criterion detail at DEBUG, rejections at WARN

mod events;

pub use events::Event;

use crate::errors::FilterError;

/// Log a rejected compilation with its error code
pub fn log_rejection(stage: &str, err: &FilterError) {
    tracing::warn!(
        event = %Event::CompileRejected,
        stage,
        code = err.code(),
        "{}",
        err
    );
}
