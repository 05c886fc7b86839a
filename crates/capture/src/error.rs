//! Capture error types.

use std::time::Duration;
use thiserror::Error;

/// Failures reported by a [`CaptureHost`](crate::CaptureHost).
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HostError {
    /// The platform could not list capture sources.
    #[error("capture sources unavailable: {0}")]
    Unavailable(String),
}

/// Why a capture request ended up denied.
///
/// Callers of [`Broker::resolve`](crate::Broker::resolve) never see this; it
/// only feeds diagnostics.
#[derive(Debug, Error)]
pub enum Denial {
    #[error("failed to enumerate capture sources: {0}")]
    EnumerationFailed(#[source] HostError),

    #[error("no capture sources available")]
    NoSourcesAvailable,

    #[error("selection cancelled by user")]
    Cancelled,

    #[error("selection dismissed without a choice")]
    Dismissed,

    #[error("host returned unknown choice index {0}")]
    UnknownChoice(usize),

    #[error("request aborted by host")]
    Aborted,

    #[error("no selection within {0:?}")]
    TimedOut(Duration),
}
