//! Host environment boundary.

use crate::{CaptureSource, Choice, ChoiceMenu, HostError, SourceKind};
use std::fmt;
use std::future::Future;

/// Identifies the host window a picker should be anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Trait for the windowing environment the broker runs in.
///
/// Both operations are asynchronous so the host's event loop keeps running
/// while the platform enumerates sources or the user looks at the picker.
pub trait CaptureHost: Send + Sync {
    /// List the sources of the given kinds that can be captured right now.
    fn enumerate_sources(
        &self,
        kinds: &[SourceKind],
    ) -> impl Future<Output = Result<Vec<CaptureSource>, HostError>> + Send;

    /// Show `menu` anchored to `anchor` and wait for the user.
    ///
    /// Resolves to `None` when the picker is closed without a selection.
    fn present_choice(
        &self,
        anchor: WindowId,
        menu: &ChoiceMenu,
    ) -> impl Future<Output = Option<Choice>> + Send;
}
