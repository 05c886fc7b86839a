//! Display-capture source brokering.
//!
//! When embedded content calls `getDisplayMedia`, the host hands the request
//! to a [`Broker`]. The broker asks the [`CaptureHost`] for the current
//! screens and windows, presents them as a [`ChoiceMenu`], waits for the user
//! and settles on exactly one [`CaptureDecision`].
//!
//! Every failure (enumeration error, nothing to share, cancel, dismissal,
//! timeout) collapses to [`CaptureDecision::Denied`]. The reason is only
//! logged; [`Broker::select`] exposes it as a [`Denial`] for diagnostics.

mod broker;
mod error;
mod host;
mod menu;
mod source;

pub use broker::{Broker, BrokerConfig, CAPTURE_KINDS};
pub use error::{Denial, HostError};
pub use host::{CaptureHost, WindowId};
pub use menu::{CANCEL_LABEL, Choice, ChoiceMenu, MenuEntry};
pub use source::{
    AudioMode, CaptureDecision, CaptureRequest, CaptureSource, SourceKind, UNKNOWN_SOURCE_LABEL,
};
