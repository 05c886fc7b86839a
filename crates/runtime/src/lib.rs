//! Webshell runtime: the glue between a host window and the decision core.
//!
//! The host windowing toolkit calls into this crate at its extension points:
//!
//! - **Permission checks and requests** go to [`PermissionHandlers`], which
//!   evaluates them against the per-call-site allow-lists of a
//!   [`policy::PermissionPolicy`].
//! - **Display-media requests** go to [`DisplayMediaHandler`], which runs a
//!   [`capture::Broker`] on a background task and answers through a
//!   [`Responder`] that accepts only the first decision.
//! - **New-window requests** go to [`NavigationPolicy`].
//! - **Close and tray events** update an explicit [`WindowLifecycle`].
//!
//! [`Shell`] bundles all of these for one window.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use capture::{Broker, WindowId};
//! use policy::PermissionPolicy;
//! use runtime::{Shell, ShellConfig};
//!
//! # async fn example(host: Arc<impl capture::CaptureHost + 'static>) -> runtime::Result<()> {
//! let broker = Broker::new(host, WindowId(1));
//! let shell = Shell::new(ShellConfig::default(), PermissionPolicy::default(), broker)?;
//! assert!(shell.permissions().check_permission(&"camera".into(), "https://teams.microsoft.com"));
//! # Ok(())
//! # }
//! ```

mod config;
mod display_media;
mod error;
mod navigation;
mod permissions;
mod responder;
mod shell;
mod tray;
mod window;

pub use config::{ShellConfig, Switch};
pub use display_media::{DisplayMediaHandler, DisplayMediaResponder, PendingCapture};
pub use error::{Error, Result};
pub use navigation::{NavigationPolicy, WindowOpenAction};
pub use permissions::{PermissionHandlers, PermissionResponder};
pub use responder::Responder;
pub use shell::Shell;
pub use tray::{Tray, TrayAction, TrayEffect, TrayMenuItem};
pub use window::{CloseAction, WindowLifecycle};
