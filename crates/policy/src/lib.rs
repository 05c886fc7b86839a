//! Origin trust policy for embedded web content.
//!
//! Decides whether a permission requested by web content should be granted,
//! based on two pieces of data:
//!
//! - a set of permissions that are always allowed, whatever the origin, and
//! - a list of trusted domain suffixes that unlock everything else.
//!
//! The host consults two call sites with different allow-lists (see
//! [`CallSite`]), so a [`PermissionPolicy`] carries one [`AllowList`] per site
//! and a single evaluator serves both.
//!
//! # Example
//!
//! ```
//! use policy::{CallSite, PermissionKind, PermissionPolicy};
//!
//! let policy = PermissionPolicy::default();
//! assert!(policy.evaluate(CallSite::Check, &PermissionKind::Camera, "not a url"));
//! assert!(policy.evaluate(
//!     CallSite::Request,
//!     &PermissionKind::Geolocation,
//!     "https://teams.microsoft.com/v2/",
//! ));
//! assert!(!policy.evaluate(
//!     CallSite::Request,
//!     &PermissionKind::Geolocation,
//!     "https://example.com",
//! ));
//! ```

mod domain;
mod error;
mod origin;
mod permission;
mod policy;

pub use domain::DomainSuffix;
pub use error::{Error, Result};
pub use origin::{Origin, OriginDescriptor};
pub use permission::PermissionKind;
pub use policy::{AllowList, AllowReason, CallSite, Decision, DenyReason, PermissionPolicy};
