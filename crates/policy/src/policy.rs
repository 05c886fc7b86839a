//! Allow-lists and the evaluator shared by both permission call sites.

use crate::{DomainSuffix, Error, Origin, PermissionKind, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Domains whose content is trusted with any permission.
const TRUSTED_SUFFIXES: &[&str] = &[
    ".microsoft.com",
    ".teams.microsoft.com",
    ".live.com",
    ".microsoftonline.com",
    ".skype.com",
];

/// Where a permission query comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallSite {
    /// Synchronous capability query; never prompts.
    Check,
    /// Active request that may prompt; answered through a callback.
    Request,
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Check => f.write_str("check"),
            Self::Request => f.write_str("request"),
        }
    }
}

/// Permissions granted unconditionally plus the trusted domain suffixes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowList {
    /// Granted to any origin, including malformed ones.
    #[serde(default)]
    pub always_allowed: Vec<PermissionKind>,

    /// Hosts under these suffixes are granted every permission.
    #[serde(default)]
    pub trusted_domains: Vec<DomainSuffix>,
}

/// Why a permission was granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowReason {
    AlwaysAllowed,
    TrustedDomain { suffix: String },
}

/// Why a permission was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// The origin could not be parsed as a URL.
    InvalidOrigin,
    /// The origin parsed but its host is not under a trusted suffix.
    UntrustedHost { host: String },
}

/// Result of a permission evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow { reason: AllowReason },
    Deny { reason: DenyReason },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow { .. })
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allow {
                reason: AllowReason::AlwaysAllowed,
            } => f.write_str("allowed (always-allowed permission)"),
            Decision::Allow {
                reason: AllowReason::TrustedDomain { suffix },
            } => write!(f, "allowed (trusted domain {suffix})"),
            Decision::Deny {
                reason: DenyReason::InvalidOrigin,
            } => f.write_str("denied (unparsable origin)"),
            Decision::Deny {
                reason: DenyReason::UntrustedHost { host },
            } if host.is_empty() => f.write_str("denied (origin has no host)"),
            Decision::Deny {
                reason: DenyReason::UntrustedHost { host },
            } => write!(f, "denied (untrusted host {host})"),
        }
    }
}

impl AllowList {
    /// Defaults for the synchronous check call site.
    pub fn check_defaults() -> Self {
        use PermissionKind::*;
        Self::with_trusted_defaults(vec![
            Media,
            Geolocation,
            Notifications,
            Midi,
            Camera,
            Microphone,
            Fullscreen,
            PointerLock,
            DisplayCapture,
            WindowManagement,
            AudioCapture,
            MediaKeySystem,
        ])
    }

    /// Defaults for the request call site.
    ///
    /// Narrower than [`AllowList::check_defaults`]: geolocation, fullscreen
    /// and pointer lock need a trusted origin here.
    pub fn request_defaults() -> Self {
        use PermissionKind::*;
        Self::with_trusted_defaults(vec![
            Media,
            Camera,
            Microphone,
            DisplayCapture,
            Notifications,
            WindowManagement,
            AudioCapture,
            MediaKeySystem,
        ])
    }

    fn with_trusted_defaults(always_allowed: Vec<PermissionKind>) -> Self {
        let trusted_domains = TRUSTED_SUFFIXES
            .iter()
            .map(|s| DomainSuffix(s.to_string()))
            .collect();
        Self {
            always_allowed,
            trusted_domains,
        }
    }

    pub fn is_always_allowed(&self, permission: &PermissionKind) -> bool {
        self.always_allowed.contains(permission)
    }

    /// The first trusted suffix covering `host`.
    pub fn trusted_suffix(&self, host: &str) -> Option<&DomainSuffix> {
        if host.is_empty() {
            return None;
        }
        self.trusted_domains.iter().find(|s| s.matches(host))
    }

    /// Evaluate `permission` for the raw origin string.
    pub fn decide(&self, permission: &PermissionKind, origin_raw: &str) -> Decision {
        if self.is_always_allowed(permission) {
            return Decision::Allow {
                reason: AllowReason::AlwaysAllowed,
            };
        }

        let origin = Origin::parse(origin_raw);
        let Some(host) = origin.host() else {
            return Decision::Deny {
                reason: DenyReason::InvalidOrigin,
            };
        };

        match self.trusted_suffix(host) {
            Some(suffix) => Decision::Allow {
                reason: AllowReason::TrustedDomain {
                    suffix: suffix.to_string(),
                },
            },
            None => Decision::Deny {
                reason: DenyReason::UntrustedHost {
                    host: host.to_string(),
                },
            },
        }
    }

    pub fn evaluate(&self, permission: &PermissionKind, origin_raw: &str) -> bool {
        self.decide(permission, origin_raw).is_allowed()
    }
}

/// One allow-list per call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionPolicy {
    #[serde(default = "AllowList::check_defaults")]
    pub check: AllowList,

    #[serde(default = "AllowList::request_defaults")]
    pub request: AllowList,
}

impl Default for PermissionPolicy {
    fn default() -> Self {
        Self {
            check: AllowList::check_defaults(),
            request: AllowList::request_defaults(),
        }
    }
}

impl PermissionPolicy {
    /// Load policy from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse policy from TOML string.
    pub fn parse(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| Error::Parse(e.to_string()))
    }

    pub fn allow_list(&self, site: CallSite) -> &AllowList {
        match site {
            CallSite::Check => &self.check,
            CallSite::Request => &self.request,
        }
    }

    /// Evaluate a permission at `site`, logging the outcome.
    pub fn decide(&self, site: CallSite, permission: &PermissionKind, origin_raw: &str) -> Decision {
        let decision = self.allow_list(site).decide(permission, origin_raw);
        debug!(
            %site,
            %permission,
            origin = origin_raw,
            %decision,
            "permission evaluated"
        );
        decision
    }

    pub fn evaluate(&self, site: CallSite, permission: &PermissionKind, origin_raw: &str) -> bool {
        self.decide(site, permission, origin_raw).is_allowed()
    }
}
