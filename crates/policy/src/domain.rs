//! Trusted domain suffixes.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A domain suffix that marks hosts as trusted.
///
/// - `.microsoft.com` matches any host ending in `.microsoft.com`, but not the
///   apex `microsoft.com` itself.
/// - `microsoft.com` matches the apex and any subdomain of it.
///
/// Either way, matching happens on a label boundary: `notmicrosoft.com` never
/// matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainSuffix(pub(crate) String);

impl DomainSuffix {
    pub fn new(suffix: impl Into<String>) -> Result<Self> {
        let suffix: String = suffix.into();
        let suffix = suffix.trim().to_ascii_lowercase();
        let labels = suffix.strip_prefix('.').unwrap_or(&suffix);

        if labels.is_empty() {
            return Err(Error::Invalid("empty domain suffix".to_string()));
        }
        if labels.split('.').any(str::is_empty) {
            return Err(Error::Invalid(format!("empty label in domain suffix: {suffix}")));
        }
        if labels
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | ':' | '@' | '*'))
        {
            return Err(Error::Invalid(format!("not a domain suffix: {suffix}")));
        }

        Ok(Self(suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `host` falls under this suffix.
    pub fn matches(&self, host: &str) -> bool {
        let host = host.as_bytes();
        let suffix = self.0.as_bytes();

        if host.len() < suffix.len() {
            return false;
        }
        let (head, tail) = host.split_at(host.len() - suffix.len());
        if !tail.eq_ignore_ascii_case(suffix) {
            return false;
        }

        if self.0.starts_with('.') {
            !head.is_empty()
        } else {
            head.is_empty() || head.ends_with(b".")
        }
    }
}

impl TryFrom<String> for DomainSuffix {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<DomainSuffix> for String {
    fn from(suffix: DomainSuffix) -> Self {
        suffix.0
    }
}

impl fmt::Display for DomainSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
