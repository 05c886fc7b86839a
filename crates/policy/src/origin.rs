//! Parsed request origins.

use url::Url;

/// The parts of a request origin the evaluator looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginDescriptor {
    pub scheme: String,
    /// Lower-cased hostname; empty for URLs without a host (`file:`, `data:`).
    pub host: String,
    pub raw: String,
}

/// A request origin, either parsed or recognised as unparsable.
///
/// An unparsable origin is not an error: it simply never matches a trusted
/// domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Valid(OriginDescriptor),
    Invalid { raw: String },
}

impl Origin {
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) => Self::Valid(OriginDescriptor {
                scheme: url.scheme().to_string(),
                host: url.host_str().unwrap_or_default().to_ascii_lowercase(),
                raw: raw.to_string(),
            }),
            Err(_) => Self::Invalid {
                raw: raw.to_string(),
            },
        }
    }

    /// Hostname of a valid origin.
    pub fn host(&self) -> Option<&str> {
        match self {
            Self::Valid(descriptor) => Some(&descriptor.host),
            Self::Invalid { .. } => None,
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            Self::Valid(descriptor) => &descriptor.raw,
            Self::Invalid { raw } => raw,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}
