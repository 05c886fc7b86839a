use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Capabilities that embedded content can ask for.
///
/// Names follow the host engine's permission strings (`pointerLock`,
/// `display-capture`, ...). Anything the shell does not know about is kept
/// verbatim in [`PermissionKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PermissionKind {
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
    Other(String),
}

impl PermissionKind {
    /// The engine's name for this permission.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Media => "media",
            Self::Geolocation => "geolocation",
            Self::Notifications => "notifications",
            Self::Midi => "midi",
            Self::Camera => "camera",
            Self::Microphone => "microphone",
            Self::Fullscreen => "fullscreen",
            Self::PointerLock => "pointerLock",
            Self::DisplayCapture => "display-capture",
            Self::WindowManagement => "window-management",
            Self::AudioCapture => "audio-capture",
            Self::MediaKeySystem => "mediaKeySystem",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for PermissionKind {
    fn from(name: &str) -> Self {
        match name {
            "media" => Self::Media,
            "geolocation" => Self::Geolocation,
            "notifications" => Self::Notifications,
            "midi" => Self::Midi,
            "camera" => Self::Camera,
            "microphone" => Self::Microphone,
            "fullscreen" => Self::Fullscreen,
            "pointerLock" => Self::PointerLock,
            "display-capture" => Self::DisplayCapture,
            "window-management" => Self::WindowManagement,
            "audio-capture" => Self::AudioCapture,
            "mediaKeySystem" => Self::MediaKeySystem,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for PermissionKind {
    fn from(name: String) -> Self {
        match Self::from(name.as_str()) {
            Self::Other(_) => Self::Other(name),
            known => known,
        }
    }
}

impl From<PermissionKind> for String {
    fn from(kind: PermissionKind) -> Self {
        match kind {
            PermissionKind::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for PermissionKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
