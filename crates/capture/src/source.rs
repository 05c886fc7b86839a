use serde::{Deserialize, Serialize};

/// Label used for sources the platform did not name.
pub const UNKNOWN_SOURCE_LABEL: &str = "Unknown Source";

/// What a capture source covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Screen,
    Window,
}

/// A screen or window that can be shared.
///
/// Ids are only meaningful for the enumeration that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSource {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub kind: SourceKind,
}

impl CaptureSource {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    pub fn screen(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, SourceKind::Screen)
    }

    pub fn window(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, SourceKind::Window)
    }

    /// Text shown for this source in the picker.
    pub fn label(&self) -> &str {
        if self.name.trim().is_empty() {
            UNKNOWN_SOURCE_LABEL
        } else {
            &self.name
        }
    }
}

/// Flags from a pending `getDisplayMedia` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureRequest {
    pub video_requested: bool,
    pub audio_requested: bool,
}

impl CaptureRequest {
    pub fn new(video_requested: bool, audio_requested: bool) -> Self {
        Self {
            video_requested,
            audio_requested,
        }
    }
}

/// Audio captured alongside the chosen source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioMode {
    /// System audio is looped back into the stream.
    Loopback,
    None,
}

impl AudioMode {
    pub fn for_request(request: &CaptureRequest) -> Self {
        if request.audio_requested {
            AudioMode::Loopback
        } else {
            AudioMode::None
        }
    }
}

/// Final answer to a capture request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaptureDecision {
    Selected { source: CaptureSource, audio: AudioMode },
    Denied,
}

impl CaptureDecision {
    pub fn is_denied(&self) -> bool {
        matches!(self, CaptureDecision::Denied)
    }

    pub fn source(&self) -> Option<&CaptureSource> {
        match self {
            CaptureDecision::Selected { source, .. } => Some(source),
            CaptureDecision::Denied => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_use_placeholder() {
        assert_eq!(CaptureSource::window("w:1", "").label(), UNKNOWN_SOURCE_LABEL);
        assert_eq!(CaptureSource::window("w:2", "   ").label(), UNKNOWN_SOURCE_LABEL);
        assert_eq!(CaptureSource::screen("s:1", "Screen 1").label(), "Screen 1");
    }

    #[test]
    fn audio_follows_request_flag() {
        assert_eq!(
            AudioMode::for_request(&CaptureRequest::new(true, true)),
            AudioMode::Loopback
        );
        assert_eq!(
            AudioMode::for_request(&CaptureRequest::new(true, false)),
            AudioMode::None
        );
    }

    #[test]
    fn denied_has_no_source() {
        assert!(CaptureDecision::Denied.is_denied());
        assert!(CaptureDecision::Denied.source().is_none());
    }
}
