//! Window, user agent and engine settings for the shell.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// An engine command-line switch, rendered as `--name[=value]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switch {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Switch {
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn to_arg(&self) -> String {
        match &self.value {
            Some(value) => format!("--{}={value}", self.name),
            None => format!("--{}", self.name),
        }
    }
}

/// Settings for the wrapped web application and its window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Page loaded into the main window; also defines the in-app origin.
    pub start_url: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: String,
    /// User agent presented to the web application.
    pub user_agent: String,
    pub tray_tooltip: String,
    pub switches: Vec<Switch>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            start_url: "https://teams.microsoft.com".to_string(),
            title: "Microsoft Teams".to_string(),
            width: 1200,
            height: 800,
            background_color: "#2b2b2b".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            tray_tooltip: "Microsoft Teams".to_string(),
            switches: default_switches(),
        }
    }
}

fn default_switches() -> Vec<Switch> {
    vec![
        Switch::with_value(
            "enable-features",
            "WebRTC-H264WithOpenH264FFmpeg,DesktopCaptureTimerRepo,\
             WebRTCPipeWireCapturer,WaylandWindowDecorations",
        ),
        Switch::with_value("ozone-platform-hint", "auto"),
        Switch::flag("enable-usermedia-screen-capturing"),
        Switch::with_value("enable-media-stream", "true"),
        // Avoids some GPU crashes without disabling acceleration.
        Switch::with_value("disable-features", "GpuProcessHighPriority"),
        Switch::flag("disable-gpu-memory-buffer-video-frames"),
        Switch::flag("disable-background-networking"),
        Switch::flag("disable-breakpad"),
        Switch::flag("disable-component-update"),
        Switch::flag("disable-domain-reliability"),
        Switch::flag("disable-sync"),
        Switch::with_value("memory-model", "low"),
    ]
}

impl ShellConfig {
    /// Parse and check the start URL.
    pub fn start_url(&self) -> Result<Url> {
        let url = Url::parse(&self.start_url).map_err(|e| Error::InvalidUrl {
            url: self.start_url.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(Error::InvalidUrl {
                url: self.start_url.clone(),
                reason: "start URL must be an absolute http(s) URL".to_string(),
            });
        }
        Ok(url)
    }

    /// Check the settings that can be wrong.
    pub fn validate(&self) -> Result<()> {
        self.start_url()?;
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if let Some(switch) = self.switches.iter().find(|s| s.name.trim().is_empty()) {
            return Err(Error::Config(format!("engine switch without a name: {switch:?}")));
        }
        Ok(())
    }

    /// Switches as command-line arguments, in order.
    pub fn engine_args(&self) -> Vec<String> {
        self.switches.iter().map(Switch::to_arg).collect()
    }
}
