//! Handling of links that try to open a new window.

use tracing::debug;
use url::{Origin, Url};

use crate::{Result, ShellConfig};

/// Schemes that may be handed to the system's default handler.
const EXTERNAL_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// What to do with a new-window request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowOpenAction {
    /// Open inside the shell.
    Allow,
    /// Refuse in-app and open with the system's default handler.
    OpenExternally(Url),
    /// Refuse outright.
    Deny,
}

/// Keeps the wrapped application's own pages in-app and sends everything
/// else to the system browser.
#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    home: Origin,
}

impl NavigationPolicy {
    pub fn new(start_url: &Url) -> Self {
        Self {
            home: start_url.origin(),
        }
    }

    pub fn from_config(config: &ShellConfig) -> Result<Self> {
        Ok(Self::new(&config.start_url()?))
    }

    /// Decide on a `window.open` or `target=_blank` navigation.
    pub fn window_open(&self, url: &str) -> WindowOpenAction {
        let action = match Url::parse(url) {
            Ok(parsed) if parsed.origin() == self.home => WindowOpenAction::Allow,
            Ok(parsed) if EXTERNAL_SCHEMES.contains(&parsed.scheme()) => {
                WindowOpenAction::OpenExternally(parsed)
            }
            _ => WindowOpenAction::Deny,
        };
        debug!(url, ?action, "window open");
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> NavigationPolicy {
        NavigationPolicy::from_config(&ShellConfig::default()).unwrap()
    }

    #[test]
    fn same_origin_stays_in_app() {
        assert_eq!(
            policy().window_open("https://teams.microsoft.com/l/meetup-join/abc"),
            WindowOpenAction::Allow
        );
    }

    #[test]
    fn lookalike_host_goes_external() {
        let action = policy().window_open("https://teams.microsoft.com.evil.test/login");
        assert!(matches!(action, WindowOpenAction::OpenExternally(_)));
    }

    #[test]
    fn other_sites_open_externally() {
        let WindowOpenAction::OpenExternally(url) = policy().window_open("https://example.com/doc")
        else {
            panic!("expected external open");
        };
        assert_eq!(url.as_str(), "https://example.com/doc");

        assert!(matches!(
            policy().window_open("mailto:someone@example.com"),
            WindowOpenAction::OpenExternally(_)
        ));
    }

    #[test]
    fn plain_http_is_a_different_origin() {
        assert!(matches!(
            policy().window_open("http://teams.microsoft.com/"),
            WindowOpenAction::OpenExternally(_)
        ));
    }

    #[test]
    fn unparsable_or_local_urls_are_denied() {
        for url in ["", "not a url", "file:///etc/passwd", "javascript:alert(1)", "data:text/html,hi"] {
            assert_eq!(policy().window_open(url), WindowOpenAction::Deny, "{url}");
        }
    }
}
