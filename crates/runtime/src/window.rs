//! Main window visibility and the close-to-tray rule.

use tracing::debug;

/// What the host should do with a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    /// Keep running in the tray; hide the window.
    HideToTray,
    /// Let the window close.
    Close,
}

/// Visibility and quit state of the main window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowLifecycle {
    visible: bool,
    quitting: bool,
}

impl Default for WindowLifecycle {
    fn default() -> Self {
        Self {
            visible: true,
            quitting: false,
        }
    }
}

impl WindowLifecycle {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Flip visibility, returning the new state.
    pub fn toggle_visibility(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Mark the application as quitting so the next close goes through.
    pub fn request_quit(&mut self) {
        self.quitting = true;
    }

    pub fn on_close_requested(&mut self) -> CloseAction {
        if self.quitting {
            debug!("closing main window");
            CloseAction::Close
        } else {
            debug!("hiding main window to tray");
            self.visible = false;
            CloseAction::HideToTray
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_hides_until_quit() {
        let mut window = WindowLifecycle::default();
        assert_eq!(window.on_close_requested(), CloseAction::HideToTray);
        assert!(!window.is_visible());

        window.show();
        window.request_quit();
        assert_eq!(window.on_close_requested(), CloseAction::Close);
    }

    #[test]
    fn toggle_flips_visibility() {
        let mut window = WindowLifecycle::default();
        assert!(!window.toggle_visibility());
        assert!(window.toggle_visibility());
        assert!(window.is_visible());
    }
}
