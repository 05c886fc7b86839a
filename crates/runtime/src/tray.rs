//! Tray icon menu and click handling.

use crate::WindowLifecycle;

/// Actions offered by the tray context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    ShowApp,
    Quit,
}

/// A tray context menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayMenuItem {
    pub label: String,
    pub action: TrayAction,
}

/// What the host should do in response to a tray interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayEffect {
    ShowWindow,
    HideWindow,
    QuitApp,
}

/// The tray icon's tooltip and context menu.
#[derive(Debug, Clone)]
pub struct Tray {
    tooltip: String,
    items: Vec<TrayMenuItem>,
}

impl Tray {
    pub fn new(tooltip: impl Into<String>) -> Self {
        Self {
            tooltip: tooltip.into(),
            items: vec![
                TrayMenuItem {
                    label: "Show App".into(),
                    action: TrayAction::ShowApp,
                },
                TrayMenuItem {
                    label: "Quit".into(),
                    action: TrayAction::Quit,
                },
            ],
        }
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    pub fn menu(&self) -> &[TrayMenuItem] {
        &self.items
    }

    /// Primary click on the icon toggles the main window.
    pub fn click(&self, window: &mut WindowLifecycle) -> TrayEffect {
        if window.toggle_visibility() {
            TrayEffect::ShowWindow
        } else {
            TrayEffect::HideWindow
        }
    }

    pub fn activate(&self, action: TrayAction, window: &mut WindowLifecycle) -> TrayEffect {
        match action {
            TrayAction::ShowApp => {
                window.show();
                TrayEffect::ShowWindow
            }
            TrayAction::Quit => {
                window.request_quit();
                TrayEffect::QuitApp
            }
        }
    }
}
