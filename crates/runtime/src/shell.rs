//! One wrapped application window and its handlers.

use capture::{Broker, CaptureHost, CaptureRequest};
use policy::PermissionPolicy;
use tracing::info;

use crate::{
    CloseAction, DisplayMediaHandler, DisplayMediaResponder, NavigationPolicy, PendingCapture,
    PermissionHandlers, Result, ShellConfig, Tray, TrayAction, TrayEffect, WindowLifecycle,
    WindowOpenAction,
};

/// Everything the host needs to drive the main window.
pub struct Shell<H> {
    config: ShellConfig,
    permissions: PermissionHandlers,
    display_media: DisplayMediaHandler<H>,
    navigation: NavigationPolicy,
    window: WindowLifecycle,
    tray: Tray,
}

impl<H: CaptureHost + 'static> Shell<H> {
    /// Create a shell from validated configuration.
    pub fn new(config: ShellConfig, policy: PermissionPolicy, broker: Broker<H>) -> Result<Self> {
        config.validate()?;
        let navigation = NavigationPolicy::from_config(&config)?;
        let tray = Tray::new(config.tray_tooltip.clone());
        info!(start_url = %config.start_url, title = %config.title, "shell configured");

        Ok(Self {
            config,
            permissions: PermissionHandlers::new(policy),
            display_media: DisplayMediaHandler::new(broker),
            navigation,
            window: WindowLifecycle::default(),
            tray,
        })
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn permissions(&self) -> &PermissionHandlers {
        &self.permissions
    }

    pub fn display_media(&self) -> &DisplayMediaHandler<H> {
        &self.display_media
    }

    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    pub fn window(&self) -> &WindowLifecycle {
        &self.window
    }

    /// Forward a `getDisplayMedia` request to the broker.
    pub fn on_display_media_request(
        &self,
        request: CaptureRequest,
        responder: DisplayMediaResponder,
    ) -> PendingCapture {
        self.display_media.handle(request, responder)
    }

    pub fn on_window_open(&self, url: &str) -> WindowOpenAction {
        self.navigation.window_open(url)
    }

    pub fn on_close_requested(&mut self) -> CloseAction {
        let action = self.window.on_close_requested();
        if action == CloseAction::Close {
            self.display_media.shutdown();
        }
        action
    }

    pub fn on_tray_click(&mut self) -> TrayEffect {
        self.tray.click(&mut self.window)
    }

    pub fn on_tray_action(&mut self, action: TrayAction) -> TrayEffect {
        self.tray.activate(action, &mut self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capture::{CaptureSource, Choice, ChoiceMenu, HostError, SourceKind, WindowId};
    use policy::PermissionKind;
    use std::sync::Arc;

    struct NoSources;

    impl CaptureHost for NoSources {
        async fn enumerate_sources(
            &self,
            _kinds: &[SourceKind],
        ) -> std::result::Result<Vec<CaptureSource>, HostError> {
            Ok(Vec::new())
        }

        async fn present_choice(&self, _anchor: WindowId, _menu: &ChoiceMenu) -> Option<Choice> {
            None
        }
    }

    fn shell() -> Shell<NoSources> {
        let broker = Broker::new(Arc::new(NoSources), WindowId(1));
        Shell::new(ShellConfig::default(), PermissionPolicy::default(), broker).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let config = ShellConfig {
            start_url: "teams".into(),
            ..ShellConfig::default()
        };
        let broker = Broker::new(Arc::new(NoSources), WindowId(1));
        assert!(Shell::new(config, PermissionPolicy::default(), broker).is_err());
    }

    #[test]
    fn routes_permission_hooks() {
        let shell = shell();
        assert!(
            shell
                .permissions()
                .check_permission(&PermissionKind::Geolocation, "https://example.com")
        );
        assert!(
            !shell
                .permissions()
                .decide_request(&PermissionKind::Geolocation, "https://example.com")
        );
    }

    #[tokio::test]
    async fn routes_display_media_requests() {
        let shell = shell();
        let (responder, rx) = DisplayMediaResponder::channel();
        shell.on_display_media_request(CaptureRequest::new(true, true), responder);
        assert!(rx.await.unwrap().is_denied());
    }

    #[test]
    fn tray_quit_then_close() {
        let mut shell = shell();
        assert_eq!(shell.on_close_requested(), CloseAction::HideToTray);
        assert_eq!(shell.on_tray_click(), TrayEffect::ShowWindow);
        assert_eq!(shell.on_tray_action(TrayAction::Quit), TrayEffect::QuitApp);
        assert_eq!(shell.on_close_requested(), CloseAction::Close);
    }

    #[test]
    fn routes_window_open() {
        let shell = shell();
        assert_eq!(
            shell.on_window_open("https://teams.microsoft.com/"),
            WindowOpenAction::Allow
        );
    }
}
