//! Capture request resolution.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::{
    AudioMode, CaptureDecision, CaptureHost, CaptureRequest, CaptureSource, Choice, ChoiceMenu,
    Denial, SourceKind, WindowId,
};

/// Source kinds offered for display capture.
pub const CAPTURE_KINDS: [SourceKind; 2] = [SourceKind::Screen, SourceKind::Window];

/// Broker tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrokerConfig {
    /// Deny if the user has not picked anything by then. `None` waits forever.
    pub selection_timeout: Option<Duration>,
}

/// Resolves display-capture requests against a [`CaptureHost`].
pub struct Broker<H> {
    host: Arc<H>,
    anchor: WindowId,
    config: BrokerConfig,
}

impl<H> Clone for Broker<H> {
    fn clone(&self) -> Self {
        Self {
            host: Arc::clone(&self.host),
            anchor: self.anchor,
            config: self.config,
        }
    }
}

impl<H: CaptureHost> Broker<H> {
    /// Create a broker whose picker is anchored to `anchor`.
    pub fn new(host: Arc<H>, anchor: WindowId) -> Self {
        Self {
            host,
            anchor,
            config: BrokerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BrokerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Resolve a capture request. Always yields exactly one decision.
    pub async fn resolve(&self, request: &CaptureRequest) -> CaptureDecision {
        self.resolve_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Like [`Broker::resolve`], but denies as soon as `cancel` fires.
    pub async fn resolve_with_cancel(
        &self,
        request: &CaptureRequest,
        cancel: &CancellationToken,
    ) -> CaptureDecision {
        debug!(
            video = request.video_requested,
            audio = request.audio_requested,
            anchor = %self.anchor,
            "resolving display capture request"
        );

        match self.select(cancel).await {
            Ok(source) => {
                let audio = AudioMode::for_request(request);
                info!(id = %source.id, name = %source.name, ?audio, "capture source selected");
                CaptureDecision::Selected { source, audio }
            }
            Err(denial) => {
                match &denial {
                    Denial::EnumerationFailed(_) => error!(error = %denial, "capture denied"),
                    Denial::NoSourcesAvailable | Denial::UnknownChoice(_) => {
                        warn!(reason = %denial, "capture denied")
                    }
                    _ => info!(reason = %denial, "capture denied"),
                }
                CaptureDecision::Denied
            }
        }
    }

    /// Enumerate, present and wait, reporting why nothing was selected.
    pub async fn select(&self, cancel: &CancellationToken) -> Result<CaptureSource, Denial> {
        let sources = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Denial::Aborted),
            result = self.host.enumerate_sources(&CAPTURE_KINDS) => {
                result.map_err(Denial::EnumerationFailed)?
            }
        };
        debug!(count = sources.len(), "capture sources enumerated");

        if sources.is_empty() {
            return Err(Denial::NoSourcesAvailable);
        }

        let menu = ChoiceMenu::for_sources(&sources);
        let choice = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Denial::Aborted),
            choice = self.await_choice(&menu) => choice?,
        };

        match choice {
            Some(Choice::Source(index)) => sources
                .into_iter()
                .nth(index)
                .ok_or(Denial::UnknownChoice(index)),
            Some(Choice::Cancel) => Err(Denial::Cancelled),
            None => Err(Denial::Dismissed),
        }
    }

    async fn await_choice(&self, menu: &ChoiceMenu) -> Result<Option<Choice>, Denial> {
        let presentation = self.host.present_choice(self.anchor, menu);
        match self.config.selection_timeout {
            Some(limit) => tokio::time::timeout(limit, presentation)
                .await
                .map_err(|_| Denial::TimedOut(limit)),
            None => Ok(presentation.await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HostError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted host: fixed sources and a fixed answer from the picker.
    struct FakeHost {
        sources: Result<Vec<CaptureSource>, String>,
        answer: Answer,
        presented: AtomicUsize,
        enumerated_kinds: std::sync::Mutex<Vec<SourceKind>>,
    }

    #[derive(Clone, Copy)]
    enum Answer {
        Pick(Choice),
        Dismiss,
        Never,
    }

    impl FakeHost {
        fn new(sources: Vec<CaptureSource>, answer: Answer) -> Arc<Self> {
            Arc::new(Self {
                sources: Ok(sources),
                answer,
                presented: AtomicUsize::new(0),
                enumerated_kinds: std::sync::Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                sources: Err(message.to_string()),
                answer: Answer::Dismiss,
                presented: AtomicUsize::new(0),
                enumerated_kinds: std::sync::Mutex::new(Vec::new()),
            })
        }

        fn presented(&self) -> usize {
            self.presented.load(Ordering::SeqCst)
        }
    }

    impl CaptureHost for FakeHost {
        async fn enumerate_sources(
            &self,
            kinds: &[SourceKind],
        ) -> Result<Vec<CaptureSource>, HostError> {
            self.enumerated_kinds.lock().unwrap().extend_from_slice(kinds);
            self.sources.clone().map_err(HostError::Unavailable)
        }

        async fn present_choice(&self, _anchor: WindowId, menu: &ChoiceMenu) -> Option<Choice> {
            assert!(menu.cancelable());
            self.presented.fetch_add(1, Ordering::SeqCst);
            match self.answer {
                Answer::Pick(choice) => Some(choice),
                Answer::Dismiss => None,
                Answer::Never => std::future::pending().await,
            }
        }
    }

    fn screen_1() -> CaptureSource {
        CaptureSource::screen("1", "Screen 1")
    }

    #[tokio::test]
    async fn empty_enumeration_denies_without_presenting() {
        let host = FakeHost::new(Vec::new(), Answer::Pick(Choice::Source(0)));
        let broker = Broker::new(Arc::clone(&host), WindowId(1));

        let decision = broker.resolve(&CaptureRequest::new(true, true)).await;

        assert_eq!(decision, CaptureDecision::Denied);
        assert_eq!(host.presented(), 0);
    }

    #[tokio::test]
    async fn selected_source_with_loopback_audio() {
        let host = FakeHost::new(vec![screen_1()], Answer::Pick(Choice::Source(0)));
        let broker = Broker::new(Arc::clone(&host), WindowId(1));

        let decision = broker.resolve(&CaptureRequest::new(true, true)).await;

        assert_eq!(
            decision,
            CaptureDecision::Selected {
                source: screen_1(),
                audio: AudioMode::Loopback
            }
        );
        assert_eq!(host.presented(), 1);
        assert_eq!(
            *host.enumerated_kinds.lock().unwrap(),
            vec![SourceKind::Screen, SourceKind::Window]
        );
    }

    #[tokio::test]
    async fn selected_source_without_audio() {
        let sources = vec![screen_1(), CaptureSource::window("w:7", "Editor")];
        let host = FakeHost::new(sources, Answer::Pick(Choice::Source(1)));
        let broker = Broker::new(host, WindowId(1));

        let decision = broker.resolve(&CaptureRequest::new(true, false)).await;

        assert_eq!(
            decision,
            CaptureDecision::Selected {
                source: CaptureSource::window("w:7", "Editor"),
                audio: AudioMode::None
            }
        );
    }

    #[tokio::test]
    async fn cancel_entry_denies() {
        let host = FakeHost::new(vec![screen_1()], Answer::Pick(Choice::Cancel));
        let broker = Broker::new(host, WindowId(1));

        let result = broker.select(&CancellationToken::new()).await;
        assert!(matches!(result, Err(Denial::Cancelled)));
        assert!(broker.resolve(&CaptureRequest::default()).await.is_denied());
    }

    #[tokio::test]
    async fn dismissal_denies() {
        let host = FakeHost::new(vec![screen_1()], Answer::Dismiss);
        let broker = Broker::new(host, WindowId(1));

        let result = broker.select(&CancellationToken::new()).await;
        assert!(matches!(result, Err(Denial::Dismissed)));
    }

    #[tokio::test]
    async fn enumeration_failure_denies() {
        let broker = Broker::new(FakeHost::failing("portal unavailable"), WindowId(1));

        let result = broker.select(&CancellationToken::new()).await;
        assert!(matches!(
            result,
            Err(Denial::EnumerationFailed(HostError::Unavailable(_)))
        ));
        assert!(broker.resolve(&CaptureRequest::new(true, true)).await.is_denied());
    }

    #[tokio::test]
    async fn out_of_range_choice_denies() {
        let host = FakeHost::new(vec![screen_1()], Answer::Pick(Choice::Source(5)));
        let broker = Broker::new(host, WindowId(1));

        let result = broker.select(&CancellationToken::new()).await;
        assert!(matches!(result, Err(Denial::UnknownChoice(5))));
    }

    #[tokio::test]
    async fn cancellation_while_waiting_denies() {
        let host = FakeHost::new(vec![screen_1()], Answer::Never);
        let broker = Broker::new(Arc::clone(&host), WindowId(1));
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let decision = broker
            .resolve_with_cancel(&CaptureRequest::new(true, false), &cancel)
            .await;
        assert!(decision.is_denied());
        assert_eq!(host.presented(), 1);
    }

    #[tokio::test]
    async fn cancelled_before_start_skips_enumeration() {
        let host = FakeHost::new(vec![screen_1()], Answer::Pick(Choice::Source(0)));
        let broker = Broker::new(Arc::clone(&host), WindowId(1));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = broker.select(&cancel).await;
        assert!(matches!(result, Err(Denial::Aborted)));
        assert!(host.enumerated_kinds.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn selection_timeout_denies() {
        let host = FakeHost::new(vec![screen_1()], Answer::Never);
        let broker = Broker::new(host, WindowId(1)).with_config(BrokerConfig {
            selection_timeout: Some(Duration::from_millis(20)),
        });

        let result = broker.select(&CancellationToken::new()).await;
        assert!(matches!(result, Err(Denial::TimedOut(_))));
    }
}
