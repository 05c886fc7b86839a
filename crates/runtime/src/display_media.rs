//! Display-media (screen share) requests.

use capture::{Broker, CaptureDecision, CaptureHost, CaptureRequest};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::Responder;

/// Callback delivering a capture decision to the pending `getDisplayMedia`.
pub type DisplayMediaResponder = Responder<CaptureDecision>;

/// Runs capture requests off the host's event loop.
pub struct DisplayMediaHandler<H> {
    broker: Broker<H>,
    shutdown: CancellationToken,
}

impl<H: CaptureHost + 'static> DisplayMediaHandler<H> {
    pub fn new(broker: Broker<H>) -> Self {
        Self {
            broker,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn broker(&self) -> &Broker<H> {
        &self.broker
    }

    /// Start resolving `request`; the decision goes to `responder`.
    ///
    /// Must be called from within a tokio runtime. Returns immediately.
    pub fn handle(&self, request: CaptureRequest, responder: DisplayMediaResponder) -> PendingCapture {
        debug!(
            video = request.video_requested,
            audio = request.audio_requested,
            "display media request"
        );

        let cancel = self.shutdown.child_token();
        let broker = self.broker.clone();
        let task_cancel = cancel.clone();
        let task_responder = responder.clone();

        let task = tokio::spawn(async move {
            let decision = broker.resolve_with_cancel(&request, &task_cancel).await;
            if !task_responder.respond(decision) {
                debug!("display media request already settled, dropping late decision");
            }
        });

        PendingCapture {
            cancel,
            responder,
            task,
        }
    }

    /// Deny every request still waiting.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

impl<H> Drop for DisplayMediaHandler<H> {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// A capture request in flight.
pub struct PendingCapture {
    cancel: CancellationToken,
    responder: DisplayMediaResponder,
    task: JoinHandle<()>,
}

impl PendingCapture {
    /// Deny the request now. Returns whether this call settled it.
    pub fn cancel(&self) -> bool {
        let settled = self.responder.respond(CaptureDecision::Denied);
        self.cancel.cancel();
        settled
    }

    pub fn is_settled(&self) -> bool {
        self.responder.is_settled()
    }

    /// Wait for the resolving task to finish.
    pub async fn finished(self) {
        if let Err(e) = self.task.await {
            warn!(error = %e, "display media task failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capture::{AudioMode, CaptureSource, Choice, ChoiceMenu, HostError, SourceKind, WindowId};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Picker that waits until the test releases it, then picks the first source.
    struct GatedHost {
        sources: Vec<CaptureSource>,
        release: Notify,
    }

    impl CaptureHost for GatedHost {
        async fn enumerate_sources(
            &self,
            _kinds: &[SourceKind],
        ) -> Result<Vec<CaptureSource>, HostError> {
            Ok(self.sources.clone())
        }

        async fn present_choice(&self, _anchor: WindowId, _menu: &ChoiceMenu) -> Option<Choice> {
            self.release.notified().await;
            Some(Choice::Source(0))
        }
    }

    fn gated(sources: Vec<CaptureSource>) -> Arc<GatedHost> {
        Arc::new(GatedHost {
            sources,
            release: Notify::new(),
        })
    }

    fn recording_responder() -> (DisplayMediaResponder, Arc<Mutex<Vec<CaptureDecision>>>, Arc<AtomicUsize>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let calls = Arc::new(AtomicUsize::new(0));
        let responder = {
            let seen = Arc::clone(&seen);
            let calls = Arc::clone(&calls);
            DisplayMediaResponder::new(move |decision| {
                calls.fetch_add(1, Ordering::SeqCst);
                seen.lock().unwrap().push(decision);
            })
        };
        (responder, seen, calls)
    }

    #[tokio::test]
    async fn delivers_selected_source() {
        let host = gated(vec![CaptureSource::screen("1", "Screen 1")]);
        let handler = DisplayMediaHandler::new(Broker::new(Arc::clone(&host), WindowId(7)));
        let (responder, rx) = DisplayMediaResponder::channel();

        let pending = handler.handle(CaptureRequest::new(true, true), responder);
        host.release.notify_one();

        let decision = rx.await.unwrap();
        assert_eq!(
            decision,
            CaptureDecision::Selected {
                source: CaptureSource::screen("1", "Screen 1"),
                audio: AudioMode::Loopback,
            }
        );
        assert!(pending.is_settled());
        pending.finished().await;
    }

    #[tokio::test]
    async fn empty_sources_deny() {
        let host = gated(Vec::new());
        let handler = DisplayMediaHandler::new(Broker::new(host, WindowId(7)));
        let (responder, rx) = DisplayMediaResponder::channel();

        handler.handle(CaptureRequest::new(true, false), responder);
        assert!(rx.await.unwrap().is_denied());
    }

    #[tokio::test]
    async fn cancel_racing_late_choice_settles_once() {
        let host = gated(vec![CaptureSource::screen("1", "Screen 1")]);
        let handler = DisplayMediaHandler::new(Broker::new(Arc::clone(&host), WindowId(7)));
        let (responder, seen, calls) = recording_responder();

        let pending = handler.handle(CaptureRequest::new(true, true), responder);
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(pending.cancel());
        host.release.notify_one();
        assert!(!pending.cancel());
        pending.finished().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.lock().unwrap(), vec![CaptureDecision::Denied]);
    }

    #[tokio::test]
    async fn shutdown_denies_waiting_requests() {
        let host = gated(vec![CaptureSource::window("w", "Notes")]);
        let handler = DisplayMediaHandler::new(Broker::new(host, WindowId(7)));
        let (responder, seen, calls) = recording_responder();

        let pending = handler.handle(CaptureRequest::new(true, false), responder);
        handler.shutdown();
        pending.finished().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.lock().unwrap(), vec![CaptureDecision::Denied]);
    }
}
