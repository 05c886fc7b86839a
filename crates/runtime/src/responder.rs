//! Settle-once delivery of answers back to the host.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::oneshot;

type Callback<T> = Box<dyn FnOnce(T) + Send>;

/// Delivers a single answer to a pending host callback.
///
/// Clones share the same slot: the first [`Responder::respond`] wins and
/// every later call is a no-op returning `false`.
pub struct Responder<T> {
    slot: Arc<Mutex<Option<Callback<T>>>>,
}

impl<T> Clone for Responder<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> fmt::Debug for Responder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responder")
            .field("settled", &self.is_settled())
            .finish()
    }
}

impl<T: Send + 'static> Responder<T> {
    /// Wrap a host callback.
    pub fn new(callback: impl FnOnce(T) + Send + 'static) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(Box::new(callback)))),
        }
    }

    /// A responder whose answer arrives on the returned receiver.
    pub fn channel() -> (Self, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        let responder = Self::new(move |value| {
            // Receiver dropped: nobody is waiting any more.
            let _ = tx.send(value);
        });
        (responder, rx)
    }
}

impl<T> Responder<T> {
    /// Deliver `value` if nothing has been delivered yet.
    ///
    /// Returns whether this call settled the responder.
    pub fn respond(&self, value: T) -> bool {
        let callback = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match callback {
            Some(callback) => {
                callback(value);
                true
            }
            None => false,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}
