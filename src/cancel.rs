//! Cooperative cancellation for an in-flight stream.
//!
//! The engine side holds a [`CancelSource`]; the stream session receives a
//! [`CancelToken`] and observes it at every chunk-read suspension point.
//! Dropping the source does not cancel; cancellation is always an explicit
//! user action.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct CancelInner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Control side of a cancellation pair.
#[derive(Debug, Default)]
pub struct CancelSource {
    inner: Arc<CancelInner>,
}

impl CancelSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Obtain a token observing this source.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::SeqCst) {
            self.inner.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }
}

/// Observer side, cheap to clone into the streaming task.
#[derive(Debug, Clone)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolve once cancellation is requested.
    pub async fn cancelled(&self) {
        // Subscribe before checking the flag: a cancel() landing between the
        // check and the await would otherwise have no waiter to wake.
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}
