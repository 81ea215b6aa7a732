use std::{
    future::Future,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

/// Per-mount cancellation flag. A view creates one when it mounts, cancels it
/// on cleanup, and runs every fetch through [`CancelToken::guard`] so late
/// responses never reach unmounted state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Awaits `fut`, returning `None` if the token was cancelled before or
    /// while it ran.
    pub async fn guard<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_cancelled() {
            return None;
        }
        let out = fut.await;
        if self.is_cancelled() {
            log::debug!("Dropping result for an unmounted view");
            None
        } else {
            Some(out)
        }
    }
}
