//! View-lifetime cancellation
//!
//! Every view owns a [`ViewScope`]. Store calls issued by the view run inside
//! [`ViewScope::run`] and resolve to [`ExamResultsError::Cancelled`] once the
//! scope is cancelled, either explicitly through a [`CancelHandle`] or because
//! the view (and with it the scope) was dropped.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::utils::errors::{ExamResultsError, Result};

/// Cancellation signal bound to one view activation
#[derive(Debug)]
pub struct ViewScope {
    view: &'static str,
    signal: Arc<watch::Sender<bool>>,
}

/// Cloneable handle that cancels the scope it came from
#[derive(Debug, Clone)]
pub struct CancelHandle {
    view: &'static str,
    signal: Arc<watch::Sender<bool>>,
}

impl ViewScope {
    pub fn new(view: &'static str) -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            view,
            signal: Arc::new(signal),
        }
    }

    pub fn view(&self) -> &'static str {
        self.view
    }

    pub fn handle(&self) -> CancelHandle {
        CancelHandle {
            view: self.view,
            signal: self.signal.clone(),
        }
    }

    pub fn cancel(&self) {
        self.handle().cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.signal.borrow()
    }

    /// Run a request unless the scope is, or becomes, cancelled first
    pub async fn run<F, T>(&self, request: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let mut receiver = self.signal.subscribe();
        let cancelled = async move {
            loop {
                if *receiver.borrow_and_update() {
                    break;
                }
                if receiver.changed().await.is_err() {
                    break;
                }
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => {
                debug!(view = self.view, "In-flight request discarded");
                Err(ExamResultsError::Cancelled)
            }
            outcome = request => outcome,
        }
    }
}

impl CancelHandle {
    pub fn cancel(&self) {
        if !self.signal.send_replace(true) {
            debug!(view = self.view, "View scope cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.signal.borrow()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.signal.send_replace(true);
    }
}
