//! Per-view snapshots of store collections
//!
//! A snapshot is a disposable copy of a collection, valid until the next
//! fetch. Each load moves it through `Loading` into `Ready` or `Error`.

use std::fmt;
use std::future::Future;

use crate::utils::errors::{ExamResultsError, Result};
use crate::utils::logging::log_view_transition;
use super::scope::ViewScope;

/// Fetch state of a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Never fetched
    Idle,
    Loading,
    Ready,
    /// Last fetch failed; the previous data is kept
    Error(String),
}

impl LoadState {
    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Ready => "ready",
            LoadState::Error(_) => "error",
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Error(message) => write!(f, "error: {}", message),
            other => f.write_str(other.label()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    name: &'static str,
    data: T,
    state: LoadState,
}

impl<T: Default> Snapshot<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            data: T::default(),
            state: LoadState::Idle,
        }
    }
}

impl<T> Snapshot<T> {
    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Replace the snapshot with a fresh fetch.
    ///
    /// A failed fetch keeps the previous data; a cancelled fetch also
    /// restores the previous state so the stale request leaves no trace.
    pub async fn load<F>(&mut self, scope: &ViewScope, fetch: F) -> Result<()>
    where
        F: Future<Output = Result<T>>,
    {
        let previous = self.state.clone();
        self.transition(LoadState::Loading);

        match scope.run(fetch).await {
            Ok(data) => {
                self.data = data;
                self.transition(LoadState::Ready);
                Ok(())
            }
            Err(ExamResultsError::Cancelled) => {
                self.transition(previous);
                Err(ExamResultsError::Cancelled)
            }
            Err(e) => {
                self.transition(LoadState::Error(e.to_string()));
                Err(e)
            }
        }
    }

    fn transition(&mut self, next: LoadState) {
        log_view_transition(self.name, self.state.label(), next.label());
        self.state = next;
    }
}
