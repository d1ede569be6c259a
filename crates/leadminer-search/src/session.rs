//! Status of the current search, as seen by a presentation layer.
//!
//! A session holds at most one run. [`SearchSession::try_begin`] refuses to
//! start a second run while one is loading; the running search keeps going
//! and the new request is dropped.

use std::sync::{Mutex, MutexGuard, PoisonError};

use leadminer_core::SearchResult;
use serde::Serialize;

use crate::aggregate::AggregatedSearch;
use crate::error::{SearchError, SessionError};
use crate::events::SearchEvent;

/// Shown when a run ends without any results.
pub const GENERIC_FAILURE_MESSAGE: &str = "Error fetching data. Please try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Point-in-time copy of the session state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionSnapshot {
    pub status: SearchStatus,
    pub query: Option<String>,
    /// Latest progress line while loading.
    pub progress: Option<String>,
    /// Advisory for partial results, or the failure message.
    pub message: Option<String>,
    pub result: Option<SearchResult>,
}

#[derive(Debug, Default)]
pub struct SearchSession {
    state: Mutex<SessionSnapshot>,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a new run as loading and clears the previous result.
    ///
    /// # Errors
    ///
    /// - [`SessionError::BlankQuery`] if `query` is empty after trimming.
    /// - [`SessionError::Busy`] if a run is already loading.
    pub fn try_begin(&self, query: &str) -> Result<SessionSnapshot, SessionError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SessionError::BlankQuery);
        }

        let mut state = self.lock();
        if state.status == SearchStatus::Loading {
            tracing::info!(
                query,
                running = state.query.as_deref().unwrap_or_default(),
                "search ignored; another search is running"
            );
            return Err(SessionError::Busy);
        }

        *state = SessionSnapshot {
            status: SearchStatus::Loading,
            query: Some(query.to_string()),
            ..SessionSnapshot::default()
        };
        Ok(state.clone())
    }

    /// Updates the progress line. Ignored unless a run is loading.
    pub fn record(&self, event: &SearchEvent) {
        let Some(text) = event.progress_text() else {
            return;
        };
        let mut state = self.lock();
        if state.status == SearchStatus::Loading {
            state.progress = Some(text);
        }
    }

    /// Stores the terminal outcome of the current run.
    pub fn finish(&self, outcome: Result<AggregatedSearch, SearchError>) {
        let mut state = self.lock();
        state.progress = None;
        match outcome {
            Ok(search) => {
                state.status = SearchStatus::Success;
                state.message = search.advisory().map(str::to_string);
                state.result = Some(search.result);
            }
            Err(e) => {
                tracing::error!(error = %e, "search failed");
                state.status = SearchStatus::Error;
                state.message = Some(GENERIC_FAILURE_MESSAGE.to_string());
                state.result = None;
            }
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().clone()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.lock().status == SearchStatus::Loading
    }

    // Every update replaces whole fields, so state behind a poisoned lock is
    // still consistent.
    fn lock(&self) -> MutexGuard<'_, SessionSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
