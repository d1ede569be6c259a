use serde::Serialize;

/// Progress notification emitted by [`crate::Aggregator::run`].
///
/// Events arrive in page order. `PageStarted` precedes every fetch; a page
/// that succeeds is followed by `PageMerged`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchEvent {
    PageStarted {
        page: u32,
        total: u32,
    },
    PageMerged {
        page: u32,
        admitted: usize,
        duplicates: usize,
        total_contacts: usize,
    },
    /// The page added no new contacts; no further pages are requested.
    Stopped { page: u32 },
    /// The page failed after earlier pages had produced contacts.
    Interrupted { page: u32 },
}

impl SearchEvent {
    /// Status line shown while a page is in flight. `None` for events that do
    /// not change the progress display.
    #[must_use]
    pub fn progress_text(&self) -> Option<String> {
        match self {
            SearchEvent::PageStarted { page, total } => Some(format!(
                "Extracting batch {page} of {total}... (analyzing data)"
            )),
            _ => None,
        }
    }
}
