use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// A page failed before any contact had been collected.
    #[error("search failed on page {page} with no results collected: {reason}")]
    NoResults { page: u32, reason: String },

    /// The task running the search ended without producing an outcome.
    #[error("search task aborted: {reason}")]
    Aborted { reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a search is already running")]
    Busy,

    #[error("search query must not be blank")]
    BlankQuery,
}
