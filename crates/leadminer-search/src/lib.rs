//! Multi-page lead aggregation.
//!
//! [`Aggregator`] drives up to [`MAX_PAGES`] sequential page requests against
//! a [`PageSource`], suppresses duplicate businesses, stops early once a page
//! adds nothing new, and keeps what it has when a later page fails.
//! [`SearchSession`] tracks the status of the current run for presentation
//! layers.

pub mod aggregate;
pub mod error;
pub mod events;
pub mod session;
pub mod source;

pub use aggregate::{AggregatedSearch, Aggregator, Completion, DEFAULT_PAGE_DELAY, MAX_PAGES};
pub use error::{SearchError, SessionError};
pub use events::SearchEvent;
pub use session::{SearchSession, SearchStatus, SessionSnapshot, GENERIC_FAILURE_MESSAGE};
pub use source::PageSource;
