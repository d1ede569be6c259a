//! The page loop: fetch, merge, decide whether to continue.

use std::collections::HashSet;
use std::time::Duration;

use leadminer_core::{BusinessContact, DedupKey, GeoPoint, GroundingSource, SearchPage, SearchResult};

use crate::error::SearchError;
use crate::events::SearchEvent;
use crate::source::PageSource;

/// Number of pages requested per search.
pub const MAX_PAGES: u32 = 3;

/// Pause between consecutive page requests.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(1);

const INTERRUPTED_ADVISORY: &str =
    "The search was interrupted, but we are showing the data collected so far.";

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Every page was requested.
    AllPages,
    /// `page` added no new contacts, so later pages were skipped.
    EarlyStop { page: u32 },
    /// `page` failed; the result holds what earlier pages produced.
    Interrupted { page: u32, reason: String },
}

/// Result of a run that produced something to show.
#[derive(Debug, Clone)]
pub struct AggregatedSearch {
    pub result: SearchResult,
    pub completion: Completion,
}

impl AggregatedSearch {
    #[must_use]
    pub fn is_partial(&self) -> bool {
        matches!(self.completion, Completion::Interrupted { .. })
    }

    /// Message to show next to a partial result.
    #[must_use]
    pub fn advisory(&self) -> Option<&'static str> {
        self.is_partial().then_some(INTERRUPTED_ADVISORY)
    }
}

/// Runs one multi-page search against a borrowed [`PageSource`].
///
/// The source is passed in by the caller and never stored globally; the
/// aggregator owns the dedup set and accumulators for the duration of
/// [`Aggregator::run`] only.
pub struct Aggregator<'a, S> {
    source: &'a S,
    page_delay: Duration,
}

impl<'a, S: PageSource> Aggregator<'a, S> {
    #[must_use]
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    /// Overrides the pause between pages. Zero disables it.
    #[must_use]
    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    /// Fetches pages `1..=MAX_PAGES` in order, merging each into the result.
    ///
    /// The loop ends early when a page after the first admits no new
    /// contacts. A failing page ends the loop too: with contacts already
    /// collected the run completes as [`Completion::Interrupted`], otherwise
    /// it fails.
    ///
    /// `on_event` is called synchronously for every [`SearchEvent`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoResults`] if a page fails while no contact has
    /// been collected yet.
    pub async fn run<F>(
        &self,
        query: &str,
        location: Option<GeoPoint>,
        mut on_event: F,
    ) -> Result<AggregatedSearch, SearchError>
    where
        F: FnMut(&SearchEvent),
    {
        let mut acc = Accumulator::default();

        for page in 1..=MAX_PAGES {
            on_event(&SearchEvent::PageStarted {
                page,
                total: MAX_PAGES,
            });

            let fetched = match self.source.fetch_page(query, location, page).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    let reason = e.to_string();
                    if acc.is_empty() {
                        tracing::warn!(query, page, error = %e, "search failed with no results");
                        return Err(SearchError::NoResults { page, reason });
                    }
                    tracing::warn!(
                        query,
                        page,
                        contacts = acc.contacts.len(),
                        error = %e,
                        "search interrupted; keeping partial results"
                    );
                    on_event(&SearchEvent::Interrupted { page });
                    return Ok(AggregatedSearch {
                        result: acc.into_result(),
                        completion: Completion::Interrupted { page, reason },
                    });
                }
            };

            let merged = acc.merge(fetched);
            tracing::info!(
                query,
                page,
                admitted = merged.admitted,
                duplicates = merged.duplicates,
                total_contacts = acc.contacts.len(),
                "page merged"
            );
            on_event(&SearchEvent::PageMerged {
                page,
                admitted: merged.admitted,
                duplicates: merged.duplicates,
                total_contacts: acc.contacts.len(),
            });

            if merged.admitted == 0 && page > 1 {
                tracing::info!(query, page, "no new contacts; stopping early");
                on_event(&SearchEvent::Stopped { page });
                return Ok(AggregatedSearch {
                    result: acc.into_result(),
                    completion: Completion::EarlyStop { page },
                });
            }

            if page < MAX_PAGES && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        Ok(AggregatedSearch {
            result: acc.into_result(),
            completion: Completion::AllPages,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MergeCounts {
    admitted: usize,
    duplicates: usize,
}

/// Contacts in discovery order, their keys, and every page's sources.
#[derive(Debug, Default)]
struct Accumulator {
    contacts: Vec<BusinessContact>,
    seen: HashSet<DedupKey>,
    sources: Vec<GroundingSource>,
}

impl Accumulator {
    fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// First occurrence of a key wins; later ones are dropped whole.
    fn merge(&mut self, page: SearchPage) -> MergeCounts {
        let mut counts = MergeCounts {
            admitted: 0,
            duplicates: 0,
        };
        for contact in page.contacts {
            if self.seen.insert(contact.dedup_key()) {
                self.contacts.push(contact);
                counts.admitted += 1;
            } else {
                counts.duplicates += 1;
            }
        }
        self.sources.extend(page.sources);
        counts
    }

    fn into_result(self) -> SearchResult {
        SearchResult {
            contacts: self.contacts,
            sources: self.sources,
            raw_text: String::new(),
        }
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
