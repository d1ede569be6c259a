use std::future::Future;

use leadminer_core::{GeoPoint, SearchPage};
use leadminer_gemini::{GeminiClient, GeminiError};

/// Anything that can produce one page of leads for a query.
pub trait PageSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetches page `page` (1-based) of results for `query`.
    fn fetch_page(
        &self,
        query: &str,
        location: Option<GeoPoint>,
        page: u32,
    ) -> impl Future<Output = Result<SearchPage, Self::Error>> + Send;
}

impl PageSource for GeminiClient {
    type Error = GeminiError;

    fn fetch_page(
        &self,
        query: &str,
        location: Option<GeoPoint>,
        page: u32,
    ) -> impl Future<Output = Result<SearchPage, GeminiError>> + Send {
        GeminiClient::fetch_page(self, query, location, page)
    }
}
