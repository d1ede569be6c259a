//! Per-page prompt policy.
//!
//! Each page of a search asks the model for a different slice of the market so
//! successive pages surface new businesses instead of repeating page 1.

/// Upper bound accepted by the Gemini API for `temperature`.
const MAX_TEMPERATURE: f64 = 2.0;

pub const SYSTEM_INSTRUCTION: &str = "\
You are a corporate data auditor specialised in mining business leads.
Your job is to build databases of commercial contacts.

RULES:
1. REAL DATA: never invent data. When a value cannot be found, write \"N/A\".
2. EXHAUSTIVENESS: the user wants EVERY possible result, not just the top 20.
3. FIELDS: Name, Phone, Email, Address, Website, Rating, Type.
4. PAGINATION STRATEGY:
   * You will be told the current page (batch) number.
   * Page 1: focus on the most popular and relevant results.
   * Page 2 and later: focus on smaller businesses, niche competitors, or \
businesses on nearby streets that did not appear at the top.
   * Do NOT repeat businesses that would be obvious on page 1.

MANDATORY OUTPUT: a single markdown table with the columns
| Name | Phone | Email | Address | Website | Rating | Type |
";

/// What a given page should emphasise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStrategy {
    /// Page 1: the best known, best rated businesses.
    Popular,
    /// Page 2: skip the obvious results, look for smaller or newer ones.
    LesserKnown,
    /// Page 3+: sweep web directories for businesses missing from the maps index.
    DeepSweep,
}

impl PageStrategy {
    #[must_use]
    pub fn for_page(page: u32) -> Self {
        match page {
            0 | 1 => PageStrategy::Popular,
            2 => PageStrategy::LesserKnown,
            _ => PageStrategy::DeepSweep,
        }
    }

    #[must_use]
    pub fn directive(self) -> &'static str {
        match self {
            PageStrategy::Popular => {
                "Return the main, best rated businesses in this area."
            }
            PageStrategy::LesserKnown => {
                "IGNORE the most famous results. Look for smaller businesses, new \
                 establishments, or those with few reviews that the map listing hides."
            }
            PageStrategy::DeepSweep => {
                "Do a deep sweep. Search web directories for businesses that may not \
                 even have a map pin but do exist in the area."
            }
        }
    }
}

/// Sampling temperature for `page`: `0.7 + 0.1 * page`, capped at the API maximum.
///
/// Computed from integers so page 2 is exactly `0.9` on the wire.
#[must_use]
pub fn page_temperature(page: u32) -> f64 {
    (f64::from(page.saturating_add(7)) / 10.0).min(MAX_TEMPERATURE)
}

/// User prompt for one page of a lead search.
#[must_use]
pub fn build_prompt(query: &str, page: u32) -> String {
    let directive = PageStrategy::for_page(page).directive();
    format!(
        "LEAD SEARCH - BATCH {page}\n\
         Term: \"{query}\"\n\
         \n\
         DIRECTIVE: {directive}\n\
         \n\
         GOAL:\n\
         1. Find around 20-30 NEW businesses for this batch.\n\
         2. For each one, cross-check maps and web search data to find the PHONE and EMAIL.\n\
         3. Produce the table."
    )
}
