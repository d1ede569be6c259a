//! Lead data model shared by the search client, the aggregation loop and the
//! presentation layers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel stored in any contact field the model could not fill.
pub const NOT_AVAILABLE: &str = "N/A";

/// Category recorded when the table has no type column ("Google Meu Negócio").
pub const DEFAULT_KIND: &str = "GMN";

/// URI used for a citation that could not be resolved to a link.
pub const PLACEHOLDER_URI: &str = "#";

/// Ratings at or above this value get the "top rated" badge.
const TOP_RATED_THRESHOLD: f32 = 4.5;

/// One business lead extracted from a model-generated table row.
///
/// Every field except `id` is kept exactly as extracted. Two contacts are the
/// same business when their [`DedupKey`]s match, regardless of `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessContact {
    /// Unique per parsed row; regenerated every time text is parsed.
    pub id: Uuid,
    pub name: String,
    /// Raw phone text, e.g. `"(11) 5555-1234"`.
    pub phone: String,
    pub email: String,
    pub address: String,
    pub website: String,
    /// Rating as printed by the model, e.g. `"4.7"`, or `"N/A"`.
    pub rating: String,
    /// Business category. Defaults to [`DEFAULT_KIND`].
    #[serde(rename = "type")]
    pub kind: String,
}

impl BusinessContact {
    /// Key used to suppress duplicates across pages: the lowercased, trimmed
    /// name joined with the digits of the phone number.
    #[must_use]
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::new(&self.name, &self.phone)
    }

    /// Numeric rating, if the model supplied one that parses.
    #[must_use]
    pub fn rating_value(&self) -> Option<f32> {
        if self.rating == NOT_AVAILABLE {
            return None;
        }
        self.rating
            .trim()
            .replace(',', ".")
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
    }

    #[must_use]
    pub fn is_top_rated(&self) -> bool {
        self.rating_value()
            .is_some_and(|v| v >= TOP_RATED_THRESHOLD)
    }

    #[must_use]
    pub fn has_email(&self) -> bool {
        self.email != NOT_AVAILABLE
    }

    /// Clickable website link; bare domains get an `https://` scheme.
    #[must_use]
    pub fn website_url(&self) -> Option<String> {
        let site = self.website.trim();
        if site.is_empty() || site == NOT_AVAILABLE {
            return None;
        }
        if site.starts_with("http") {
            Some(site.to_string())
        } else {
            Some(format!("https://{site}"))
        }
    }
}

/// Identity of a contact for deduplication purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey(String);

impl DedupKey {
    #[must_use]
    pub fn new(name: &str, phone: &str) -> Self {
        let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
        Self(format!("{}_{digits}", name.to_lowercase().trim()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DedupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A citation the model used to ground part of its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    /// Link to the source, or [`PLACEHOLDER_URI`] when unresolved.
    pub uri: String,
}

/// Contacts and citations returned by a single page request.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub contacts: Vec<BusinessContact>,
    pub sources: Vec<GroundingSource>,
    /// Model text the contacts were parsed from.
    pub raw_text: String,
}

/// Outcome of a full multi-page search.
///
/// `contacts` holds no two entries with the same [`DedupKey`] and is ordered
/// by discovery. `sources` is the flat, undeduplicated list of every page's
/// citations; use [`unique_sources`] for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    pub contacts: Vec<BusinessContact>,
    pub sources: Vec<GroundingSource>,
    /// Always empty for aggregated results.
    #[serde(default)]
    pub raw_text: String,
}

/// Latitude/longitude used to bias the search towards the user's area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Returns `None` for non-finite or out-of-range coordinates; callers
    /// then search without a location bias.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }

    /// Builds a point only when both halves are present and valid.
    #[must_use]
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lng)) => Self::new(lat, lng),
            _ => None,
        }
    }
}

/// Sources with repeated URIs removed, keeping the first occurrence of each.
#[must_use]
pub fn unique_sources(sources: &[GroundingSource]) -> Vec<&GroundingSource> {
    let mut seen = HashSet::new();
    sources
        .iter()
        .filter(|s| seen.insert(s.uri.as_str()))
        .collect()
}
