//! Normalization of grounding chunks into [`GroundingSource`]s.

use leadminer_core::{GroundingSource, PLACEHOLDER_URI};

use crate::types::GroundingChunk;

const MAPS_PLACE_URL: &str = "https://www.google.com/maps/place/?q=place_id:";
const MAPS_DEFAULT_TITLE: &str = "Google Maps";

/// Converts the response's grounding chunks into display-ready sources.
///
/// Web chunks keep their title and uri. Maps chunks are linked through their
/// place id; without one the uri is [`PLACEHOLDER_URI`]. Chunks that are
/// neither kind are skipped.
#[must_use]
pub fn extract_sources(chunks: &[GroundingChunk]) -> Vec<GroundingSource> {
    chunks
        .iter()
        .filter_map(|chunk| {
            if let Some(web) = &chunk.web {
                let uri = non_empty(web.uri.as_deref()).unwrap_or(PLACEHOLDER_URI);
                let title = non_empty(web.title.as_deref()).unwrap_or(uri);
                return Some(GroundingSource {
                    title: title.to_string(),
                    uri: uri.to_string(),
                });
            }

            chunk.maps.as_ref().map(|maps| {
                let title = non_empty(maps.title.as_deref()).unwrap_or(MAPS_DEFAULT_TITLE);
                let uri = non_empty(maps.place_id.as_deref())
                    .map_or_else(|| PLACEHOLDER_URI.to_string(), maps_place_url);
                GroundingSource {
                    title: title.to_string(),
                    uri,
                }
            })
        })
        .collect()
}

/// Canonical maps link for a place id. The API may prefix ids with `places/`.
fn maps_place_url(place_id: &str) -> String {
    let id = place_id.strip_prefix("places/").unwrap_or(place_id);
    format!("{MAPS_PLACE_URL}{id}")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
