use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use leadminer_core::{unique_sources, BusinessContact, GeoPoint, GroundingSource};
use leadminer_search::{
    AggregatedSearch, Aggregator, SearchError, SearchSession, SearchStatus, SessionError,
    SessionSnapshot,
};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::middleware::RequestId;

use super::{bad_json, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct StartSearchRequest {
    pub query: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Session snapshot as served to the browser. Sources are deduplicated by
/// uri for display.
#[derive(Debug, Serialize)]
pub(super) struct SearchView {
    status: SearchStatus,
    query: Option<String>,
    progress: Option<String>,
    message: Option<String>,
    contact_count: usize,
    contacts: Vec<BusinessContact>,
    sources: Vec<GroundingSource>,
}

impl From<SessionSnapshot> for SearchView {
    fn from(snapshot: SessionSnapshot) -> Self {
        let (contacts, sources) = snapshot.result.map_or_else(
            || (Vec::new(), Vec::new()),
            |result| {
                let sources = unique_sources(&result.sources)
                    .into_iter()
                    .cloned()
                    .collect();
                (result.contacts, sources)
            },
        );
        Self {
            status: snapshot.status,
            query: snapshot.query,
            progress: snapshot.progress,
            message: snapshot.message,
            contact_count: contacts.len(),
            contacts,
            sources,
        }
    }
}

/// Starts a search in the background and returns the loading snapshot.
///
/// A request that arrives while another search is running is rejected with
/// `409`; the running search is left alone.
pub(super) async fn start_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<StartSearchRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<SearchView>>), ApiError> {
    let Json(body) = payload.map_err(|e| bad_json(&req_id.0, &e))?;
    let snapshot = state.session.try_begin(&body.query).map_err(|e| {
        let code = match e {
            SessionError::BlankQuery => "validation_error",
            SessionError::Busy => "conflict",
        };
        ApiError::new(req_id.0.clone(), code, e.to_string())
    })?;

    let query = snapshot.query.clone().unwrap_or_default();
    let location = GeoPoint::from_parts(body.latitude, body.longitude);
    tracing::info!(
        request_id = %req_id.0,
        query = %query,
        located = location.is_some(),
        "search started"
    );

    let client = Arc::clone(&state.client);
    let recorder = Arc::clone(&state.session);
    let page_delay = Duration::from_millis(state.config.page_delay_ms);
    spawn_search(Arc::clone(&state.session), async move {
        Aggregator::new(client.as_ref())
            .with_page_delay(page_delay)
            .run(&query, location, |event| recorder.record(event))
            .await
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse {
            data: SearchView::from(snapshot),
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

pub(super) async fn get_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<SearchView>> {
    Json(ApiResponse {
        data: SearchView::from(state.session.snapshot()),
        meta: ResponseMeta::new(req_id.0),
    })
}

/// Runs `search` on its own task and records its outcome on `session`.
///
/// A search task that panics still finishes the session as failed, so the
/// session never stays `loading`.
fn spawn_search<F>(session: Arc<SearchSession>, search: F) -> JoinHandle<()>
where
    F: Future<Output = Result<AggregatedSearch, SearchError>> + Send + 'static,
{
    tokio::spawn(async move {
        let outcome = match tokio::spawn(search).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "search task ended abnormally");
                Err(SearchError::Aborted {
                    reason: e.to_string(),
                })
            }
        };
        session.finish(outcome);
    })
}
