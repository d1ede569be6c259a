mod export;
mod preferences;
mod search;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    handler::Handler,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use leadminer_core::AppConfig;
use leadminer_gemini::GeminiClient;
use leadminer_search::SearchSession;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SearchSession>,
    pub client: Arc<GeminiClient>,
    pub config: Arc<AppConfig>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    search: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn internal_error(request_id: String, error: &dyn std::error::Error) -> ApiError {
    tracing::error!(error = %error, "request failed");
    ApiError::new(request_id, "internal_error", "internal server error")
}

/// Wraps a rejected JSON body in the standard error envelope.
pub(super) fn bad_json(request_id: &str, rejection: &JsonRejection) -> ApiError {
    tracing::debug!(request_id, status = %rejection.status(), "rejected request body");
    ApiError::new(request_id, "bad_request", rejection.body_text())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
        .expose_headers([
            header::CONTENT_DISPOSITION,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    // Only starting a search costs upstream quota; polling stays unlimited.
    let start_search = search::start_search.layer(axum::middleware::from_fn_with_state(
        rate_limit,
        enforce_rate_limit,
    ));

    Router::new()
        .route("/api/v1/health", get(health))
        .route(
            "/api/v1/search",
            get(search::get_search).post(start_search),
        )
        .route("/api/v1/search/export", get(export::export_search))
        .route(
            "/api/v1/preferences/theme",
            get(preferences::get_theme).put(preferences::put_theme),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let search = if state.session.is_busy() {
        "running"
    } else {
        "idle"
    };
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            search,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(30, Duration::from_secs(60))
}
