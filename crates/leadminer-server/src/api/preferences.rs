use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use leadminer_core::{load_preferences, save_preferences, Theme};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{bad_json, internal_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ThemeBody {
    pub theme: Theme,
}

pub(super) async fn get_theme(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<ThemeBody>>, ApiError> {
    let prefs = load_preferences(&state.config.preferences_path)
        .map_err(|e| internal_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: ThemeBody { theme: prefs.theme },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn put_theme(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<ThemeBody>, JsonRejection>,
) -> Result<Json<ApiResponse<ThemeBody>>, ApiError> {
    let Json(body) = payload.map_err(|e| bad_json(&req_id.0, &e))?;
    let path = &state.config.preferences_path;
    let mut prefs = load_preferences(path).map_err(|e| internal_error(req_id.0.clone(), &e))?;
    prefs.theme = body.theme;
    save_preferences(path, &prefs).map_err(|e| internal_error(req_id.0.clone(), &e))?;
    tracing::info!(request_id = %req_id.0, theme = %prefs.theme, "theme saved");

    Ok(Json(ApiResponse {
        data: ThemeBody { theme: prefs.theme },
        meta: ResponseMeta::new(req_id.0),
    }))
}
