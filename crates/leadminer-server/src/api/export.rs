use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Extension,
};
use leadminer_export::{export_filename, workbook_bytes, XLSX_CONTENT_TYPE};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::middleware::RequestId;

use super::{internal_error, ApiError, AppState};

/// Downloads the current result as an `.xlsx` attachment.
pub(super) async fn export_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Response, ApiError> {
    let snapshot = state.session.snapshot();
    let query = snapshot.query.unwrap_or_default();
    let contacts = snapshot
        .result
        .map(|r| r.contacts)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "no contacts to export"))?;

    let bytes = workbook_bytes(&contacts).map_err(|e| internal_error(req_id.0.clone(), &e))?;
    let disposition = content_disposition(&export_filename(&query));
    tracing::info!(
        request_id = %req_id.0,
        contacts = contacts.len(),
        bytes = bytes.len(),
        "workbook exported"
    );

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// `attachment` disposition with an ASCII fallback name plus the exact
/// UTF-8 name in `filename*`.
fn content_disposition(filename: &str) -> HeaderValue {
    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' { c } else { '_' })
        .collect();
    let encoded = utf8_percent_encode(filename, NON_ALPHANUMERIC);
    let value = format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}");
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_name_is_used_verbatim() {
        let value = content_disposition("leads_dentists_complete.xlsx");
        assert_eq!(
            value.to_str().unwrap(),
            "attachment; filename=\"leads_dentists_complete.xlsx\"; \
             filename*=UTF-8''leads%5Fdentists%5Fcomplete%2Exlsx"
        );
    }

    #[test]
    fn non_ascii_name_gets_fallback_and_encoded_form() {
        let value = content_disposition("leads_cafés_complete.xlsx");
        let text = value.to_str().unwrap();
        assert!(text.contains("filename=\"leads_caf_s_complete.xlsx\""));
        assert!(text.contains("caf%C3%A9s"));
    }
}
