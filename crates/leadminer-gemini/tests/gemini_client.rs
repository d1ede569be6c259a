//! Integration tests for `GeminiClient::fetch_page`.
//!
//! Each test stands up a local `wiremock` server in place of the Gemini API,
//! so no real network traffic is made.

use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use leadminer_core::GeoPoint;
use leadminer_gemini::{ClientOptions, GeminiClient, GeminiError};

const MODEL_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn test_client(server: &MockServer) -> GeminiClient {
    let options = ClientOptions {
        timeout_secs: 5,
        ..ClientOptions::default()
    };
    GeminiClient::with_base_url("test-key", &format!("{}/v1beta", server.uri()), options)
        .expect("failed to build test GeminiClient")
}

fn table_response(table: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": table }]
            },
            "finishReason": "STOP",
            "groundingMetadata": {
                "groundingChunks": [
                    { "web": { "uri": "https://directory.example/dentists", "title": "Directory" } },
                    { "maps": { "title": "Sorriso Dental", "placeId": "places/ChIJabc" } }
                ]
            }
        }]
    })
}

const TWO_ROW_TABLE: &str = "\
| Name | Phone | Email | Address | Website | Rating | Type |
|---|---|---|---|---|---|---|
| Sorriso Dental | (11) 3333-4444 | contato@sorriso.com | Rua A, 10 | sorriso.com | 4.8 | Dentist |
| Clinica Boa | (11) 2222-1111 | N/A | Av. B, 200 | N/A | 4.1 | Clinic |";

// ---------------------------------------------------------------------------
// Happy paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_page_parses_contacts_and_sources() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(table_response(TWO_ROW_TABLE)))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_client(&server)
        .fetch_page("dentists", None, 1)
        .await
        .expect("fetch_page should succeed");

    assert_eq!(page.contacts.len(), 2);
    assert_eq!(page.contacts[0].name, "Sorriso Dental");
    assert_eq!(page.contacts[0].rating, "4.8");
    assert_eq!(page.contacts[1].email, "N/A");

    assert_eq!(page.sources.len(), 2);
    assert_eq!(page.sources[0].uri, "https://directory.example/dentists");
    assert_eq!(
        page.sources[1].uri,
        "https://www.google.com/maps/place/?q=place_id:ChIJabc"
    );
    assert!(page.raw_text.contains("Sorriso Dental"));
}

#[tokio::test]
async fn fetch_page_sends_page_specific_prompt_and_temperature() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_string_contains("LEAD SEARCH - BATCH 2"))
        .and(body_partial_json(json!({
            "generationConfig": { "temperature": 0.9 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(table_response(TWO_ROW_TABLE)))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client(&server).fetch_page("dentists", None, 2).await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn fetch_page_sends_location_bias_when_known() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_partial_json(json!({
            "toolConfig": {
                "retrievalConfig": {
                    "latLng": { "latitude": -23.5, "longitude": -46.625 }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(table_response(TWO_ROW_TABLE)))
        .expect(1)
        .mount(&server)
        .await;

    let location = GeoPoint::new(-23.5, -46.625);
    let result = test_client(&server)
        .fetch_page("dentists", location, 1)
        .await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn fetch_page_without_candidates_yields_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let page = test_client(&server)
        .fetch_page("dentists", None, 1)
        .await
        .expect("empty response is not an error");

    assert!(page.contacts.is_empty());
    assert!(page.sources.is_empty());
    assert!(page.raw_text.is_empty());
}

#[tokio::test]
async fn fetch_page_with_prose_only_yields_no_contacts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(table_response("Sorry, I could not find any businesses.")),
        )
        .mount(&server)
        .await;

    let page = test_client(&server)
        .fetch_page("dentists", None, 1)
        .await
        .expect("prose response is not an error");

    assert!(page.contacts.is_empty());
    assert_eq!(page.sources.len(), 2);
}

// ---------------------------------------------------------------------------
// Error paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_page_maps_429_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "17"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_page("dentists", None, 1)
        .await
        .unwrap_err();

    assert!(
        matches!(err, GeminiError::RateLimited { retry_after_secs: 17 }),
        "expected RateLimited(17), got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_page_maps_google_error_body_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_page("dentists", None, 1)
        .await
        .unwrap_err();

    match err {
        GeminiError::Api { status, message } => {
            assert_eq!(status, 400);
            assert!(message.starts_with("INVALID_ARGUMENT: API key not valid"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_page_maps_plain_5xx_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_page("dentists", None, 1)
        .await
        .unwrap_err();

    assert!(
        matches!(err, GeminiError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_page_maps_malformed_body_to_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_page("dentists", None, 3)
        .await
        .unwrap_err();

    match err {
        GeminiError::Deserialize { context, .. } => assert!(context.contains("page 3")),
        other => panic!("expected Deserialize error, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_page_makes_a_single_attempt_on_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client(&server).fetch_page("dentists", None, 1).await;
    assert!(result.is_err());
}
