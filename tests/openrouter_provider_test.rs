//! OpenRouter provider fixtures-style tests.
//!
//! Validates request shape, identification headers, and response
//! extraction for both operations against a mock gateway.

use mimic_ai::MimicConfig;
use mimic_ai::error::MimicError;
use mimic_ai::provider::{InferenceProvider, OpenRouterProvider};
use mimic_ai::types::{ProductDetails, SourceAsset};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn analysis_json() -> serde_json::Value {
    serde_json::json!({
        "visualStyle": "minimalist studio",
        "sellingPoints": "aspirational desk setup",
        "composition": "centered, eye level",
        "lightingAndMood": "soft warm key light",
        "suggestedPrompt": "studio product shot, warm lighting",
        "adCopy": "Work better. Sit taller."
    })
}

fn chat_response_with_content(content: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
}

fn test_provider(server: &MockServer) -> OpenRouterProvider {
    let config = MimicConfig::openrouter("test-key").with_base_url(server.uri());
    OpenRouterProvider::new(config)
}

fn test_asset() -> SourceAsset {
    SourceAsset::new(b"fakeimagebytes".to_vec(), "image/png")
}

fn test_details() -> ProductDetails {
    ProductDetails::new("Bamboo Stand", "Ergonomic laptop riser", "Remote workers")
}

#[tokio::test]
async fn analyze_request_shape_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("x-title", "Mimic AI"))
        .and(header("http-referer", "http://localhost"))
        .and(|req: &Request| {
            let Ok(v) = serde_json::from_slice::<serde_json::Value>(&req.body) else {
                return false;
            };
            if v["model"] != serde_json::json!("openai/gpt-4o-mini") {
                return false;
            }
            if v["temperature"] != serde_json::json!(0.2) {
                return false;
            }
            if v["response_format"]["type"] != serde_json::json!("json_object") {
                return false;
            }
            let parts = v["messages"][0]["content"].as_array().cloned().unwrap_or_default();
            let has_prompt = parts.iter().any(|p| {
                p["type"] == "text"
                    && p["text"].as_str().is_some_and(|t| t.contains("Bamboo Stand"))
            });
            let has_image = parts.iter().any(|p| {
                p["type"] == "image_url"
                    && p["image_url"]["url"]
                        .as_str()
                        .is_some_and(|u| u.starts_with("data:image/png;base64,"))
            });
            has_prompt && has_image
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response_with_content(
            serde_json::Value::String(analysis_json().to_string()),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_provider(&server)
        .analyze(&test_asset(), &test_details())
        .await
        .expect("analyze ok");

    assert_eq!(serde_json::to_value(&result).unwrap(), analysis_json());
}

#[tokio::test]
async fn analyze_strips_fenced_json() {
    let server = MockServer::start().await;
    let fenced = format!("```json\n{}\n```", analysis_json());
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response_with_content(
            serde_json::Value::String(fenced),
        )))
        .mount(&server)
        .await;

    let result = test_provider(&server)
        .analyze(&test_asset(), &test_details())
        .await
        .expect("analyze ok");

    assert_eq!(result.suggested_prompt, "studio product shot, warm lighting");
}

#[tokio::test]
async fn analyze_reads_content_part_arrays() {
    let server = MockServer::start().await;
    let content = serde_json::json!([
        {"type": "text", "text": analysis_json().to_string()}
    ]);
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response_with_content(content)))
        .mount(&server)
        .await;

    let result = test_provider(&server)
        .analyze(&test_asset(), &test_details())
        .await
        .expect("analyze ok");

    assert_eq!(result.ad_copy, "Work better. Sit taller.");
}

#[tokio::test]
async fn analyze_empty_choices_is_a_content_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&server)
        .await;

    let err = test_provider(&server)
        .analyze(&test_asset(), &test_details())
        .await
        .unwrap_err();

    assert!(matches!(err, MimicError::ContentError(_)));
}

#[tokio::test]
async fn analyze_unparseable_text_is_a_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response_with_content(
            serde_json::Value::String("I cannot return JSON, sorry.".to_string()),
        )))
        .mount(&server)
        .await;

    let err = test_provider(&server)
        .analyze(&test_asset(), &test_details())
        .await
        .unwrap_err();

    assert!(matches!(err, MimicError::JsonError(_)));
}

#[tokio::test]
async fn http_error_surfaces_status_and_body_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(402).set_body_json(serde_json::json!({
            "error": {"message": "Insufficient credits"}
        })))
        .mount(&server)
        .await;

    let err = test_provider(&server)
        .analyze(&test_asset(), &test_details())
        .await
        .unwrap_err();

    match err {
        MimicError::ApiError { code, message, .. } => {
            assert_eq!(code, 402);
            assert_eq!(message, "Insufficient credits");
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn http_error_with_unreadable_body_still_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = test_provider(&server).generate("a prompt").await.unwrap_err();

    match err {
        MimicError::ApiError { code, message, .. } => {
            assert_eq!(code, 500);
            assert_eq!(message, "Unknown OpenRouter error");
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn generate_requests_image_modality_and_extracts_b64() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(|req: &Request| {
            let Ok(v) = serde_json::from_slice::<serde_json::Value>(&req.body) else {
                return false;
            };
            v["model"] == serde_json::json!("bytedance-seed/seedream-4.5")
                && v["modalities"] == serde_json::json!(["image"])
                && v["messages"][0]["content"] == serde_json::json!("studio product shot, warm lighting")
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"images": [{"b64_json": "abcd", "mimeType": "image/jpeg"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let image = test_provider(&server)
        .generate("studio product shot, warm lighting")
        .await
        .expect("generate ok");

    assert_eq!(image, "data:image/jpeg;base64,abcd");
}

#[tokio::test]
async fn generate_with_no_image_is_a_content_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response_with_content(
            serde_json::Value::String("Here is a description instead of an image.".to_string()),
        )))
        .mount(&server)
        .await;

    let err = test_provider(&server).generate("a prompt").await.unwrap_err();

    match err {
        MimicError::ContentError(message) => {
            assert!(message.contains("no usable image data"));
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn missing_api_key_fails_before_any_request() {
    let server = MockServer::start().await;
    let config = MimicConfig::openrouter("").with_base_url(server.uri());
    let provider = OpenRouterProvider::new(config);

    let err = provider
        .analyze(&test_asset(), &test_details())
        .await
        .unwrap_err();

    assert!(matches!(err, MimicError::ConfigurationError(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
