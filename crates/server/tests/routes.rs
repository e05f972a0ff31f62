use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::json;
use std::sync::{Arc, Mutex};
use unstuck_common::{AppConfig, Result};
use unstuck_llm::{GenerateRequest, LlmClient, ModelClient, ModelSet, UnstuckPipeline};
use unstuck_server::types::{HealthResponse, PlanApiResponse};
use unstuck_server::{configure, AppState};

const BOUNDARY: &str = "unstuck-test-boundary";
const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
const PLAN: &str = "1) Pick one chapter\n2) Set a timer\n3) Write\n4) Rest\n5) Repeat\n\nTip: Small steps count.";

/// Answers every call with the same text and counts calls
struct FixedBackend {
    answer: String,
    calls: Mutex<Vec<GenerateRequest>>,
}

#[async_trait]
impl LlmClient for FixedBackend {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        self.calls.lock().unwrap().push(request);
        Ok(self.answer.clone())
    }
}

fn state_with(backend: Option<Arc<FixedBackend>>) -> web::Data<Arc<AppState>> {
    state_with_config(backend, AppConfig::default())
}

fn state_with_config(backend: Option<Arc<FixedBackend>>, config: AppConfig) -> web::Data<Arc<AppState>> {
    let backend = backend.map(|b| b as Arc<dyn LlmClient>);
    let client = ModelClient::new(backend, ModelSet::new("models/text", "models/image"));
    let pipeline = UnstuckPipeline::new(Arc::new(client));
    web::Data::new(Arc::new(AppState::new(config, pipeline)))
}

fn small_upload_limit() -> AppConfig {
    AppConfig {
        upload_limit_bytes: 16,
        ..AppConfig::default()
    }
}

fn fixed_backend() -> Arc<FixedBackend> {
    Arc::new(FixedBackend {
        answer: PLAN.to_string(),
        calls: Mutex::new(Vec::new()),
    })
}

fn multipart_body(text: Option<&str>, image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(text) = text {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"text\"\r\n\r\n{text}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn form_request(body: Vec<u8>) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/help")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

#[actix_web::test]
async fn test_health_reports_unconfigured() {
    let app = test::init_service(App::new().app_data(state_with(None)).configure(configure)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp: HealthResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.status, "ok");
    assert!(!resp.ai_configured);
}

#[actix_web::test]
async fn test_index_renders_form() {
    let app = test::init_service(App::new().app_data(state_with(None)).configure(configure)).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = String::from_utf8_lossy(&body);

    assert!(html.contains(r#"enctype="multipart/form-data""#));
    assert!(html.contains("Get Help"));
}

#[actix_web::test]
async fn test_api_plan_without_key_returns_sentinel() {
    let app = test::init_service(App::new().app_data(state_with(None)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/plan")
        .set_json(json!({"text": "I keep procrastinating on my thesis"}))
        .to_request();
    let resp: PlanApiResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.answer, "AI unavailable.");
}

#[actix_web::test]
async fn test_api_plan_returns_polished_answer() {
    let backend = fixed_backend();
    let app = test::init_service(
        App::new()
            .app_data(state_with(Some(backend.clone())))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/plan")
        .set_json(json!({"text": "stuck", "category": "general"}))
        .to_request();
    let resp: PlanApiResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.answer, PLAN);
    assert_eq!(backend.calls.lock().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_api_plan_rejects_empty_submission() {
    let app = test::init_service(App::new().app_data(state_with(None)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/plan")
        .set_json(json!({"text": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Please type something or upload an image.");
}

#[actix_web::test]
async fn test_api_plan_rejects_bad_base64() {
    let app = test::init_service(App::new().app_data(state_with(None)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/plan")
        .set_json(json!({"text": "hi", "image_base64": "%%% not base64 %%%"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_form_renders_answer_with_line_breaks() {
    let backend = fixed_backend();
    let app = test::init_service(
        App::new()
            .app_data(state_with(Some(backend.clone())))
            .configure(configure),
    )
    .await;

    let req = form_request(multipart_body(Some("I <3 naps"), None)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("I &lt;3 naps"));
    assert!(html.contains("1) Pick one chapter<br>2) Set a timer"));
    assert!(html.contains("<br><br>Tip: Small steps count."));
    assert_eq!(backend.calls.lock().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_form_with_image_describes_it_first() {
    let backend = fixed_backend();
    let app = test::init_service(
        App::new()
            .app_data(state_with(Some(backend.clone())))
            .configure(configure),
    )
    .await;

    let req = form_request(multipart_body(Some(""), Some(("desk.png", PNG)))).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let calls = backend.calls.lock().unwrap();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].model, "models/image");
    assert!(calls[0].has_inline_data());
}

#[actix_web::test]
async fn test_form_rejects_empty_submission() {
    let app = test::init_service(App::new().app_data(state_with(None)).configure(configure)).await;

    let req = form_request(multipart_body(Some("  "), Some(("", &b""[..])))).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("Please type something or upload an image."));
}

#[actix_web::test]
async fn test_form_rejects_non_image_upload() {
    let app = test::init_service(App::new().app_data(state_with(None)).configure(configure)).await;

    let req = form_request(multipart_body(Some("hi"), Some(("notes.txt", &b"just text"[..])))).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_form_rejects_oversized_upload() {
    let backend = fixed_backend();
    let app = test::init_service(
        App::new()
            .app_data(state_with_config(Some(backend.clone()), small_upload_limit()))
            .configure(configure),
    )
    .await;

    let image = [PNG, &[0u8; 100][..]].concat();
    let req = form_request(multipart_body(Some("hi"), Some(("desk.png", &image[..])))).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(backend.calls.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_api_plan_rejects_oversized_image() {
    let backend = fixed_backend();
    let app = test::init_service(
        App::new()
            .app_data(state_with_config(Some(backend.clone()), small_upload_limit()))
            .configure(configure),
    )
    .await;

    let image = [PNG, &[0u8; 100][..]].concat();
    let req = test::TestRequest::post()
        .uri("/api/plan")
        .set_json(json!({"text": "hi", "image_base64": BASE64.encode(&image)}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(backend.calls.lock().unwrap().is_empty());
}
