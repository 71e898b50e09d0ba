//! Axum route handlers for the CV analysis API.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::analysis::analyzer::analyze_cv;
use crate::analysis::industries::INDUSTRIES;
use crate::analysis::models::CvAnalysis;
use crate::errors::AppError;
use crate::intake::Submission;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: CvAnalysis,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeStatusResponse {
    pub state: &'static str,
}

#[derive(Debug, Serialize)]
pub struct IndustriesResponse {
    pub industries: Vec<&'static str>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Accepts multipart fields `file`, `text`, and `industry`; resolves them to
/// the analysis text and runs one model call. At most one analysis is in
/// flight at a time; concurrent submissions get 409 without a model call.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let submission = Submission::from_multipart(&mut multipart).await?;

    // Held for the duration of the model call; released on every exit path.
    let _permit = state.analysis_gate.try_begin().ok_or(AppError::Busy)?;

    let content = submission.resolve_content()?;
    info!(
        chars = content.chars().count(),
        industry = submission.desired_industry.as_deref().unwrap_or("-"),
        "starting CV analysis"
    );

    let analysis = analyze_cv(&content, submission.desired_industry.as_deref(), &state.llm).await?;

    Ok(Json(AnalyzeResponse { analysis }))
}

/// GET /api/v1/analyze/status
///
/// Reports whether an analysis is currently in flight (`loading`) or not
/// (`idle`). Lets a client disable its submit control.
pub async fn handle_analyze_status(State(state): State<AppState>) -> Json<AnalyzeStatusResponse> {
    let state_label = if state.analysis_gate.is_busy() {
        "loading"
    } else {
        "idle"
    };
    Json(AnalyzeStatusResponse { state: state_label })
}

/// GET /api/v1/industries
///
/// The fixed desired-industry list for the submission form.
pub async fn handle_list_industries() -> Json<IndustriesResponse> {
    Json(IndustriesResponse {
        industries: INDUSTRIES.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::PLACEHOLDER_CV;
    use crate::llm_client::GeminiClient;
    use crate::routes::build_router;
    use crate::state::AnalysisGate;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BOUNDARY: &str = "cv-insight-test-boundary";

    fn test_state(base_url: String) -> AppState {
        AppState {
            llm: GeminiClient::with_base_url("test-key".to_string(), base_url),
            analysis_gate: AnalysisGate::new(),
        }
    }

    fn text_part(name: &str, value: &str) -> String {
        format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
    }

    fn file_part(filename: &str, content_type: &str, content: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n{content}\r\n"
        )
    }

    fn analyze_request(parts: &[String]) -> Request<Body> {
        let body = format!("{}--{BOUNDARY}--\r\n", parts.concat());
        Request::builder()
            .method("POST")
            .uri("/api/v1/analyze")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn sample_analysis() -> Value {
        json!({
            "score": 91,
            "summary": "Senior backend engineer. Strong distributed-systems track record.",
            "strengths": ["Rust", "Kafka", "Mentoring"],
            "weaknesses": ["No frontend work", "Short tenures", "No certifications"],
            "suggestedRoles": [
                {"role": "Backend Engineer", "suitability": "Core skill match"},
                {"role": "Platform Engineer", "suitability": "Infrastructure background"},
                {"role": "Tech Lead", "suitability": "Mentoring history"}
            ]
        })
    }

    fn model_reply(analysis: &Value) -> Value {
        json!({
            "candidates": [
                {"content": {"parts": [{"text": analysis.to_string()}], "role": "model"}}
            ]
        })
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_input_never_reaches_the_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let app = build_router(test_state(server.uri()));
        let response = app
            .oneshot(analyze_request(&[text_part("text", "   ")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["error"]["code"], "MISSING_INPUT");
    }

    #[tokio::test]
    async fn test_plain_text_file_content_becomes_the_analysis_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(
                "/models/gemini-2.5-flash:generateContent".to_string(),
            ))
            .and(body_string_contains("Maria Silva, embedded engineer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(model_reply(&sample_analysis())))
            .expect(1)
            .mount(&server)
            .await;

        let app = build_router(test_state(server.uri()));
        let response = app
            .oneshot(analyze_request(&[file_part(
                "cv.txt",
                "text/plain",
                "Maria Silva, embedded engineer, 6 years C and Rust",
            )]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["analysis"], sample_analysis());
    }

    #[tokio::test]
    async fn test_pdf_without_text_substitutes_the_placeholder() {
        let placeholder_line = PLACEHOLDER_CV.lines().next().unwrap();

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains(placeholder_line))
            .respond_with(ResponseTemplate::new(200).set_body_json(model_reply(&sample_analysis())))
            .expect(1)
            .mount(&server)
            .await;

        let app = build_router(test_state(server.uri()));
        let response = app
            .oneshot(analyze_request(&[file_part(
                "cv.pdf",
                "application/pdf",
                "%PDF-1.7 binary goes here",
            )]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_pasted_text_with_industry_biases_the_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("Finance / Banking"))
            .and(body_string_contains("ten years in retail banking"))
            .respond_with(ResponseTemplate::new(200).set_body_json(model_reply(&sample_analysis())))
            .expect(1)
            .mount(&server)
            .await;

        let app = build_router(test_state(server.uri()));
        let response = app
            .oneshot(analyze_request(&[
                text_part("text", "ten years in retail banking"),
                text_part("industry", "Finance / Banking"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_industry_is_rejected_before_the_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let app = build_router(test_state(server.uri()));
        let response = app
            .oneshot(analyze_request(&[
                text_part("text", "some cv"),
                text_part("industry", "Astrology"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unsupported_file_extension_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let app = build_router(test_state(server.uri()));
        let response = app
            .oneshot(analyze_request(&[file_part(
                "cv.exe",
                "application/octet-stream",
                "MZ...",
            )]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_model_failure_surfaces_one_generic_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let app = build_router(test_state(server.uri()));
        let response = app
            .oneshot(analyze_request(&[text_part("text", "a perfectly fine cv")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response_json(response).await;
        assert_eq!(body["error"]["code"], "ANALYSIS_FAILED");
        assert!(!body["error"]["message"].as_str().unwrap().is_empty());
        // the upstream detail stays in the logs, not the response
        assert!(!body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("overloaded"));
    }

    #[tokio::test]
    async fn test_empty_model_reply_fails_the_analysis() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .expect(1)
            .mount(&server)
            .await;

        let app = build_router(test_state(server.uri()));
        let response = app
            .oneshot(analyze_request(&[text_part("text", "a cv")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response_json(response).await;
        assert_eq!(body["error"]["code"], "ANALYSIS_FAILED");
    }

    #[tokio::test]
    async fn test_submission_while_busy_gets_409_and_no_model_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let state = test_state(server.uri());
        let _held = state.analysis_gate.try_begin().unwrap();

        let app = build_router(state);
        let response = app
            .oneshot(analyze_request(&[text_part("text", "a cv")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = response_json(response).await;
        assert_eq!(body["error"]["code"], "ANALYSIS_IN_PROGRESS");
    }

    #[tokio::test]
    async fn test_status_reflects_the_gate() {
        let state = test_state("http://unused.invalid".to_string());

        let app = build_router(state.clone());
        let idle = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/analyze/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response_json(idle).await["state"], "idle");

        let _held = state.analysis_gate.try_begin().unwrap();
        let app = build_router(state.clone());
        let loading = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/analyze/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response_json(loading).await["state"], "loading");
    }

    #[tokio::test]
    async fn test_industries_endpoint_lists_the_fixed_set() {
        let app = build_router(test_state("http://unused.invalid".to_string()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/industries")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        let industries = body["industries"].as_array().unwrap();
        assert_eq!(industries.len(), 12);
        assert_eq!(industries.last().unwrap(), "Other");
    }
}
