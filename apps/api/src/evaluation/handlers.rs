//! JSON endpoint for programmatic clients. Same multipart fields as the form.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::evaluation::form::read_form;
use crate::evaluation::{evaluate_resume, EvaluationOutcome, MISSING_RESUME_MESSAGE};
use crate::state::AppState;

/// POST /api/v1/evaluate
pub async fn handle_evaluate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EvaluationOutcome>, AppError> {
    let form = read_form(multipart).await?;

    let evaluation = form.evaluation.ok_or_else(|| {
        AppError::Validation("action is required: 'review' or 'percentage_match'".to_string())
    })?;
    let resume = form
        .resume
        .ok_or_else(|| AppError::Validation(MISSING_RESUME_MESSAGE.to_string()))?;

    let outcome = evaluate_resume(&state, &form.job_description, resume.bytes, evaluation).await?;

    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use tower::ServiceExt;

    use crate::routes::build_router;
    use crate::testing::{multipart_request, test_state, MockGemini, StubRasterizer, SAMPLE_PDF};

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_evaluate_returns_model_text() {
        let mock = MockGemini::spawn_replying("The candidate is a strong fit.").await;
        let app = build_router(test_state(&mock.base_url, Arc::new(StubRasterizer::new())));

        let response = app
            .oneshot(multipart_request(
                "/api/v1/evaluate",
                &[
                    ("job_description", None, b"Platform engineer"),
                    ("resume", Some("cv.pdf"), SAMPLE_PDF),
                    ("action", None, b"review"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["evaluation"], "review");
        assert_eq!(body["response"], "The candidate is a strong fit.");
    }

    #[tokio::test]
    async fn test_missing_resume_is_bad_request() {
        let mock = MockGemini::spawn_replying("unused").await;
        let app = build_router(test_state(&mock.base_url, Arc::new(StubRasterizer::new())));

        let response = app
            .oneshot(multipart_request(
                "/api/v1/evaluate",
                &[
                    ("job_description", None, b"Platform engineer"),
                    ("action", None, b"percentage_match"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Please upload the resume");
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_action_is_bad_request() {
        let mock = MockGemini::spawn_replying("unused").await;
        let app = build_router(test_state(&mock.base_url, Arc::new(StubRasterizer::new())));

        let response = app
            .oneshot(multipart_request(
                "/api/v1/evaluate",
                &[("resume", Some("cv.pdf"), SAMPLE_PDF)],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_pdf_upload_is_unprocessable() {
        let mock = MockGemini::spawn_replying("unused").await;
        let app = build_router(test_state(&mock.base_url, Arc::new(StubRasterizer::new())));

        let response = app
            .oneshot(multipart_request(
                "/api/v1/evaluate",
                &[
                    ("resume", Some("cv.docx"), b"PK\x03\x04"),
                    ("action", None, b"review"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
