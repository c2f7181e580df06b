//! Axum route handlers for grading and quizzes.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::assessment::grading::grade_document;
use crate::assessment::quiz::{generate_quiz, quiz_feedback, AnsweredQuestion, QuestionItem};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    pub pdf_url: Option<String>,
    pub criteria: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizFeedbackRequest {
    pub questions: Option<Vec<QuestionItem>>,
}

#[derive(Debug, Serialize)]
pub struct QuizFeedbackResponse {
    pub feedback: Vec<Value>,
}

fn missing(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}

/// POST /grade
///
/// Downloads the PDF at `pdf_url`, grades it against `criteria` and relays the model JSON.
pub async fn handle_grade(
    State(state): State<AppState>,
    payload: Result<Json<GradeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    const REQUIRED: &str = "Missing 'pdf_url' or 'criteria' in the request.";

    let Json(request) = payload.map_err(|_| missing(REQUIRED))?;
    let (Some(pdf_url), Some(criteria)) = (request.pdf_url, request.criteria) else {
        return Err(missing(REQUIRED));
    };
    if criteria.is_empty() {
        return Err(missing("'criteria' must list at least one criterion."));
    }

    let graded = grade_document(
        state.llm.as_ref(),
        state.documents.as_ref(),
        &pdf_url,
        &criteria,
    )
    .await?;

    Ok(Json(graded))
}

/// POST /quiz
pub async fn handle_quiz(
    State(state): State<AppState>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    const REQUIRED: &str = "Missing 'description' in the request.";

    let Json(request) = payload.map_err(|_| missing(REQUIRED))?;
    let description = request.description.ok_or_else(|| missing(REQUIRED))?;

    let quiz = generate_quiz(state.llm.as_ref(), &description).await?;
    Ok(Json(quiz))
}

/// POST /quiz/feedback
///
/// Every question is validated before the first model call, so a bad item
/// never leaves earlier feedback requests half done.
pub async fn handle_quiz_feedback(
    State(state): State<AppState>,
    payload: Result<Json<QuizFeedbackRequest>, JsonRejection>,
) -> Result<Json<QuizFeedbackResponse>, AppError> {
    const REQUIRED: &str = "Missing required fields in the request.";

    let Json(request) = payload.map_err(|_| missing(REQUIRED))?;
    let questions = request.questions.ok_or_else(|| missing(REQUIRED))?;

    let answered = questions
        .into_iter()
        .map(QuestionItem::validate)
        .collect::<Option<Vec<AnsweredQuestion>>>()
        .ok_or_else(|| missing("Missing fields in one or more question items."))?;

    let feedback = quiz_feedback(state.llm.as_ref(), &answered).await?;
    Ok(Json(QuizFeedbackResponse { feedback }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::llm_client::CompletionOptions;
    use crate::test_support::{post_json, post_raw, ScriptedBackend, StubDocuments, TestApp};

    #[tokio::test]
    async fn test_grade_relays_model_json() {
        let reply = json!({"grade": 8, "clarity": "Clear and concise."});
        let app = TestApp::with_documents(
            ScriptedBackend::new(vec![Ok(reply.to_string())]),
            StubDocuments::Text("Photosynthesis converts light.".into()),
        );

        let (status, body) = post_json(
            &app,
            "/grade",
            json!({"pdf_url": "https://files.example/a.pdf", "criteria": ["clarity"]}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, reply);
        assert!(app.llm.prompts()[0].contains("Photosynthesis converts light."));
        assert_eq!(app.llm.options()[0], CompletionOptions::GRADING);
    }

    #[tokio::test]
    async fn test_grade_missing_criteria() {
        let app = TestApp::new(ScriptedBackend::new(vec![]));

        let (status, body) =
            post_json(&app, "/grade", json!({"pdf_url": "https://files.example/a.pdf"})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "Missing 'pdf_url' or 'criteria' in the request."})
        );
    }

    #[tokio::test]
    async fn test_grade_download_failure() {
        let app = TestApp::with_documents(ScriptedBackend::new(vec![]), StubDocuments::NotFound);

        let (status, body) = post_json(
            &app,
            "/grade",
            json!({"pdf_url": "https://files.example/missing.pdf", "criteria": ["clarity"]}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to download PDF:"));
        assert_eq!(app.llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_grade_extraction_failure() {
        let app = TestApp::with_documents(ScriptedBackend::new(vec![]), StubDocuments::Corrupt);

        let (status, body) = post_json(
            &app,
            "/grade",
            json!({"pdf_url": "https://files.example/scan.pdf", "criteria": ["clarity"]}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to extract text from PDF:"));
    }

    #[tokio::test]
    async fn test_quiz_invalid_model_json() {
        let app = TestApp::new(ScriptedBackend::new(vec![Ok("quiz: [".to_string())]));

        let (status, body) =
            post_json(&app, "/quiz", json!({"description": "Photosynthesis basics"})).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Response is not valid JSON."}));
    }

    #[tokio::test]
    async fn test_quiz_unparseable_body_is_bad_request() {
        let app = TestApp::new(ScriptedBackend::new(vec![]));

        let (status, body) = post_raw(&app, "/quiz", "{description:").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing 'description' in the request.");
    }

    #[tokio::test]
    async fn test_quiz_feedback_one_call_per_question() {
        let app = TestApp::new(ScriptedBackend::new(vec![
            Ok(r#"{"feedback": "Correct, well done."}"#.to_string()),
            Ok(r#"{"feedback": "Not quite; review fractions."}"#.to_string()),
        ]));
        let questions = json!([
            {"question": "1/2 + 1/2?", "options": {"a": "1", "b": "2"}, "answer": "a", "user_answer": "a"},
            {"question": "1/3 + 1/3?", "options": {"a": "2/3", "b": "2/6"}, "answer": "a", "user_answer": "b"}
        ]);

        let (status, body) =
            post_json(&app, "/quiz/feedback", json!({"questions": questions})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"feedback": [
                {"feedback": "Correct, well done."},
                {"feedback": "Not quite; review fractions."}
            ]})
        );
        assert_eq!(app.llm.calls(), 2);
        assert!(app
            .llm
            .options()
            .iter()
            .all(|o| *o == CompletionOptions::QUIZ_FEEDBACK));
    }

    #[tokio::test]
    async fn test_quiz_feedback_validates_before_calling_model() {
        let app = TestApp::new(ScriptedBackend::new(vec![]));
        let questions = json!([
            {"question": "ok?", "options": {"a": "yes"}, "answer": "a", "user_answer": "a"},
            {"question": "missing answer", "options": {"a": "yes"}}
        ]);

        let (status, body) =
            post_json(&app, "/quiz/feedback", json!({"questions": questions})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing fields in one or more question items.");
        assert_eq!(app.llm.calls(), 0);
    }
}
