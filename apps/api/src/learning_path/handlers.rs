//! Axum route handlers for roadmaps and module suggestions.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::learning_path::roadmap::{
    generate_module_suggestions, generate_roadmap, SuggestionInput,
};
use crate::llm_client::prompts::display_json;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RoadmapRequest {
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ModuleSuggestionsRequest {
    pub modules: Option<Vec<String>>,
    pub performance: Option<f64>,
    pub student_id: Option<Value>,
    pub course_id: Option<Value>,
}

/// POST /roadmap
pub async fn handle_roadmap(
    State(state): State<AppState>,
    payload: Result<Json<RoadmapRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let required = || AppError::Validation("Missing 'description' in the request.".to_string());

    let Json(request) = payload.map_err(|_| required())?;
    let description = request.description.ok_or_else(required)?;

    let roadmap = generate_roadmap(state.llm.as_ref(), &description).await?;
    Ok(Json(roadmap))
}

/// POST /generate-module-suggestions
///
/// `student_id` and `course_id` are optional and shown to the model as "unknown" when absent.
pub async fn handle_module_suggestions(
    State(state): State<AppState>,
    payload: Result<Json<ModuleSuggestionsRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let required = || AppError::Validation("Missing required fields in the request.".to_string());

    let Json(request) = payload.map_err(|_| required())?;
    let (Some(modules), Some(performance)) = (request.modules, request.performance) else {
        return Err(required());
    };

    let student_id = id_or_unknown(request.student_id);
    let course_id = id_or_unknown(request.course_id);
    tracing::debug!(%student_id, %course_id, performance, "Generating module suggestions");

    let suggestions = generate_module_suggestions(
        state.llm.as_ref(),
        &SuggestionInput {
            modules: &modules,
            performance,
            student_id: &student_id,
            course_id: &course_id,
        },
    )
    .await?;

    Ok(Json(suggestions))
}

fn id_or_unknown(id: Option<Value>) -> String {
    id.map(|v| display_json(&v))
        .unwrap_or_else(|| "unknown".to_string())
}
