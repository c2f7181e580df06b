//! Axum route handlers for student profiling.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::profile::tagging::assign_tags;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AssignTagsRequest {
    pub about: Option<String>,
}

/// POST /assign-student-tags
pub async fn handle_assign_tags(
    State(state): State<AppState>,
    payload: Result<Json<AssignTagsRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let required = || AppError::Validation("Missing 'about' in the request.".to_string());

    let Json(request) = payload.map_err(|_| required())?;
    let about = request.about.ok_or_else(required)?;

    let tags = assign_tags(state.llm.as_ref(), &about).await?;
    Ok(Json(tags))
}
