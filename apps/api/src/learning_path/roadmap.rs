//! Roadmap generation and module suggestions.
//!
//! Both relay model JSON untouched. Malformed output is reported with a
//! feature-specific message; the roadmap also returns the raw text for debugging.

use serde_json::Value;

use crate::errors::{AppError, INVALID_JSON_MESSAGE};
use crate::learning_path::prompts::{MODULE_SUGGESTIONS_PROMPT, ROADMAP_PROMPT};
use crate::llm_client::prompts::fill;
use crate::llm_client::{parse_json_output, CompletionBackend, CompletionOptions};

pub const SUGGESTIONS_INVALID_JSON_MESSAGE: &str = "Response from AI model is not valid JSON.";

/// Inputs for per-module study suggestions.
#[derive(Debug, Clone)]
pub struct SuggestionInput<'a> {
    pub modules: &'a [String],
    /// Fraction of the course passed, 0.0 – 1.0.
    pub performance: f64,
    pub student_id: &'a str,
    pub course_id: &'a str,
}

pub async fn generate_roadmap(
    llm: &dyn CompletionBackend,
    description: &str,
) -> Result<Value, AppError> {
    let prompt = fill(ROADMAP_PROMPT, &[("description", description)]);
    let raw = llm.complete(&prompt, &CompletionOptions::ROADMAP).await?;

    match parse_json_output(&raw) {
        Ok(roadmap) => Ok(roadmap),
        Err(_) => Err(AppError::MalformedModelOutput {
            message: INVALID_JSON_MESSAGE,
            attempted_response: Some(raw),
        }),
    }
}

pub fn build_suggestions_prompt(input: &SuggestionInput<'_>) -> String {
    let performance = format!("{:.2}", input.performance * 100.0);
    let modules = input.modules.join(", ");
    fill(
        MODULE_SUGGESTIONS_PROMPT,
        &[
            ("performance", performance.as_str()),
            ("course_id", input.course_id),
            ("student_id", input.student_id),
            ("modules", modules.as_str()),
        ],
    )
}

pub async fn generate_module_suggestions(
    llm: &dyn CompletionBackend,
    input: &SuggestionInput<'_>,
) -> Result<Value, AppError> {
    let prompt = build_suggestions_prompt(input);
    let raw = llm
        .complete(&prompt, &CompletionOptions::MODULE_SUGGESTIONS)
        .await?;

    parse_json_output(&raw).map_err(|_| AppError::MalformedModelOutput {
        message: SUGGESTIONS_INVALID_JSON_MESSAGE,
        attempted_response: None,
    })
}
