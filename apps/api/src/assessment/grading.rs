//! Assignment grading: PDF text plus a list of criteria in, model grade out.

use serde_json::Value;

use crate::assessment::prompts::GRADING_PROMPT;
use crate::documents::DocumentSource;
use crate::errors::AppError;
use crate::llm_client::prompts::{fill, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{complete_json, CompletionBackend, CompletionOptions};

/// Builds the grading prompt, asking for one description line per criterion.
pub fn build_grading_prompt(criteria: &[String], text: &str) -> String {
    let criteria_format = criteria
        .iter()
        .map(|c| {
            format!(
                "    {}: \"Description for criterion {}\"",
                Value::String(c.clone()),
                c.replace('"', "'")
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    let prompt = fill(
        GRADING_PROMPT,
        &[
            ("criteria", criteria.join(", ").as_str()),
            ("criteria_format", criteria_format.as_str()),
            ("text", text),
        ],
    );
    format!("{prompt}\n\n{JSON_ONLY_INSTRUCTION}")
}

/// Fetches the assignment PDF and asks the model to grade it.
pub async fn grade_document(
    llm: &dyn CompletionBackend,
    documents: &dyn DocumentSource,
    pdf_url: &str,
    criteria: &[String],
) -> Result<Value, AppError> {
    let text = documents.fetch_text(pdf_url).await?;
    let prompt = build_grading_prompt(criteria, &text);
    let graded: Value = complete_json(llm, &prompt, &CompletionOptions::GRADING).await?;
    Ok(graded)
}
