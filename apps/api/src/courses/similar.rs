//! Similar course discovery on external learning platforms.

use serde_json::Value;

use crate::courses::prompts::SIMILAR_COURSES_PROMPT;
use crate::llm_client::prompts::fill;
use crate::llm_client::{complete_json, CompletionBackend, CompletionOptions, LlmError};

/// Asks the model for courses similar to the given one. A reply without a
/// `similarCourses` key yields an empty list.
pub async fn find_similar_courses(
    llm: &dyn CompletionBackend,
    title: &str,
    description: &str,
) -> Result<Value, LlmError> {
    let prompt = fill(
        SIMILAR_COURSES_PROMPT,
        &[("title", title), ("description", description)],
    );
    let response: Value = complete_json(llm, &prompt, &CompletionOptions::SIMILAR_COURSES).await?;

    Ok(response
        .get("similarCourses")
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new())))
}
