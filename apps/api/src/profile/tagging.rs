use serde_json::Value;

use crate::llm_client::prompts::fill;
use crate::llm_client::{complete_json, CompletionBackend, CompletionOptions, LlmError};
use crate::profile::prompts::{TAG_ASSIGNMENT_PROMPT, TAG_CATALOGUE};

pub fn build_tagging_prompt(about: &str) -> String {
    let tags = TAG_CATALOGUE.join(", ");
    fill(
        TAG_ASSIGNMENT_PROMPT,
        &[("about", about), ("tags", tags.as_str())],
    )
}

/// Asks the model for the catalogue tags that best describe a student.
/// The reply is relayed as-is; tags outside the catalogue are not filtered.
pub async fn assign_tags(llm: &dyn CompletionBackend, about: &str) -> Result<Value, LlmError> {
    let prompt = build_tagging_prompt(about);
    complete_json(llm, &prompt, &CompletionOptions::TAG_ASSIGNMENT).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_description_and_catalogue() {
        let prompt = build_tagging_prompt("I love painting and building websites.");
        assert!(prompt.contains("Student Description:\nI love painting and building websites."));
        assert!(prompt.contains("Programming, Data Science, Machine Learning"));
        assert!(prompt.contains("Psychology, Philosophy."));
    }
}
