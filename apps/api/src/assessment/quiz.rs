//! Quiz generation and per-question feedback.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::assessment::prompts::{QUIZ_FEEDBACK_PROMPT, QUIZ_PROMPT};
use crate::llm_client::prompts::{display_json, fill};
use crate::llm_client::{complete_json, CompletionBackend, CompletionOptions, LlmError};

/// A quiz question as submitted by the client, before validation.
#[derive(Debug, Deserialize)]
pub struct QuestionItem {
    pub question: Option<String>,
    pub options: Option<Value>,
    pub answer: Option<Value>,
    pub user_answer: Option<Value>,
}

/// A fully specified, answered quiz question.
#[derive(Debug, Clone, PartialEq)]
pub struct AnsweredQuestion {
    pub question: String,
    pub options: Value,
    pub answer: Value,
    pub user_answer: Value,
}

impl QuestionItem {
    /// Requires a non-empty question and options, plus non-null answers.
    pub fn validate(self) -> Option<AnsweredQuestion> {
        let question = self.question.filter(|q| !q.is_empty())?;
        let options = self.options.filter(is_truthy)?;
        Some(AnsweredQuestion {
            question,
            options,
            answer: self.answer?,
            user_answer: self.user_answer?,
        })
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

pub async fn generate_quiz(
    llm: &dyn CompletionBackend,
    description: &str,
) -> Result<Value, LlmError> {
    let prompt = fill(QUIZ_PROMPT, &[("description", description)]);
    complete_json(llm, &prompt, &CompletionOptions::QUIZ).await
}

pub fn build_feedback_prompt(item: &AnsweredQuestion) -> String {
    fill(
        QUIZ_FEEDBACK_PROMPT,
        &[
            ("question", item.question.as_str()),
            ("options", display_json(&item.options).as_str()),
            ("answer", display_json(&item.answer).as_str()),
            ("user_answer", display_json(&item.user_answer).as_str()),
        ],
    )
}

/// Requests feedback for each question in turn. Stops at the first failure.
pub async fn quiz_feedback(
    llm: &dyn CompletionBackend,
    items: &[AnsweredQuestion],
) -> Result<Vec<Value>, LlmError> {
    let mut feedback = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        debug!("Requesting feedback for question {}/{}", idx + 1, items.len());
        let prompt = build_feedback_prompt(item);
        let entry: Value = complete_json(llm, &prompt, &CompletionOptions::QUIZ_FEEDBACK).await?;
        feedback.push(entry);
    }
    Ok(feedback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> QuestionItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_complete_item_validates() {
        let answered = item(json!({
            "question": "2 + 2?",
            "options": {"a": "3", "b": "4", "c": "5", "d": "22"},
            "answer": "b",
            "user_answer": "d"
        }))
        .validate()
        .unwrap();
        assert_eq!(answered.question, "2 + 2?");
        assert_eq!(answered.user_answer, json!("d"));
    }

    #[test]
    fn test_empty_options_rejected() {
        let result = item(json!({
            "question": "2 + 2?", "options": {}, "answer": "b", "user_answer": "d"
        }))
        .validate();
        assert!(result.is_none());
    }

    #[test]
    fn test_null_user_answer_rejected() {
        let result = item(json!({
            "question": "2 + 2?", "options": {"a": "4"}, "answer": "a", "user_answer": null
        }))
        .validate();
        assert!(result.is_none());
    }

    #[test]
    fn test_empty_string_user_answer_is_still_an_answer() {
        let result = item(json!({
            "question": "2 + 2?", "options": {"a": "4"}, "answer": "a", "user_answer": ""
        }))
        .validate();
        assert!(result.is_some());
    }

    #[test]
    fn test_blank_question_rejected() {
        let result = item(json!({
            "question": "", "options": {"a": "4"}, "answer": "a", "user_answer": "a"
        }))
        .validate();
        assert!(result.is_none());
    }

    #[test]
    fn test_feedback_prompt_renders_fields() {
        let answered = AnsweredQuestion {
            question: "Capital of France?".into(),
            options: json!({"a": "Paris", "b": "Rome"}),
            answer: json!("a"),
            user_answer: json!("b"),
        };
        let prompt = build_feedback_prompt(&answered);
        assert!(prompt.contains("Question: Capital of France?"));
        assert!(prompt.contains(r#"Options: {"a":"Paris","b":"Rome"}"#));
        assert!(prompt.contains("Correct Answer: a"));
        assert!(prompt.contains("User's Answer: b"));
    }
}
