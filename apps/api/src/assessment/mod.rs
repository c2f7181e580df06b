// Assessment: assignment grading from PDFs, quiz generation and answer feedback.
// All LLM calls go through llm_client.

pub mod grading;
pub mod handlers;
pub mod prompts;
pub mod quiz;
