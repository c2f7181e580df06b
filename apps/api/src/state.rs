use std::sync::Arc;

use crate::courses::resolver::RecommendationResolver;
use crate::documents::DocumentSource;
use crate::llm_client::CompletionBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. `LlmClient` in production, stubs in tests.
    pub llm: Arc<dyn CompletionBackend>,
    /// PDF fetcher used by the grading endpoint.
    pub documents: Arc<dyn DocumentSource>,
    /// Course ranker, built on the same completion backend.
    pub recommender: Arc<RecommendationResolver>,
}

impl AppState {
    pub fn new(llm: Arc<dyn CompletionBackend>, documents: Arc<dyn DocumentSource>) -> Self {
        let recommender = Arc::new(RecommendationResolver::new(llm.clone()));
        Self {
            llm,
            documents,
            recommender,
        }
    }
}
