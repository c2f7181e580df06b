//! Test doubles and request helpers shared by handler tests.

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use crate::documents::{DocumentError, DocumentSource};
use crate::llm_client::{CompletionBackend, CompletionOptions, LlmError};
use crate::routes::build_router;
use crate::state::AppState;

/// Completion backend that replays scripted replies in order and records every call.
/// Once the script runs out, calls fail with a 503 API error.
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
    options: Mutex<Vec<CompletionOptions>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
            options: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn options(&self) -> Vec<CompletionOptions> {
        self.options.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.options.lock().unwrap().push(*options);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::Api {
                status: 503,
                message: "no scripted reply".to_string(),
            }))
    }
}

/// Document source with a fixed outcome.
pub enum StubDocuments {
    Text(String),
    NotFound,
    Corrupt,
}

#[async_trait]
impl DocumentSource for StubDocuments {
    async fn fetch_text(&self, _url: &str) -> Result<String, DocumentError> {
        match self {
            StubDocuments::Text(text) => Ok(text.clone()),
            StubDocuments::NotFound => Err(DocumentError::Status(404)),
            StubDocuments::Corrupt => Err(DocumentError::Extract("invalid file header".into())),
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub llm: Arc<ScriptedBackend>,
}

impl TestApp {
    pub fn new(llm: Arc<ScriptedBackend>) -> Self {
        Self::with_documents(llm, StubDocuments::Text("Essay on photosynthesis.".into()))
    }

    pub fn with_documents(llm: Arc<ScriptedBackend>, documents: StubDocuments) -> Self {
        let state = AppState::new(llm.clone(), Arc::new(documents));
        Self {
            router: build_router(state),
            llm,
        }
    }
}

pub async fn post_json(app: &TestApp, path: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, path, &body.to_string()).await
}

pub async fn post_raw(app: &TestApp, path: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
