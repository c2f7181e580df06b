//! Document Source: turns a PDF URL into plain text for the grading endpoint.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{0}")]
    Download(#[from] reqwest::Error),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("{0}")]
    Extract(String),

    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Fetches a remote document and returns its extracted text.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, DocumentError>;
}

/// Downloads PDFs over HTTP and extracts their text with `pdf-extract`.
#[derive(Clone)]
pub struct HttpPdfSource {
    client: Client,
}

impl HttpPdfSource {
    pub fn new(timeout_secs: u64) -> Result<Self, DocumentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    async fn download(&self, url: &str) -> Result<Bytes, DocumentError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DocumentError::Status(status.as_u16()));
        }
        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl DocumentSource for HttpPdfSource {
    async fn fetch_text(&self, url: &str) -> Result<String, DocumentError> {
        info!("Downloading PDF from {url}");
        let bytes = self.download(url).await?;
        debug!("Downloaded {} bytes, extracting text", bytes.len());

        // pdf-extract is CPU-bound and synchronous
        let text = tokio::task::spawn_blocking(move || extract_pdf_text(&bytes)).await??;
        Ok(text)
    }
}

/// Extracts text from an in-memory PDF. Pages without a text layer contribute nothing.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, DocumentError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| DocumentError::Extract(e.to_string()))
}
