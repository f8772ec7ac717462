//! Gemini embedding service implementation
//!
//! Implements `EmbedderPort` over `embedContent` (single query) and
//! `batchEmbedContents` (index construction). The batch endpoint caps
//! requests per call, so large chunk sets are embedded in batches.

use super::protocol;
use crate::config::ServiceConfig;
use async_trait::async_trait;
use examforge_application::ports::embedder::{EmbedderError, EmbedderPort};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Maximum requests per `batchEmbedContents` call.
const BATCH_LIMIT: usize = 100;

pub struct GeminiEmbedder {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiEmbedder {
    pub fn new(config: &ServiceConfig, api_key: String) -> Result<Self, EmbedderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                EmbedderError::RequestFailed(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
            model: config.embedding_model.clone(),
        })
    }

    fn endpoint_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.base_url, self.model, method, self.api_key
        )
    }

    async fn post(&self, url: &str, body: &Value) -> Result<Value, EmbedderError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| EmbedderError::RequestFailed(format!("Embedding request failed: {}", e)))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| EmbedderError::ResponseParse(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(EmbedderError::RequestFailed(format!(
                "HTTP {} from Gemini embedding API: {}",
                status, body_text
            )));
        }

        serde_json::from_str(&body_text)
            .map_err(|e| EmbedderError::ResponseParse(format!("Invalid JSON: {}", e)))
    }
}

#[async_trait]
impl EmbedderPort for GeminiEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedderError> {
        let url = self.endpoint_url("batchEmbedContents");
        let mut vectors = Vec::with_capacity(texts.len());

        for batch in texts.chunks(BATCH_LIMIT) {
            debug!(batch_len = batch.len(), "Embedding chunk batch");
            let body = protocol::batch_embed_body(&self.model, batch);
            let response = self.post(&url, &body).await?;
            vectors.extend(protocol::parse_batch_embed_response(&response)?);
        }

        Ok(vectors)
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbedderError> {
        let url = self.endpoint_url("embedContent");
        let body = protocol::embed_body(&self.model, text);
        let response = self.post(&url, &body).await?;
        protocol::parse_embed_response(&response)
    }
}
