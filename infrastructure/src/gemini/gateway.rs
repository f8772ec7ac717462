//! Gemini LLM gateway implementation
//!
//! Creates one [`GeminiSession`] per agent role. Sessions share the
//! underlying HTTP client; the role only decides the sampling
//! temperature applied to its requests.

use super::session::GeminiSession;
use crate::config::ServiceConfig;
use async_trait::async_trait;
use examforge_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use examforge_domain::AgentRole;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Gateway to the Google Gemini API.
pub struct GeminiGateway {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_output_tokens: u32,
}

impl GeminiGateway {
    /// Create a gateway from service configuration and a resolved API key.
    pub fn new(config: &ServiceConfig, api_key: String) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                GatewayError::ConnectionError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
            model: config.model.clone(),
            max_output_tokens: config.max_output_tokens,
        })
    }

    /// Endpoint URL for a Gemini API method, key appended as `?key=`.
    fn endpoint_url(&self, method: &str, sse: bool) -> String {
        if sse {
            format!(
                "{}/models/{}:{}?alt=sse&key={}",
                self.base_url, self.model, method, self.api_key
            )
        } else {
            format!(
                "{}/models/{}:{}?key={}",
                self.base_url, self.model, method, self.api_key
            )
        }
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn create_session(&self, role: AgentRole) -> Result<Box<dyn LlmSession>, GatewayError> {
        debug!(model = %self.model, role = %role, "Creating Gemini session");
        Ok(Box::new(GeminiSession::new(
            self.client.clone(),
            self.endpoint_url("generateContent", false),
            self.endpoint_url("streamGenerateContent", true),
            role,
            self.max_output_tokens,
        )))
    }
}
