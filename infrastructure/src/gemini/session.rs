//! Gemini LLM session implementation
//!
//! One session per agent invocation. `send` performs a synchronous,
//! fully materialized `generateContent` call; `send_streaming` uses
//! `streamGenerateContent?alt=sse` and forwards text deltas through an
//! mpsc channel as they arrive off the wire.

use super::protocol;
use async_trait::async_trait;
use examforge_application::ports::llm_gateway::{GatewayError, LlmSession, StreamHandle};
use examforge_domain::{AgentRole, StreamEvent};
use futures::StreamExt;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub struct GeminiSession {
    client: Client,
    generate_url: String,
    stream_url: String,
    role: AgentRole,
    max_output_tokens: u32,
}

impl GeminiSession {
    pub fn new(
        client: Client,
        generate_url: String,
        stream_url: String,
        role: AgentRole,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            client,
            generate_url,
            stream_url,
            role,
            max_output_tokens,
        }
    }

    fn body(&self, prompt: &str) -> Value {
        protocol::generation_body(prompt, self.role.temperature(), self.max_output_tokens)
    }
}

#[async_trait]
impl LlmSession for GeminiSession {
    fn role(&self) -> AgentRole {
        self.role
    }

    async fn send(&self, prompt: &str) -> Result<String, GatewayError> {
        debug!(role = %self.role, "Sending Gemini completion request");

        let response = self
            .client
            .post(&self.generate_url)
            .json(&self.body(prompt))
            .send()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("Request to Gemini failed: {}", e)))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| GatewayError::ResponseParse(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(protocol::map_http_error(status, &body_text));
        }

        let body: Value = serde_json::from_str(&body_text)
            .map_err(|e| GatewayError::ResponseParse(format!("Invalid JSON: {}", e)))?;

        protocol::parse_generation_response(&body)
    }

    async fn send_streaming(&self, prompt: &str) -> Result<StreamHandle, GatewayError> {
        debug!(role = %self.role, "Sending Gemini streaming request");

        let response = self
            .client
            .post(&self.stream_url)
            .json(&self.body(prompt))
            .send()
            .await
            .map_err(|e| {
                GatewayError::RequestFailed(format!("Streaming request to Gemini failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(protocol::map_http_error(status, &body_text));
        }

        // The HTTP exchange succeeded; forward SSE chunks as they arrive.
        let (tx, rx) = mpsc::channel(32);
        tokio::spawn(forward_sse(response, tx));
        Ok(StreamHandle::new(rx))
    }
}

/// Read the SSE byte stream and forward each text delta on the channel.
///
/// Terminates with `Completed` carrying the accumulated text, or `Error`
/// if the connection drops mid-stream.
async fn forward_sse(response: reqwest::Response, tx: mpsc::Sender<StreamEvent>) {
    let mut byte_stream = response.bytes_stream();
    let mut line_buffer = String::new();
    let mut full_text = String::new();

    while let Some(chunk_result) = byte_stream.next().await {
        let chunk = match chunk_result {
            Ok(chunk) => chunk,
            Err(e) => {
                warn!("Gemini stream interrupted: {}", e);
                let _ = tx
                    .send(StreamEvent::Error(format!("stream interrupted: {}", e)))
                    .await;
                return;
            }
        };

        line_buffer.push_str(&String::from_utf8_lossy(&chunk));

        while let Some(newline_pos) = line_buffer.find('\n') {
            let line = line_buffer[..newline_pos].trim().to_string();
            line_buffer.drain(..=newline_pos);

            if let Some(text) = delta_from_sse_line(&line) {
                full_text.push_str(&text);
                if tx.send(StreamEvent::Delta(text)).await.is_err() {
                    // Receiver dropped the stream; stop reading.
                    return;
                }
            }
        }
    }

    // Flush any final unterminated line.
    let remaining = line_buffer.trim().to_string();
    if let Some(text) = delta_from_sse_line(&remaining) {
        full_text.push_str(&text);
        let _ = tx.send(StreamEvent::Delta(text)).await;
    }

    let _ = tx.send(StreamEvent::Completed(full_text)).await;
}

/// Parse one SSE line, returning the text delta it carries, if any.
fn delta_from_sse_line(line: &str) -> Option<String> {
    let data_str = line.strip_prefix("data: ")?;
    match serde_json::from_str::<Value>(data_str) {
        Ok(data) => protocol::chunk_text(&data),
        Err(e) => {
            warn!(error = %e, "Failed to parse Gemini SSE chunk");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_from_sse_line() {
        let line = r#"data: {"candidates":[{"content":{"parts":[{"text":"Q1. "}]}}]}"#;
        assert_eq!(delta_from_sse_line(line), Some("Q1. ".to_string()));
    }

    #[test]
    fn test_non_data_lines_are_skipped() {
        assert_eq!(delta_from_sse_line(""), None);
        assert_eq!(delta_from_sse_line("event: ping"), None);
        assert_eq!(delta_from_sse_line("data: not-json"), None);
    }

    #[test]
    fn test_body_uses_role_temperature() {
        let session = GeminiSession::new(
            Client::new(),
            "http://localhost/generate".to_string(),
            "http://localhost/stream".to_string(),
            AgentRole::Refiner,
            4096,
        );
        let body = session.body("rewrite this");
        assert_eq!(body["generationConfig"]["temperature"], 0.0);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 4096);
    }
}
