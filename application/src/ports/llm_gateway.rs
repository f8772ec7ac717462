//! LLM Gateway port
//!
//! Defines the interface for communicating with the LLM service.

use async_trait::async_trait;
use examforge_domain::{AgentRole, StreamEvent};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Response parse error: {0}")]
    ResponseParse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to the LLM
/// service. Each agent in the pipeline gets its own session, created
/// for a specific [`AgentRole`] so the adapter can apply the role's
/// sampling temperature.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a new session for the given agent role
    async fn create_session(&self, role: AgentRole) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// An active LLM session
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// The role this session was created for
    fn role(&self) -> AgentRole;

    /// Send a prompt and get the fully materialized response
    async fn send(&self, prompt: &str) -> Result<String, GatewayError>;

    /// Send a prompt and get a streaming response.
    ///
    /// Default implementation calls `send()` and wraps the result in a
    /// single `Completed` event, so non-streaming implementations work
    /// without changes.
    async fn send_streaming(&self, prompt: &str) -> Result<StreamHandle, GatewayError> {
        let result = self.send(prompt).await?;
        Ok(StreamHandle::from_text(result))
    }
}

/// Handle for receiving streaming events from an LLM session.
///
/// Wraps an `mpsc::Receiver<StreamEvent>`. A fixed string (an accepted
/// v1 draft or an error message) is representable as a degenerate
/// one-chunk instance via [`StreamHandle::from_text`], so callers never
/// branch on streamed-vs-not.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Wrap a fixed string as a single-chunk stream.
    pub fn from_text(text: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::channel(1);
        // Capacity 1 guarantees the send succeeds before any recv.
        let _ = tx.try_send(StreamEvent::Completed(text.into()));
        Self::new(rx)
    }

    /// Receive the next event, or `None` when the stream is exhausted.
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }

    /// Consume the stream and collect all text into a single string.
    pub async fn collect_text(mut self) -> Result<String, GatewayError> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => full_text.push_str(&chunk),
                StreamEvent::Completed(text) => {
                    if full_text.is_empty() {
                        return Ok(text);
                    }
                    return Ok(full_text);
                }
                StreamEvent::Error(e) => {
                    return Err(GatewayError::RequestFailed(e));
                }
            }
        }
        // Channel closed without Completed — return what we have
        Ok(full_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_text_is_single_completed_event() {
        let mut handle = StreamHandle::from_text("the draft");
        assert_eq!(
            handle.next_event().await,
            Some(StreamEvent::Completed("the draft".to_string()))
        );
        assert_eq!(handle.next_event().await, None);
    }

    #[tokio::test]
    async fn test_collect_text_concatenates_deltas() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(StreamEvent::Delta("Q1".to_string())).await.unwrap();
        tx.send(StreamEvent::Delta(" and Q2".to_string()))
            .await
            .unwrap();
        tx.send(StreamEvent::Completed("Q1 and Q2".to_string()))
            .await
            .unwrap();
        drop(tx);

        let text = StreamHandle::new(rx).collect_text().await.unwrap();
        assert_eq!(text, "Q1 and Q2");
    }

    #[tokio::test]
    async fn test_collect_text_from_wrapped_string() {
        let text = StreamHandle::from_text("verbatim")
            .collect_text()
            .await
            .unwrap();
        assert_eq!(text, "verbatim");
    }

    #[tokio::test]
    async fn test_collect_text_surfaces_stream_error() {
        let (tx, rx) = mpsc::channel(2);
        tx.send(StreamEvent::Error("boom".to_string()))
            .await
            .unwrap();
        drop(tx);

        let result = StreamHandle::new(rx).collect_text().await;
        assert!(matches!(result, Err(GatewayError::RequestFailed(_))));
    }
}
