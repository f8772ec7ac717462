//! Run General use case.
//!
//! Executes the general-knowledge pipeline — a single streamed Generator
//! stage: `START → GENERATE(streamed) → DONE`. No retrieval, no
//! critique, no refinement. Shares the error-wrapping contract of the
//! grounded pipeline: a failure becomes a single-chunk sentinel stream.

use crate::ports::llm_gateway::{GatewayError, LlmGateway, StreamHandle};
use crate::ports::progress::GenerationProgress;
use crate::ports::transcript::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use examforge_domain::{AgentRole, GenerationRequest, PromptTemplate, Stage, error_text, truncate};
use std::sync::Arc;
use tracing::{error, info};

/// Use case for running the general-knowledge pipeline.
pub struct RunGeneralUseCase {
    gateway: Arc<dyn LlmGateway>,
    transcript: Arc<dyn TranscriptLogger>,
}

impl RunGeneralUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            transcript: Arc::new(NoTranscriptLogger),
        }
    }

    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = transcript;
        self
    }

    /// Execute the pipeline. Never fails outward — see the grounded
    /// use case for the error-stream contract.
    pub async fn execute(
        &self,
        request: &GenerationRequest,
        progress: &dyn GenerationProgress,
    ) -> StreamHandle {
        match self.run(request, progress).await {
            Ok(handle) => handle,
            Err(e) => {
                error!("General pipeline failed: {}", e);
                StreamHandle::from_text(error_text(e))
            }
        }
    }

    async fn run(
        &self,
        request: &GenerationRequest,
        progress: &dyn GenerationProgress,
    ) -> Result<StreamHandle, GatewayError> {
        info!(
            "Starting general generation: {}",
            truncate(request.user_prompt(), 100)
        );

        progress.on_stage_start(Stage::Generate);
        let generator = self.gateway.create_session(AgentRole::Generator).await?;
        let handle = generator
            .send_streaming(&PromptTemplate::general_generator(request))
            .await?;
        progress.on_stage_complete(Stage::Generate);

        self.transcript.log(TranscriptEvent::new(
            "general_generation",
            serde_json::json!({
                "role": AgentRole::Generator.as_str(),
                "request": request.user_prompt(),
            }),
        ));

        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::LlmSession;
    use crate::ports::progress::NoProgress;
    use async_trait::async_trait;
    use examforge_domain::{ERROR_PREFIX, split_answer_key};
    use std::sync::Mutex;

    struct MockGateway {
        response: Result<String, String>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl MockGateway {
        fn replying(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                prompts: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                prompts: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    struct MockSession {
        response: Result<String, String>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl LlmSession for MockSession {
        fn role(&self) -> AgentRole {
            AgentRole::Generator
        }

        async fn send(&self, prompt: &str) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.response
                .clone()
                .map_err(GatewayError::RequestFailed)
        }
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        async fn create_session(
            &self,
            _role: AgentRole,
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            Ok(Box::new(MockSession {
                response: self.response.clone(),
                prompts: self.prompts.clone(),
            }))
        }
    }

    #[tokio::test]
    async fn test_healthy_model_yields_clean_output() {
        let gateway = Arc::new(MockGateway::replying("Q1. True or false: ..."));
        let use_case = RunGeneralUseCase::new(gateway);

        let request = GenerationRequest::new("Generate 3 true/false questions on osmosis");
        let text = use_case
            .execute(&request, &NoProgress)
            .await
            .collect_text()
            .await
            .unwrap();

        assert!(!text.is_empty());
        assert!(!text.starts_with(ERROR_PREFIX));
    }

    #[tokio::test]
    async fn test_answer_key_scenario_splits_cleanly() {
        let gateway = Arc::new(MockGateway::replying("Q1...\n---ANSWER KEY---\nA1..."));
        let use_case = RunGeneralUseCase::new(gateway);

        let request = GenerationRequest::new("Generate 3 true/false questions on X")
            .with_answer_key(true);
        let text = use_case
            .execute(&request, &NoProgress)
            .await
            .collect_text()
            .await
            .unwrap();

        let sections = split_answer_key(&text);
        assert_eq!(sections.questions, "Q1...");
        assert_eq!(sections.answer_key.as_deref(), Some("A1..."));
    }

    #[tokio::test]
    async fn test_separator_detectable_even_when_key_not_requested() {
        // The flag controls the prompt instruction, not post-hoc filtering:
        // a model that emits the separator anyway still yields a visible key.
        let gateway = Arc::new(MockGateway::replying("Q1\n---ANSWER KEY---\nA1"));
        let use_case = RunGeneralUseCase::new(gateway.clone());

        let request = GenerationRequest::new("quiz me").with_answer_key(false);
        let text = use_case
            .execute(&request, &NoProgress)
            .await
            .collect_text()
            .await
            .unwrap();

        let sections = split_answer_key(&text);
        assert_eq!(sections.answer_key.as_deref(), Some("A1"));

        // And the prompt carried the negative instruction
        let prompts = gateway.prompts.lock().unwrap();
        assert!(prompts[0].contains("Do NOT include an answer key."));
    }

    #[tokio::test]
    async fn test_failure_yields_error_sentinel() {
        let gateway = Arc::new(MockGateway::failing("network down"));
        let use_case = RunGeneralUseCase::new(gateway);

        let request = GenerationRequest::new("quiz me");
        let text = use_case
            .execute(&request, &NoProgress)
            .await
            .collect_text()
            .await
            .unwrap();

        assert!(text.starts_with(ERROR_PREFIX));
        assert!(text.contains("network down"));
    }
}
