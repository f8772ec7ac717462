//! Run Grounded use case.
//!
//! Executes the document-grounded 3-agent pipeline:
//!
//! `RETRIEVE → GENERATE(v1) → CRITIQUE → [accepted?] → done(v1) | REFINE(v2) → done(v2)`
//!
//! Stages run strictly in sequence. The Generator and Marker outputs are
//! fully materialized — keeping the branch logic trivial — and only the
//! final stage streams to the caller, because it is the only stage whose
//! output is user-visible.
//!
//! Failure semantics: retrieval errors degrade to an empty context;
//! any Generator/Marker/Refiner failure aborts the invocation and is
//! converted into a single-chunk stream carrying the error sentinel.
//! No partial output is ever emitted.

use crate::config::RetrievalParams;
use crate::ports::embedder::EmbedderPort;
use crate::ports::llm_gateway::{GatewayError, LlmGateway, StreamHandle};
use crate::ports::progress::GenerationProgress;
use crate::ports::transcript::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use examforge_domain::{
    AgentRole, ContextIndex, GenerationRequest, PromptTemplate, Stage, critique_accepts,
    error_text, join_passages, truncate,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Use case for running the document-grounded pipeline.
pub struct RunGroundedUseCase {
    gateway: Arc<dyn LlmGateway>,
    embedder: Arc<dyn EmbedderPort>,
    transcript: Arc<dyn TranscriptLogger>,
    params: RetrievalParams,
}

impl RunGroundedUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, embedder: Arc<dyn EmbedderPort>) -> Self {
        Self {
            gateway,
            embedder,
            transcript: Arc::new(NoTranscriptLogger),
            params: RetrievalParams::default(),
        }
    }

    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = transcript;
        self
    }

    pub fn with_params(mut self, params: RetrievalParams) -> Self {
        self.params = params;
        self
    }

    /// Execute the pipeline against a prepared index.
    ///
    /// Never fails outward: every error surfaces as a single-chunk
    /// stream beginning with the error sentinel, consumable through the
    /// same code path as a successful run.
    pub async fn execute(
        &self,
        request: &GenerationRequest,
        index: &ContextIndex,
        progress: &dyn GenerationProgress,
    ) -> StreamHandle {
        match self.run(request, index, progress).await {
            Ok(handle) => handle,
            Err(e) => {
                error!("Grounded pipeline failed: {}", e);
                StreamHandle::from_text(error_text(e))
            }
        }
    }

    async fn run(
        &self,
        request: &GenerationRequest,
        index: &ContextIndex,
        progress: &dyn GenerationProgress,
    ) -> Result<StreamHandle, GatewayError> {
        info!(
            "Starting grounded generation: {}",
            truncate(request.user_prompt(), 100)
        );

        progress.on_stage_start(Stage::Retrieve);
        let context = self.retrieve(request, index).await;
        progress.on_stage_complete(Stage::Retrieve);

        progress.on_stage_start(Stage::Generate);
        let generator = self.gateway.create_session(AgentRole::Generator).await?;
        let v1_draft = generator
            .send(&PromptTemplate::grounded_generator(request, &context))
            .await?;
        self.transcript.log(TranscriptEvent::new(
            "v1_draft",
            serde_json::json!({
                "role": AgentRole::Generator.as_str(),
                "bytes": v1_draft.len(),
                "text": v1_draft,
            }),
        ));
        progress.on_stage_complete(Stage::Generate);

        progress.on_stage_start(Stage::Critique);
        let marker = self.gateway.create_session(AgentRole::Marker).await?;
        let critique = marker
            .send(&PromptTemplate::marker(request, &context, &v1_draft))
            .await?;
        self.transcript.log(TranscriptEvent::new(
            "critique",
            serde_json::json!({
                "role": AgentRole::Marker.as_str(),
                "accepted": critique_accepts(&critique),
                "text": critique,
            }),
        ));
        progress.on_stage_complete(Stage::Critique);

        if critique_accepts(&critique) {
            info!("Critique accepted the v1 draft verbatim; skipping refinement");
            return Ok(StreamHandle::from_text(v1_draft));
        }

        progress.on_stage_start(Stage::Refine);
        let refiner = self.gateway.create_session(AgentRole::Refiner).await?;
        let handle = refiner
            .send_streaming(&PromptTemplate::refiner(request, &v1_draft, &critique))
            .await?;
        // The stage is "complete" once the stream is underway — chunks
        // belong to the caller from here on.
        progress.on_stage_complete(Stage::Refine);
        Ok(handle)
    }

    /// RETRIEVE: top-K passages for the request, joined into one block.
    ///
    /// Failures here are never fatal — an empty or unqueryable index
    /// yields an empty context string and generation proceeds with
    /// whatever is available.
    async fn retrieve(&self, request: &GenerationRequest, index: &ContextIndex) -> String {
        if index.is_empty() {
            debug!("Context index is empty; generating without context");
            return String::new();
        }
        match self.embedder.embed_query(request.user_prompt()).await {
            Ok(query) => {
                let passages = index.search(&query, self.params.top_k);
                debug!("Retrieved {} passages", passages.len());
                join_passages(&passages)
            }
            Err(e) => {
                warn!("Retrieval failed, continuing without context: {}", e);
                String::new()
            }
        }
    }
}
