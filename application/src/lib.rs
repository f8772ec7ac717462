//! Application layer for examforge
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::RetrievalParams;
pub use ports::{
    document_source::{DocumentSource, ExtractError},
    embedder::{EmbedderError, EmbedderPort},
    llm_gateway::{GatewayError, LlmGateway, LlmSession, StreamHandle},
    progress::{GenerationProgress, NoProgress},
    transcript::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::generate_general::RunGeneralUseCase;
pub use use_cases::generate_grounded::RunGroundedUseCase;
pub use use_cases::prepare_context::{PrepareContextError, PrepareContextUseCase};
