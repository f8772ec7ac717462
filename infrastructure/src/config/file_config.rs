//! Configuration file schema.

use crate::gemini::DEFAULT_BASE_URL;
use examforge_application::config::RetrievalParams;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration, merged from defaults, the global config
/// file, a project-level `examforge.toml`, and an explicit `--config`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub service: ServiceConfig,
    pub retrieval: RetrievalConfig,
    pub transcript: TranscriptConfig,
}

/// LLM/embedding service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Generation model for all three agent roles.
    pub model: String,
    /// Embedding model for context preparation and retrieval.
    pub embedding_model: String,
    /// API base URL (override for proxies/testing).
    pub base_url: String,
    /// Per-request output token cap.
    pub max_output_tokens: u32,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            model: "gemini-2.5-flash".to_string(),
            embedding_model: "text-embedding-004".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_output_tokens: 8192,
            timeout_secs: 120,
        }
    }
}

/// Context preparation and retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        let params = RetrievalParams::default();
        Self {
            top_k: params.top_k,
            chunk_size: params.chunk_size,
            chunk_overlap: params.chunk_overlap,
        }
    }
}

impl RetrievalConfig {
    /// Convert into the application-layer parameter object.
    pub fn to_params(&self) -> RetrievalParams {
        RetrievalParams {
            top_k: self.top_k,
            chunk_size: self.chunk_size,
            chunk_overlap: self.chunk_overlap,
        }
    }
}

/// Run transcript settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Write a JSONL transcript of agent stages per run.
    pub enabled: bool,
    /// Directory for transcript files; defaults to the platform data dir.
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.service.api_key_env, "GOOGLE_API_KEY");
        assert_eq!(config.service.model, "gemini-2.5-flash");
        assert_eq!(config.retrieval.top_k, 7);
        assert!(!config.transcript.enabled);
    }

    #[test]
    fn test_partial_toml_overlays_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [service]
            model = "gemini-2.0-flash"

            [retrieval]
            top_k = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.service.model, "gemini-2.0-flash");
        assert_eq!(config.service.api_key_env, "GOOGLE_API_KEY");
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.retrieval.chunk_size, 1000);
    }

    #[test]
    fn test_to_params() {
        let params = RetrievalConfig::default().to_params();
        assert_eq!(params, RetrievalParams::default());
    }
}
