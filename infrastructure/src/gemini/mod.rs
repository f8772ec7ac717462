//! Google Gemini API adapters.
//!
//! Implements the `LlmGateway`/`LlmSession` and `EmbedderPort` ports
//! against the native Gemini REST API:
//!
//! - Auth via `?key=API_KEY` query parameter (not header-based)
//! - Single-turn `contents` with role `"user"`
//! - Streaming uses `streamGenerateContent` with `?alt=sse`
//! - Embeddings via `embedContent` / `batchEmbedContents`

mod embedder;
mod gateway;
mod protocol;
mod session;

pub use embedder::GeminiEmbedder;
pub use gateway::GeminiGateway;
pub use protocol::DEFAULT_BASE_URL;
pub use session::GeminiSession;
