//! Configuration: file schema and multi-source loader.

mod file_config;
mod loader;

pub use file_config::{FileConfig, RetrievalConfig, ServiceConfig, TranscriptConfig};
pub use loader::{ConfigError, ConfigLoader};
