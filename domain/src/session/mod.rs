//! LLM session domain: streaming events.

pub mod stream;

pub use stream::StreamEvent;
