//! Port for structured run transcripts.
//!
//! The Marker's critique and the intermediate v1 draft are invisible
//! scratch work — the user never sees them. This port captures them (and
//! the other stage outputs) in a machine-readable transcript, separate
//! from `tracing`-based diagnostic logs.

use serde_json::Value;

/// A structured transcript event.
pub struct TranscriptEvent {
    /// Event type identifier (e.g., "v1_draft", "critique", "refined").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for recording transcript events.
///
/// The `log` method is intentionally synchronous and non-fallible so a
/// transcript failure can never disturb a generation run.
pub trait TranscriptLogger: Send + Sync {
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when transcripts are disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
