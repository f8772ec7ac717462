//! Progress notification port
//!
//! Defines the interface for reporting pipeline progress.

use examforge_domain::Stage;

/// Callback for progress updates during a pipeline run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, nothing).
pub trait GenerationProgress: Send + Sync {
    /// Called when a pipeline stage starts
    fn on_stage_start(&self, stage: Stage);

    /// Called when a pipeline stage completes
    fn on_stage_complete(&self, stage: Stage);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl GenerationProgress for NoProgress {
    fn on_stage_start(&self, _stage: Stage) {}
    fn on_stage_complete(&self, _stage: Stage) {}
}
