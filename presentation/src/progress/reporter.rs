//! Progress reporting for pipeline execution

use colored::Colorize;
use examforge_application::ports::progress::GenerationProgress;
use examforge_domain::Stage;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports pipeline progress with a spinner per stage
pub struct SpinnerReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl SpinnerReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
    }

    fn stage_message(stage: Stage) -> &'static str {
        match stage {
            Stage::Retrieve => "Retrieving relevant passages...",
            Stage::Generate => "Drafting questions...",
            Stage::Critique => "Marking the draft...",
            Stage::Refine => "Refining the draft...",
        }
    }
}

impl Default for SpinnerReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationProgress for SpinnerReporter {
    fn on_stage_start(&self, stage: Stage) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(Self::stage_message(stage));
        pb.enable_steady_tick(Duration::from_millis(100));

        // Replace any previous spinner
        if let Some(old) = self.spinner.lock().unwrap().replace(pb) {
            old.finish_and_clear();
        }
    }

    fn on_stage_complete(&self, _stage: Stage) {
        if let Some(pb) = self.spinner.lock().unwrap().take() {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl GenerationProgress for SimpleProgress {
    fn on_stage_start(&self, stage: Stage) {
        println!(
            "{} {}",
            "->".cyan(),
            SpinnerReporter::stage_message(stage).bold()
        );
    }

    fn on_stage_complete(&self, _stage: Stage) {}
}
