//! Progress tracking for update/upgrade runs
//!
//! brew gives no completion estimate, so progress is a heuristic: each
//! output line nudges the value forward by a fixed increment, clamped at
//! the maximum. The value never decreases within one tracked run. Error
//! lines do not abort the run; they accumulate and are surfaced after
//! completion.

use crate::process::OutputEvent;

/// Heuristic advance per observed output line
pub const LINE_INCREMENT: f64 = 0.1;

/// Upper bound for the progress value
pub const PROGRESS_MAX: f64 = 1.0;

/// Stage of a tracked maintenance run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateStage {
    #[default]
    Idle,
    Updating,
    Upgrading,
}

impl UpdateStage {
    pub fn label(&self) -> &'static str {
        match self {
            UpdateStage::Idle => "Idle",
            UpdateStage::Updating => "Updating",
            UpdateStage::Upgrading => "Upgrading",
        }
    }
}

/// Mutable progress state for one update/upgrade run
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    stage: UpdateStage,
    value: f64,
    errors: Vec<String>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new tracked run. Resets the value and any errors left over
    /// from the previous run.
    pub fn start(&mut self, stage: UpdateStage) {
        self.stage = stage;
        self.value = 0.0;
        self.errors.clear();
    }

    /// Move to the next stage without resetting accumulated progress.
    pub fn advance_stage(&mut self, stage: UpdateStage) {
        self.stage = stage;
    }

    /// Fold one output event into the tracker: stdout lines advance the
    /// value, stderr lines accumulate as errors.
    pub fn record(&mut self, event: &OutputEvent) {
        match event {
            OutputEvent::Stdout(_) => {
                self.value = (self.value + LINE_INCREMENT).min(PROGRESS_MAX);
            }
            OutputEvent::Stderr(line) => {
                self.errors.push(format!("{} error: {line}", self.stage.label()));
            }
        }
    }

    /// Record a failure that is not tied to a single output line.
    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// End the run. The stage returns to idle; accumulated errors stay
    /// readable so they can be surfaced after completion.
    pub fn finish(&mut self) {
        self.stage = UpdateStage::Idle;
        self.value = PROGRESS_MAX;
    }

    pub fn stage(&self) -> UpdateStage {
        self.stage
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn percent(&self) -> u8 {
        ((self.value / PROGRESS_MAX) * 100.0).round().min(100.0) as u8
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
