//! Checklist and percentage rendering for a stage.

use std::fmt;

use super::types::{Stage, Step, StepStatus, TRACKED_STEPS};

/// Index of `stage` in the tracked steps. Untracked stages map to 0.
pub fn stage_index(stage: Stage) -> usize {
    TRACKED_STEPS
        .iter()
        .position(|s| s.stage == stage)
        .unwrap_or(0)
}

/// Progress as `(index + 1) / steps * 100`.
pub fn progress_percent(stage: Stage) -> f64 {
    (stage_index(stage) + 1) as f64 / TRACKED_STEPS.len() as f64 * 100.0
}

/// Progress rounded for display.
pub fn rounded_progress(stage: Stage) -> u8 {
    progress_percent(stage).round() as u8
}

/// What the tracker shows for a given state.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerView {
    /// Nothing to show (idle).
    Hidden,
    /// Error panel replacing the checklist.
    Failed { message: String },
    /// Progress bar plus checklist.
    Checklist {
        headline: String,
        progress: u8,
        steps: Vec<(Step, StepStatus)>,
    },
}

/// Stateless stage tracker.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageTracker;

impl StageTracker {
    /// Build the view for `stage`. `error` is only read in the error stage.
    pub fn view(stage: Stage, error: Option<&str>) -> TrackerView {
        match stage {
            Stage::Idle => TrackerView::Hidden,
            Stage::Error => TrackerView::Failed {
                message: error
                    .filter(|m| !m.is_empty())
                    .unwrap_or("An error occurred")
                    .to_string(),
            },
            _ => {
                let current = stage_index(stage);
                let complete = stage == Stage::Complete;

                let steps = TRACKED_STEPS
                    .iter()
                    .enumerate()
                    .map(|(index, step)| {
                        let status = if complete || index < current {
                            StepStatus::Done
                        } else if index == current {
                            StepStatus::InProgress
                        } else {
                            StepStatus::Pending
                        };
                        (*step, status)
                    })
                    .collect();

                let headline = if complete {
                    "Processing Complete!".to_string()
                } else {
                    TRACKED_STEPS[current].label.to_string()
                };

                TrackerView::Checklist {
                    headline,
                    progress: rounded_progress(stage),
                    steps,
                }
            }
        }
    }
}

impl fmt::Display for TrackerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerView::Hidden => Ok(()),
            TrackerView::Failed { message } => {
                writeln!(f, "[x] Processing Failed")?;
                write!(f, "    {}", message)
            }
            TrackerView::Checklist {
                headline,
                progress,
                steps,
            } => {
                writeln!(f, "{:<40} {:>3}%", headline, progress)?;
                for (i, (step, status)) in steps.iter().enumerate() {
                    let marker = match status {
                        StepStatus::Done => "[+]",
                        StepStatus::InProgress => "[~]",
                        StepStatus::Pending => "[ ]",
                    };
                    if i + 1 == steps.len() {
                        write!(f, "  {} {}", marker, step.label)?;
                    } else {
                        writeln!(f, "  {} {}", marker, step.label)?;
                    }
                }
                Ok(())
            }
        }
    }
}
