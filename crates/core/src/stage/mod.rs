//! Processing stages and the progress tracker that renders them.
//!
//! The tracker is a pure function of the current [`Stage`]: it never touches
//! the network and holds no state of its own.

mod tracker;
mod types;

pub use tracker::{progress_percent, rounded_progress, stage_index, StageTracker, TrackerView};
pub use types::{Stage, Step, StepStatus, TRACKED_STEPS};
