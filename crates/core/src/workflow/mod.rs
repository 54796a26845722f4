//! Workflow orchestrator for the upload → process → download flow.
//!
//! The orchestrator owns the single [`WorkflowState`] and drives it:
//! - **Upload**: one multipart request; failure halts in the error stage
//! - **Processing**: stages advanced by a [`StageDriver`] after the upload
//! - **Download**: user-triggered, one artifact at a time
//!
//! Work started before a `reset` or a newer submission is not cancelled.
//! Each submission carries a generation number and its late results are
//! dropped when the generation has moved on.

mod download;
mod driver;
mod runner;
mod types;

pub use driver::{StageDriver, TimedStageDriver};
pub use runner::WorkflowOrchestrator;
pub use types::{DownloadError, WorkflowError, WorkflowState};
