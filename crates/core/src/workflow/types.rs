//! Types for the workflow orchestrator.

use serde::Serialize;
use thiserror::Error;

use crate::artifact::ArtifactFormat;
use crate::backend::BackendError;
use crate::stage::Stage;

/// The single source of truth for the upload/processing/download flow.
///
/// `error` is set exactly when `stage` is [`Stage::Error`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkflowState {
    pub(crate) stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) download_target: Option<ArtifactFormat>,
    pub(crate) generation: u64,
}

impl WorkflowState {
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Format currently being downloaded, if any.
    pub fn download_target(&self) -> Option<ArtifactFormat> {
        self.download_target
    }

    /// Submission generation; bumped by every submit and reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn enter(&mut self, stage: Stage) {
        self.stage = stage;
        self.error = None;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.stage = Stage::Error;
        self.error = Some(message);
    }
}

/// Errors that can occur when submitting a file.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A submission is still being processed, or a finished one has not been reset.
    #[error("cannot submit while {stage}")]
    Busy { stage: Stage },

    /// Upload request failed; the workflow is in the error stage.
    #[error("upload failed: {0}")]
    Upload(#[from] BackendError),

    /// A reset or newer submission took over while this one was pending.
    #[error("submission superseded by a newer reset or submission")]
    Superseded,
}

/// Errors that can occur when downloading an artifact.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Artifacts only exist once processing is complete.
    #[error("artifacts are not ready (stage: {stage})")]
    NotReady { stage: Stage },

    /// Another download is outstanding.
    #[error("{} download already in progress", .active.label())]
    Busy { active: ArtifactFormat },

    /// Backend request failed.
    #[error("download request failed: {0}")]
    Request(#[from] BackendError),

    /// Artifact could not be saved.
    #[error("failed to save artifact: {0}")]
    Save(#[from] std::io::Error),
}
