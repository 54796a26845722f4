//! Workflow orchestrator implementation.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::backend::{BackendError, DocumentBackend};
use crate::config::Config;
use crate::notify::{Notification, Notifier};
use crate::stage::Stage;
use crate::upload::CandidateFile;

use super::driver::{StageDriver, TimedStageDriver};
use super::types::{WorkflowError, WorkflowState};

/// Capacity of the state update channel.
const UPDATE_BUFFER_SIZE: usize = 64;

/// Default file name stem for saved artifacts.
const DEFAULT_FILE_STEM: &str = "documentation";

/// Drives the workflow state through upload, processing and download.
pub struct WorkflowOrchestrator {
    backend: Arc<dyn DocumentBackend>,
    driver: Arc<dyn StageDriver>,
    notifier: Arc<dyn Notifier>,
    pub(super) file_stem: String,

    state: RwLock<WorkflowState>,
    updates: broadcast::Sender<WorkflowState>,
}

impl WorkflowOrchestrator {
    /// Create a new orchestrator in the idle stage.
    pub fn new(
        backend: Arc<dyn DocumentBackend>,
        driver: Arc<dyn StageDriver>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_BUFFER_SIZE);

        Self {
            backend,
            driver,
            notifier,
            file_stem: DEFAULT_FILE_STEM.to_string(),
            state: RwLock::new(WorkflowState::default()),
            updates,
        }
    }

    /// Create an orchestrator with timed stages and naming from `config`.
    pub fn from_config(
        config: &Config,
        backend: Arc<dyn DocumentBackend>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::new(
            backend,
            Arc::new(TimedStageDriver::from_config(&config.workflow)),
            notifier,
        )
        .with_file_stem(config.download.file_stem.clone())
    }

    /// Set the file name stem used for downloaded artifacts.
    pub fn with_file_stem(mut self, stem: impl Into<String>) -> Self {
        self.file_stem = stem.into();
        self
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> WorkflowState {
        self.read().clone()
    }

    pub fn stage(&self) -> Stage {
        self.read().stage
    }

    /// Receive every state change from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<WorkflowState> {
        self.updates.subscribe()
    }

    /// Upload `file` and walk the processing stages.
    ///
    /// Returns the final stage ([`Stage::Complete`]) on success. On upload
    /// failure the state is left in [`Stage::Error`]. If a reset or a newer
    /// submission happens meanwhile, remaining results are discarded and
    /// [`WorkflowError::Superseded`] is returned.
    pub async fn submit(&self, file: CandidateFile) -> Result<Stage, WorkflowError> {
        let generation = {
            let mut state = self.write();
            if !state.stage.accepts_submission() {
                debug!("Rejecting submission of {} while {}", file.name(), state.stage);
                return Err(WorkflowError::Busy { stage: state.stage });
            }
            state.generation += 1;
            state.enter(Stage::Uploading);
            self.publish(&state);
            state.generation
        };

        info!(
            "Submitting {} ({}) to {} backend [generation {}]",
            file.name(),
            file.display_size(),
            self.backend.name(),
            generation
        );

        match self.backend.upload(&file).await {
            Ok(receipt) => {
                debug!("Upload accepted: {:?}", receipt);
            }
            Err(e) => {
                warn!("Upload of {} failed: {}", file.name(), e);
                let message = upload_failure_message(&e);
                if !self.apply(generation, |state| state.fail(message)) {
                    return Err(WorkflowError::Superseded);
                }
                self.notifier.notify(Notification::error(
                    "Error",
                    "Failed to process file. Please try again.",
                ));
                return Err(WorkflowError::Upload(e));
            }
        }

        let mut current = Stage::Uploading;
        while let Some(next) = self.driver.advance(current).await {
            if !self.apply(generation, |state| state.enter(next)) {
                return Err(WorkflowError::Superseded);
            }
            info!("Workflow stage: {} -> {}", current, next);
            current = next;
        }

        if current == Stage::Complete {
            self.notifier.notify(Notification::success(
                "Success!",
                "Documentation generated successfully",
            ));
        }

        Ok(current)
    }

    /// Return to idle immediately, discarding any error.
    ///
    /// In-flight uploads or stage timers keep running, but their results
    /// no longer touch the state.
    pub fn reset(&self) {
        let mut state = self.write();
        state.generation += 1;
        state.enter(Stage::Idle);
        self.publish(&state);
        info!("Workflow reset [generation {}]", state.generation);
    }

    pub(super) fn backend(&self) -> &dyn DocumentBackend {
        self.backend.as_ref()
    }

    pub(super) fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Apply `change` only if `generation` is still current.
    fn apply<F>(&self, generation: u64, change: F) -> bool
    where
        F: FnOnce(&mut WorkflowState),
    {
        let mut state = self.write();
        if state.generation != generation {
            debug!(
                "Discarding stale result for generation {} (current {})",
                generation, state.generation
            );
            return false;
        }
        change(&mut *state);
        self.publish(&state);
        true
    }

    pub(super) fn publish(&self, state: &WorkflowState) {
        // Send errors just mean nobody is subscribed
        let _ = self.updates.send(state.clone());
    }

    pub(super) fn read(&self) -> RwLockReadGuard<'_, WorkflowState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    pub(super) fn write(&self) -> RwLockWriteGuard<'_, WorkflowState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Message shown in the error panel for a failed upload.
fn upload_failure_message(error: &BackendError) -> String {
    if error.is_rejection() {
        "Upload failed".to_string()
    } else {
        error.to_string()
    }
}
