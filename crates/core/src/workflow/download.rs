//! Artifact downloads driven by the orchestrator.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::artifact::{ArtifactFormat, ArtifactSink};
use crate::notify::Notification;
use crate::stage::Stage;

use super::runner::WorkflowOrchestrator;
use super::types::DownloadError;

impl WorkflowOrchestrator {
    /// True when a download may be started (processing complete, nothing
    /// in flight).
    pub fn download_enabled(&self) -> bool {
        let state = self.read();
        state.stage == Stage::Complete && state.download_target.is_none()
    }

    /// True while `format` is being downloaded.
    pub fn is_downloading(&self, format: ArtifactFormat) -> bool {
        self.read().download_target == Some(format)
    }

    /// Fetch `format` from the backend and save it through `sink`.
    ///
    /// Only one download runs at a time; a second trigger while one is in
    /// flight is refused without a request. The download marker is cleared
    /// before returning whatever the outcome. Failures are reported through
    /// the notifier and never change the stage.
    pub async fn download(
        &self,
        format: ArtifactFormat,
        sink: &dyn ArtifactSink,
    ) -> Result<PathBuf, DownloadError> {
        {
            let mut state = self.write();
            if state.stage != Stage::Complete {
                return Err(DownloadError::NotReady { stage: state.stage });
            }
            if let Some(active) = state.download_target {
                debug!(
                    "Ignoring {} download while {} is in flight",
                    format.label(),
                    active.label()
                );
                return Err(DownloadError::Busy { active });
            }
            state.download_target = Some(format);
            self.publish(&state);
        }

        let result = self.fetch_and_save(format, sink).await;

        {
            let mut state = self.write();
            state.download_target = None;
            self.publish(&state);
        }

        match &result {
            Ok(path) => {
                info!("Downloaded {} to {:?}", format.label(), path);
                self.notifier().notify(Notification::success(
                    "Downloaded!",
                    format!("Documentation downloaded as {}", format.label()),
                ));
            }
            Err(e) => {
                warn!("Download of {} failed: {}", format.label(), e);
                self.notifier().notify(Notification::error(
                    "Download failed",
                    "Could not download the file. Please try again.",
                ));
            }
        }

        result
    }

    async fn fetch_and_save(
        &self,
        format: ArtifactFormat,
        sink: &dyn ArtifactSink,
    ) -> Result<PathBuf, DownloadError> {
        let bytes = self.backend().download(format).await?;
        let file_name = format.file_name(&self.file_stem);
        let path = sink.save(&file_name, &bytes).await?;
        Ok(path)
    }
}
