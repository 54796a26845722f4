//! Sources of stage transitions after a successful upload.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::WorkflowConfig;
use crate::stage::Stage;

/// Decides when the workflow moves past a processing stage.
///
/// The transition table is fixed ([`Stage::next`]); a driver only decides
/// *when* the next stage is entered.
#[async_trait]
pub trait StageDriver: Send + Sync {
    /// Wait until `current` is over and return the stage to enter, or
    /// `None` when the progression has ended.
    async fn advance(&self, current: Stage) -> Option<Stage>;
}

/// Advances stages on fixed delays.
///
/// The backend does not report its progress, so the displayed stage is an
/// estimate that only animates the wait.
#[derive(Debug, Clone)]
pub struct TimedStageDriver {
    delays: Vec<Duration>,
}

impl TimedStageDriver {
    /// `delays[i]` is waited before leaving the i-th stage after upload.
    pub fn new(delays: Vec<Duration>) -> Self {
        Self { delays }
    }

    pub fn from_config(config: &WorkflowConfig) -> Self {
        Self::new(config.stage_delays())
    }

    /// No waiting at all.
    pub fn immediate() -> Self {
        Self::new(Vec::new())
    }

    fn delay_for(&self, current: Stage) -> Duration {
        let slot = match current {
            Stage::Uploading => 0,
            Stage::Extracting => 1,
            Stage::Generating => 2,
            Stage::UploadingResult => 3,
            _ => return Duration::ZERO,
        };
        self.delays.get(slot).copied().unwrap_or(Duration::ZERO)
    }

    /// Sum of all delays.
    pub fn total(&self) -> Duration {
        self.delays.iter().sum()
    }
}

impl Default for TimedStageDriver {
    fn default() -> Self {
        Self::from_config(&WorkflowConfig::default())
    }
}

#[async_trait]
impl StageDriver for TimedStageDriver {
    async fn advance(&self, current: Stage) -> Option<Stage> {
        let next = current.next()?;
        let delay = self.delay_for(current);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Some(next)
    }
}
