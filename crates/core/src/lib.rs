//! Client core for the documentation generator backend.
//!
//! A template file is selected and validated by the [`UploadControl`],
//! submitted through the [`WorkflowOrchestrator`], tracked by the
//! [`StageTracker`], and its generated artifacts are downloaded once
//! processing is complete.

pub mod artifact;
pub mod backend;
pub mod config;
pub mod notify;
pub mod stage;
pub mod testing;
pub mod upload;
pub mod workflow;

pub use artifact::{ArtifactFormat, ArtifactSink, DirectorySink};
pub use backend::{BackendError, DocumentBackend, HttpBackend, UploadReceipt};
pub use config::{
    load_config, load_config_from_str, validate_config, BackendConfig, Config, ConfigError,
    DownloadConfig, UploadConfig, WorkflowConfig,
};
pub use notify::{ChannelNotifier, Notification, NotificationKind, Notifier, TracingNotifier};
pub use stage::{Stage, StageTracker, StepStatus, TrackerView};
pub use upload::{CandidateFile, SelectionSource, UploadControl, ValidationError};
pub use workflow::{
    DownloadError, StageDriver, TimedStageDriver, WorkflowError, WorkflowOrchestrator,
    WorkflowState,
};
