//! Stage enum and checklist step types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the workflow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Waiting for a file.
    #[default]
    Idle,
    /// Upload request in flight.
    Uploading,
    /// Backend extracts visuals and measures from the template.
    Extracting,
    /// Backend generates the documentation.
    Generating,
    /// Backend pushes the result to the wiki.
    UploadingResult,
    /// Artifacts are ready to download.
    Complete,
    /// Upload failed; the workflow halted.
    Error,
}

impl Stage {
    /// Stage name as used on the wire and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Uploading => "uploading",
            Stage::Extracting => "extracting",
            Stage::Generating => "generating",
            Stage::UploadingResult => "uploading-result",
            Stage::Complete => "complete",
            Stage::Error => "error",
        }
    }

    /// Stage that follows this one in the fixed progression, if any.
    ///
    /// `Idle`, `Complete` and `Error` have no automatic successor.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Uploading => Some(Stage::Extracting),
            Stage::Extracting => Some(Stage::Generating),
            Stage::Generating => Some(Stage::UploadingResult),
            Stage::UploadingResult => Some(Stage::Complete),
            Stage::Idle | Stage::Complete | Stage::Error => None,
        }
    }

    /// True while a submission is being processed.
    pub fn is_processing(&self) -> bool {
        matches!(
            self,
            Stage::Uploading | Stage::Extracting | Stage::Generating | Stage::UploadingResult
        )
    }

    /// True when a new file may be submitted. A finished run must be reset first.
    pub fn accepts_submission(&self) -> bool {
        matches!(self, Stage::Idle | Stage::Error)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the progress checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub stage: Stage,
    pub label: &'static str,
}

/// The five tracked steps, in order.
pub const TRACKED_STEPS: [Step; 5] = [
    Step {
        stage: Stage::Uploading,
        label: "Uploading File",
    },
    Step {
        stage: Stage::Extracting,
        label: "Extracting Metadata",
    },
    Step {
        stage: Stage::Generating,
        label: "Generating Documentation",
    },
    Step {
        stage: Stage::UploadingResult,
        label: "Uploading to Confluence",
    },
    Step {
        stage: Stage::Complete,
        label: "Complete",
    },
];

/// Status of a checklist row relative to the current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Done,
    InProgress,
    Pending,
}
