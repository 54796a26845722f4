//! Generated artifacts and where they get saved.

mod sink;

pub use sink::{ArtifactSink, DirectorySink};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output formats the backend produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    Pdf,
    Docx,
}

impl ArtifactFormat {
    /// Both formats, in display order.
    pub const ALL: [ArtifactFormat; 2] = [ArtifactFormat::Pdf, ArtifactFormat::Docx];

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactFormat::Pdf => "pdf",
            ArtifactFormat::Docx => "docx",
        }
    }

    /// Upper-case label for messages.
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactFormat::Pdf => "PDF",
            ArtifactFormat::Docx => "DOCX",
        }
    }

    /// File name for this format, e.g. `documentation.pdf`.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension())
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ArtifactFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(ArtifactFormat::Pdf),
            "docx" => Ok(ArtifactFormat::Docx),
            other => Err(format!("unknown artifact format: {}", other)),
        }
    }
}
