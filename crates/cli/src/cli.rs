//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use docpilot_core::ArtifactFormat;

#[derive(Parser, Debug)]
#[command(
    name = "docpilot",
    version,
    about = "Upload a Power BI template and download the generated documentation"
)]
pub struct Cli {
    /// Config file (default: $DOCPILOT_CONFIG or ./docpilot.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload a template, follow processing, then download the results
    Process {
        /// Template file to upload
        file: PathBuf,

        /// Which artifacts to download once processing completes
        #[arg(long, value_enum, default_value_t = DownloadChoice::All)]
        download: DownloadChoice,

        /// Directory for downloaded artifacts (overrides config)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Download one artifact of the last processed template
    Download {
        /// pdf or docx
        format: ArtifactFormat,

        /// Directory for the artifact (overrides config)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DownloadChoice {
    Pdf,
    Docx,
    All,
    None,
}

impl DownloadChoice {
    pub fn formats(&self) -> Vec<ArtifactFormat> {
        match self {
            DownloadChoice::Pdf => vec![ArtifactFormat::Pdf],
            DownloadChoice::Docx => vec![ArtifactFormat::Docx],
            DownloadChoice::All => ArtifactFormat::ALL.to_vec(),
            DownloadChoice::None => Vec::new(),
        }
    }
}
