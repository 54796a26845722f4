mod cli;
mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docpilot_core::{
    load_config, validate_config, ArtifactFormat, ArtifactSink, CandidateFile, Config,
    DirectorySink, DocumentBackend, HttpBackend, Notifier, SelectionSource, TracingNotifier,
    UploadControl, WorkflowOrchestrator,
};

use cli::{Cli, Command};
use render::TrackerPrinter;

/// Config file used when neither --config nor DOCPILOT_CONFIG is given
const DEFAULT_CONFIG_FILE: &str = "docpilot.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?;

    validate_config(&config).context("Configuration validation failed")?;
    info!("Backend: {}", config.backend.base_url);

    match cli.command {
        Command::Process {
            file,
            download,
            out_dir,
        } => {
            let out_dir = out_dir.unwrap_or_else(|| config.download.output_dir.clone());
            process(&config, &file, &download.formats(), &out_dir).await
        }
        Command::Download { format, out_dir } => {
            let out_dir = out_dir.unwrap_or_else(|| config.download.output_dir.clone());
            download_only(&config, format, &out_dir).await
        }
    }
}

/// Load the config file, falling back to defaults when the implicit file is absent.
fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => match std::env::var("DOCPILOT_CONFIG") {
            Ok(path) => (PathBuf::from(path), true),
            Err(_) => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        },
    };

    if !required && !path.exists() {
        info!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
        return Ok(Config::default());
    }

    info!("Loading configuration from {:?}", path);
    load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
}

async fn process(
    config: &Config,
    path: &Path,
    formats: &[ArtifactFormat],
    out_dir: &Path,
) -> Result<()> {
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
    let backend: Arc<dyn DocumentBackend> =
        Arc::new(HttpBackend::new(&config.backend).context("Failed to create HTTP client")?);

    let mut control = UploadControl::new(
        config.upload.required_extension.clone(),
        Arc::clone(&notifier),
    );
    let candidate = CandidateFile::from_path(path).await?;
    control.select(candidate, SelectionSource::Picker)?;

    let file = control
        .take_confirmed()
        .context("No file selected for upload")?;
    info!("Processing {} ({})", file.name(), file.display_size());

    let orchestrator = WorkflowOrchestrator::from_config(config, backend, Arc::clone(&notifier));
    let mut updates = orchestrator.subscribe();
    let mut printer = TrackerPrinter::default();

    let submission = orchestrator.submit(file);
    tokio::pin!(submission);
    let mut open = true;
    let outcome = loop {
        tokio::select! {
            outcome = &mut submission => break outcome,
            update = updates.recv(), if open => open = printer.handle(update),
        }
    };
    // Flush frames queued after the last poll, ending on the final stage
    printer.drain(&mut updates);
    printer.show(&orchestrator.snapshot());
    outcome.context("Processing failed")?;

    let sink = DirectorySink::new(out_dir);
    let mut failed = Vec::new();
    for format in formats {
        match orchestrator.download(*format, &sink).await {
            Ok(path) => println!("Saved {} to {}", format.label(), path.display()),
            Err(e) => {
                warn!("{} download failed: {}", format.label(), e);
                failed.push(format.label());
            }
        }
    }

    if !failed.is_empty() {
        bail!("Could not download: {}", failed.join(", "));
    }
    Ok(())
}

async fn download_only(config: &Config, format: ArtifactFormat, out_dir: &Path) -> Result<()> {
    let backend = HttpBackend::new(&config.backend).context("Failed to create HTTP client")?;

    let bytes = backend
        .download(format)
        .await
        .with_context(|| format!("Failed to download {}", format.label()))?;

    let sink = DirectorySink::new(out_dir);
    let path = sink
        .save(&format.file_name(&config.download.file_stem), &bytes)
        .await
        .with_context(|| format!("Failed to save {} to {:?}", format.label(), sink.dir()))?;

    println!("Saved {} to {}", format.label(), path.display());
    Ok(())
}
