use std::io::Write;

use tempfile::{NamedTempFile, TempDir};

/// Config pointing at a port nothing listens on, so any request fails fast
fn unreachable_backend_config() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[backend]
base_url = "http://127.0.0.1:9"
timeout_secs = 2

[workflow]
stage_delays_ms = [0, 0, 0, 0]
"#
    )
    .unwrap();
    file.flush().unwrap();
    file
}

async fn run_cli(args: &[&str], config: &NamedTempFile) -> std::process::Output {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_docpilot"))
        .arg("--config")
        .arg(config.path())
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .await
        .expect("Failed to run docpilot")
}

#[tokio::test]
async fn test_wrong_extension_fails_before_upload() {
    let config = unreachable_backend_config();
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data.txt");
    std::fs::write(&data, "a,b,c").unwrap();

    let output = run_cli(&["process", data.to_str().unwrap()], &config).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid file type"));
    assert!(!stderr.contains("Could not connect"));
}

#[tokio::test]
async fn test_unreachable_backend_reports_processing_failure() {
    let config = unreachable_backend_config();
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("report.pbit");
    std::fs::write(&template, b"PK\x03\x04").unwrap();

    let output = run_cli(&["process", template.to_str().unwrap()], &config).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Processing failed"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[x] Processing Failed"));
    assert!(!temp.path().join("documentation.pdf").exists());
}

#[tokio::test]
async fn test_missing_explicit_config_fails() {
    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_docpilot"))
        .args(["--config", "/nonexistent/docpilot.toml", "download", "pdf"])
        .output()
        .await
        .expect("Failed to run docpilot");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config"));
}
