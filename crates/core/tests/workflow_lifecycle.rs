//! Workflow lifecycle integration tests.
//!
//! These tests drive the orchestrator through complete user sessions:
//! select -> confirm -> uploading -> extracting -> generating ->
//! uploading-result -> complete -> download

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::TryRecvError;
use tokio_test::{assert_err, assert_ok};

use docpilot_core::{
    testing::{fixtures, MemorySink, MockBackend, RecordingNotifier},
    ArtifactFormat, CandidateFile, DownloadError, NotificationKind, SelectionSource, Stage,
    TimedStageDriver, UploadControl, ValidationError, WorkflowError, WorkflowOrchestrator,
};

/// Test helper wiring a mock backend, notifier and orchestrator together.
struct TestHarness {
    backend: MockBackend,
    notifier: Arc<RecordingNotifier>,
    orchestrator: Arc<WorkflowOrchestrator>,
    upload: UploadControl,
}

impl TestHarness {
    fn new() -> Self {
        // Same shape as the real 1s/2s/3s/2s sequence, scaled down
        Self::with_delays(vec![
            Duration::from_millis(10),
            Duration::from_millis(20),
            Duration::from_millis(30),
            Duration::from_millis(20),
        ])
    }

    fn with_delays(delays: Vec<Duration>) -> Self {
        let backend = MockBackend::new();
        let notifier = Arc::new(RecordingNotifier::new());
        let orchestrator = Arc::new(WorkflowOrchestrator::new(
            Arc::new(backend.clone()),
            Arc::new(TimedStageDriver::new(delays)),
            notifier.clone(),
        ));
        let upload = UploadControl::new(".pbit", notifier.clone());

        Self {
            backend,
            notifier,
            orchestrator,
            upload,
        }
    }

    /// Select and confirm a file, returning what the control handed over.
    fn select_and_confirm(&mut self, file: CandidateFile) -> Result<CandidateFile, ValidationError> {
        self.upload.select(file, SelectionSource::Picker)?;
        Ok(self
            .upload
            .confirm(|file| file)
            .expect("a validated file should be pending"))
    }

    fn spawn_submit(&self, file: CandidateFile) -> tokio::task::JoinHandle<Result<Stage, WorkflowError>> {
        let orchestrator = Arc::clone(&self.orchestrator);
        tokio::spawn(async move { orchestrator.submit(file).await })
    }

    async fn wait_for_stage(&self, expected: Stage, timeout: Duration) -> bool {
        let start = std::time::Instant::now();
        while start.elapsed() < timeout {
            if self.orchestrator.stage() == expected {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        false
    }
}

#[tokio::test]
async fn test_successful_upload_reaches_complete_in_order() {
    let mut harness = TestHarness::new();
    let mut rx = harness.orchestrator.subscribe();

    let file = harness
        .select_and_confirm(fixtures::pbit_file("report.pbit"))
        .unwrap();
    let stage = assert_ok!(harness.orchestrator.submit(file).await);

    assert_eq!(stage, Stage::Complete);
    assert!(harness.orchestrator.download_enabled());

    let mut visited = Vec::new();
    while let Ok(state) = rx.try_recv() {
        visited.push(state.stage());
    }
    assert_eq!(
        visited,
        vec![
            Stage::Uploading,
            Stage::Extracting,
            Stage::Generating,
            Stage::UploadingResult,
            Stage::Complete,
        ]
    );

    let successes = harness.notifier.with_kind(NotificationKind::Success);
    assert_eq!(successes.len(), 1);
    assert_eq!(successes[0].title, "Success!");
}

#[tokio::test]
async fn test_completion_waits_for_all_delays() {
    let harness = TestHarness::new();
    let start = std::time::Instant::now();

    harness
        .orchestrator
        .submit(fixtures::pbit_file("report.pbit"))
        .await
        .unwrap();

    assert!(start.elapsed() >= Duration::from_millis(80));
}

#[tokio::test]
async fn test_wrong_extension_is_rejected_without_request() {
    let mut harness = TestHarness::new();

    let result = harness.select_and_confirm(CandidateFile::new("data.txt", b"a,b".to_vec()));

    assert!(matches!(
        result,
        Err(ValidationError::InvalidExtension { .. })
    ));
    assert_eq!(harness.orchestrator.stage(), Stage::Idle);
    assert!(harness.upload.pending().is_none());
    assert_eq!(harness.backend.upload_count().await, 0);

    let errors = harness.notifier.with_kind(NotificationKind::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].title, "Invalid file type");
}

#[tokio::test]
async fn test_failing_upload_halts_in_error() {
    let harness = TestHarness::new();
    harness.backend.set_upload_status(400).await;
    let mut rx = harness.orchestrator.subscribe();

    let result = harness
        .orchestrator
        .submit(fixtures::pbit_file("report.pbit"))
        .await;
    assert!(matches!(result, Err(WorkflowError::Upload(_))));

    let state = harness.orchestrator.snapshot();
    assert_eq!(state.stage(), Stage::Error);
    assert!(!state.error().unwrap_or_default().is_empty());

    assert_eq!(rx.try_recv().unwrap().stage(), Stage::Uploading);
    assert_eq!(rx.try_recv().unwrap().stage(), Stage::Error);

    // Longer than the whole timed sequence: nothing else may happen
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(harness.orchestrator.stage(), Stage::Error);
}

#[tokio::test]
async fn test_new_file_after_error_restarts_workflow() {
    let mut harness = TestHarness::new();
    harness.backend.set_upload_status(500).await;
    let file = harness
        .select_and_confirm(fixtures::pbit_file("report.pbit"))
        .unwrap();
    assert_err!(harness.orchestrator.submit(file).await);

    harness.backend.set_upload_status(200).await;
    let file = harness
        .select_and_confirm(fixtures::pbit_file("report-v2.pbit"))
        .unwrap();
    let stage = assert_ok!(harness.orchestrator.submit(file).await);

    assert_eq!(stage, Stage::Complete);
    assert_eq!(harness.orchestrator.snapshot().error(), None);
    assert_eq!(harness.backend.upload_count().await, 2);
}

#[tokio::test]
async fn test_submit_while_processing_is_busy() {
    let harness = TestHarness::with_delays(vec![Duration::from_millis(50); 4]);
    let first = harness.spawn_submit(fixtures::pbit_file("report.pbit"));

    assert!(
        harness
            .wait_for_stage(Stage::Generating, Duration::from_secs(2))
            .await
    );
    let second = harness
        .orchestrator
        .submit(fixtures::pbit_file("other.pbit"))
        .await;

    assert!(matches!(
        second,
        Err(WorkflowError::Busy {
            stage: Stage::Generating
        })
    ));
    assert_eq!(first.await.unwrap().unwrap(), Stage::Complete);
    assert_eq!(harness.backend.upload_count().await, 1);
}

#[tokio::test]
async fn test_completed_run_refuses_submission_until_reset() {
    let mut harness = TestHarness::new();
    let file = harness
        .select_and_confirm(fixtures::pbit_file("first.pbit"))
        .unwrap();
    assert_eq!(
        assert_ok!(harness.orchestrator.submit(file).await),
        Stage::Complete
    );

    let mut updates = harness.orchestrator.subscribe();
    let next = harness
        .select_and_confirm(fixtures::sized_file("second.pbit", 3 * 1024 * 1024 / 2))
        .unwrap();
    assert_eq!(next.display_size(), "1.50 MB");

    let refused = harness.orchestrator.submit(next.clone()).await;
    assert!(matches!(
        refused,
        Err(WorkflowError::Busy {
            stage: Stage::Complete
        })
    ));
    assert_eq!(harness.orchestrator.stage(), Stage::Complete);
    assert!(matches!(updates.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(harness.backend.upload_count().await, 1);

    harness.orchestrator.reset();
    assert_eq!(
        assert_ok!(harness.orchestrator.submit(next).await),
        Stage::Complete
    );
    assert_eq!(harness.backend.upload_count().await, 2);
}

#[tokio::test]
async fn test_reset_discards_pending_stage_timers() {
    let harness = TestHarness::with_delays(vec![Duration::from_millis(50); 4]);
    let task = harness.spawn_submit(fixtures::pbit_file("report.pbit"));

    assert!(
        harness
            .wait_for_stage(Stage::Extracting, Duration::from_secs(2))
            .await
    );
    harness.orchestrator.reset();

    let result = task.await.unwrap();
    assert!(matches!(result, Err(WorkflowError::Superseded)));

    let state = harness.orchestrator.snapshot();
    assert_eq!(state.stage(), Stage::Idle);
    assert_eq!(state.error(), None);
    assert!(harness
        .notifier
        .with_kind(NotificationKind::Success)
        .is_empty());
}

#[tokio::test]
async fn test_reset_discards_late_upload_failure() {
    let harness = TestHarness::new();
    harness.backend.set_upload_status(500).await;
    harness.backend.set_latency(Duration::from_millis(50)).await;

    let task = harness.spawn_submit(fixtures::pbit_file("report.pbit"));
    assert!(
        harness
            .wait_for_stage(Stage::Uploading, Duration::from_secs(2))
            .await
    );
    harness.orchestrator.reset();

    assert!(matches!(task.await.unwrap(), Err(WorkflowError::Superseded)));
    assert_eq!(harness.orchestrator.stage(), Stage::Idle);
    assert!(harness.notifier.with_kind(NotificationKind::Error).is_empty());
}

#[tokio::test]
async fn test_stale_submission_does_not_touch_newer_one() {
    let harness = TestHarness::with_delays(vec![Duration::from_millis(40); 4]);
    let first = harness.spawn_submit(fixtures::pbit_file("first.pbit"));
    assert!(
        harness
            .wait_for_stage(Stage::Extracting, Duration::from_secs(2))
            .await
    );

    harness.orchestrator.reset();
    let second = harness.spawn_submit(fixtures::pbit_file("second.pbit"));

    assert!(matches!(first.await.unwrap(), Err(WorkflowError::Superseded)));
    assert_eq!(second.await.unwrap().unwrap(), Stage::Complete);
    assert_eq!(
        harness.notifier.with_kind(NotificationKind::Success).len(),
        1
    );
}

#[tokio::test]
async fn test_sequential_downloads_save_twice() {
    let harness = TestHarness::with_delays(vec![]);
    harness
        .orchestrator
        .submit(fixtures::pbit_file("report.pbit"))
        .await
        .unwrap();
    let sink = MemorySink::new();

    harness
        .orchestrator
        .download(ArtifactFormat::Pdf, &sink)
        .await
        .unwrap();
    harness
        .orchestrator
        .download(ArtifactFormat::Pdf, &sink)
        .await
        .unwrap();

    let saved = sink.saved().await;
    assert_eq!(saved.len(), 2);
    assert!(saved.iter().all(|(name, _)| name == "documentation.pdf"));
    assert_eq!(harness.backend.download_count(ArtifactFormat::Pdf).await, 2);
}

#[tokio::test]
async fn test_concurrent_downloads_are_serialized() {
    let harness = TestHarness::with_delays(vec![]);
    harness
        .orchestrator
        .submit(fixtures::pbit_file("report.pbit"))
        .await
        .unwrap();
    harness.backend.set_latency(Duration::from_millis(50)).await;
    let sink = MemorySink::new();

    let (pdf, docx) = tokio::join!(
        harness.orchestrator.download(ArtifactFormat::Pdf, &sink),
        harness.orchestrator.download(ArtifactFormat::Docx, &sink),
    );

    assert!(pdf.is_ok());
    assert!(matches!(
        docx,
        Err(DownloadError::Busy {
            active: ArtifactFormat::Pdf
        })
    ));
    assert_eq!(harness.backend.download_count(ArtifactFormat::Docx).await, 0);
    assert_eq!(sink.saved().await.len(), 1);

    // Marker cleared: the other format can now go through
    harness
        .orchestrator
        .download(ArtifactFormat::Docx, &sink)
        .await
        .unwrap();
    assert!(sink.get("documentation.docx").await.is_some());
}

#[tokio::test]
async fn test_download_failure_can_be_retried() {
    let harness = TestHarness::with_delays(vec![]);
    harness
        .orchestrator
        .submit(fixtures::pbit_file("report.pbit"))
        .await
        .unwrap();
    harness
        .backend
        .set_download_status(ArtifactFormat::Pdf, 500)
        .await;
    let sink = MemorySink::new();

    assert_err!(harness.orchestrator.download(ArtifactFormat::Pdf, &sink).await);
    assert_eq!(harness.orchestrator.stage(), Stage::Complete);

    harness
        .backend
        .set_download_status(ArtifactFormat::Pdf, 200)
        .await;
    assert_ok!(harness.orchestrator.download(ArtifactFormat::Pdf, &sink).await);

    let titles: Vec<String> = harness
        .notifier
        .notifications()
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(titles, vec!["Success!", "Download failed", "Downloaded!"]);
}
