//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the backend, notifier and
//! artifact sink seams, allowing the whole workflow to be exercised without
//! a running documentation service.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docpilot_core::testing::{fixtures, MemorySink, MockBackend, RecordingNotifier};
//! use docpilot_core::{TimedStageDriver, WorkflowOrchestrator};
//!
//! let backend = MockBackend::new();
//! let notifier = Arc::new(RecordingNotifier::new());
//! let orchestrator = WorkflowOrchestrator::new(
//!     Arc::new(backend.clone()),
//!     Arc::new(TimedStageDriver::immediate()),
//!     notifier.clone(),
//! );
//!
//! orchestrator.submit(fixtures::pbit_file("report.pbit")).await?;
//! ```

mod memory_sink;
mod mock_backend;
mod recording_notifier;

pub use memory_sink::MemorySink;
pub use mock_backend::{MockBackend, RecordedCall};
pub use recording_notifier::RecordingNotifier;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::upload::CandidateFile;

    /// A small template file with a zip-like header.
    pub fn pbit_file(name: &str) -> CandidateFile {
        let mut bytes = b"PK\x03\x04".to_vec();
        bytes.extend_from_slice(name.as_bytes());
        CandidateFile::new(name, bytes)
    }

    /// A file of exactly `size_bytes` bytes.
    pub fn sized_file(name: &str, size_bytes: usize) -> CandidateFile {
        CandidateFile::new(name, vec![0u8; size_bytes])
    }
}
