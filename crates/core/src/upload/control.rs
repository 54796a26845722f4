use std::sync::Arc;

use tracing::debug;

use crate::notify::{Notification, Notifier};

use super::{CandidateFile, ValidationError};

/// How a file reached the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Picker,
    Drop,
}

/// Holds at most one validated file until the user confirms it.
pub struct UploadControl {
    required_extension: String,
    notifier: Arc<dyn Notifier>,
    selected: Option<CandidateFile>,
}

impl UploadControl {
    pub fn new(required_extension: impl Into<String>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            required_extension: required_extension.into(),
            notifier,
            selected: None,
        }
    }

    pub fn required_extension(&self) -> &str {
        &self.required_extension
    }

    /// Offer a file. Rejected files leave the current selection untouched.
    pub fn select(
        &mut self,
        file: CandidateFile,
        source: SelectionSource,
    ) -> Result<(), ValidationError> {
        if !file.has_extension(&self.required_extension) {
            self.notifier.notify(Notification::error(
                "Invalid file type",
                format!("Please upload a {} file", self.required_extension),
            ));
            return Err(ValidationError::InvalidExtension {
                file_name: file.name().to_string(),
                expected: self.required_extension.clone(),
            });
        }

        debug!(
            "Selected {} ({}) via {:?}",
            file.name(),
            file.display_size(),
            source
        );
        self.selected = Some(file);
        Ok(())
    }

    /// Offer the first file of a drop. An empty drop changes nothing.
    pub fn drop_files(&mut self, files: Vec<CandidateFile>) -> Result<(), ValidationError> {
        match files.into_iter().next() {
            Some(file) => self.select(file, SelectionSource::Drop),
            None => Ok(()),
        }
    }

    /// Discard the pending selection.
    pub fn remove(&mut self) {
        self.selected = None;
    }

    pub fn pending(&self) -> Option<&CandidateFile> {
        self.selected.as_ref()
    }

    /// Take the pending file, clearing the selection.
    pub fn take_confirmed(&mut self) -> Option<CandidateFile> {
        self.selected.take()
    }

    /// Hand the pending file to `on_confirm` exactly once.
    ///
    /// Returns `None` without calling `on_confirm` when nothing is selected.
    pub fn confirm<F, R>(&mut self, on_confirm: F) -> Option<R>
    where
        F: FnOnce(CandidateFile) -> R,
    {
        self.take_confirmed().map(on_confirm)
    }
}
