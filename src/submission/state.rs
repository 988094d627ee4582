// src/submission/state.rs
use serde::Serialize;

use crate::types::FileInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    /// `Succeeded` and `Failed` rest next to `Idle`: the form stays usable
    /// and a new attempt may start from them.
    pub fn accepts_submission(self) -> bool {
        matches!(
            self,
            SubmissionState::Idle | SubmissionState::Succeeded | SubmissionState::Failed
        )
    }

    pub fn is_busy(self) -> bool {
        !self.accepts_submission()
    }
}

/// Visual progress only; nothing depends on it for correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Progress {
    #[default]
    Hidden,
    Indeterminate,
    Complete,
}

/// What the upload form currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub file_info: Option<FileInfo>,
    pub submit_enabled: bool,
    pub progress: Progress,
}

impl Default for FormView {
    fn default() -> Self {
        Self {
            file_info: None,
            submit_enabled: true,
            progress: Progress::Hidden,
        }
    }
}

impl FormView {
    pub(crate) fn begin_submission(&mut self) {
        self.submit_enabled = false;
        self.progress = Progress::Indeterminate;
    }

    pub(crate) fn response_received(&mut self) {
        self.progress = Progress::Complete;
    }

    pub(crate) fn finish_submission(&mut self) {
        self.submit_enabled = true;
        self.progress = Progress::Hidden;
    }
}
