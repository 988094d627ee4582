// src/submission/controller.rs
//! Upload → submit → render → reset state machine
//!
//! Every failure is caught here and turned into a state transition plus a
//! notification. Nothing propagates to the caller as an error.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

use super::state::{FormView, SubmissionState};
use crate::core::ScoringEndpoint;
use crate::error::{ReportError, SubmissionError, ValidationError};
use crate::notify::{Notifier, Severity};
use crate::render::{RenderOutcome, ResultRenderer, ResultsView};
use crate::report::AnalysisReport;
use crate::types::{FileInfo, ScoringResponse, SessionHandle, SubmissionRequest, UploadFile};

const SUCCESS_MESSAGE: &str = "Resume analysis completed successfully!";
const RESET_MESSAGE: &str = "Ready for new analysis";
const NO_REPORT_MESSAGE: &str = "No analysis data available to download";
const REPORT_SAVED_MESSAGE: &str = "Report downloaded successfully";
const REPORT_FAILED_MESSAGE: &str = "Report download failed";

/// How one `submit` call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was in flight; nothing happened.
    Ignored,
    Rejected(ValidationError),
    Succeeded(SessionHandle),
    Failed,
    /// A reset or newer submission made this one irrelevant.
    Superseded,
}

#[derive(Default)]
struct ControllerState {
    state: SubmissionState,
    session: Option<SessionHandle>,
    pending_file: Option<UploadFile>,
    form: FormView,
    /// Bumped by every reset so late responses can tell they are stale.
    epoch: u64,
}

impl ControllerState {
    fn transition(&mut self, next: SubmissionState) {
        debug!("Submission state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

#[derive(Clone)]
pub struct SubmissionController {
    inner: Arc<Mutex<ControllerState>>,
    endpoint: Arc<dyn ScoringEndpoint>,
    renderer: ResultRenderer,
    notifier: Arc<dyn Notifier>,
}

impl SubmissionController {
    pub fn new(
        endpoint: Arc<dyn ScoringEndpoint>,
        renderer: ResultRenderer,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ControllerState::default())),
            endpoint,
            renderer,
            notifier,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state
    }

    pub fn session(&self) -> Option<SessionHandle> {
        self.lock().session.clone()
    }

    pub fn form(&self) -> FormView {
        self.lock().form.clone()
    }

    pub fn pending_file(&self) -> Option<UploadFile> {
        self.lock().pending_file.clone()
    }

    pub fn results(&self) -> ResultsView {
        self.renderer.snapshot()
    }

    pub fn renderer(&self) -> &ResultRenderer {
        &self.renderer
    }

    /// Remember the chosen document and show its metadata. `None` is ignored.
    pub fn select_file(&self, file: Option<UploadFile>) -> Option<FileInfo> {
        let Some(file) = file else {
            debug!("File selection without a file, ignoring");
            return None;
        };

        let info = file.info();
        info!("Selected file: {} ({})", info.name, info.size);

        let mut inner = self.lock();
        inner.form.file_info = Some(info.clone());
        inner.pending_file = Some(file);
        Some(info)
    }

    /// Submit the file picked with [`select_file`](Self::select_file).
    pub async fn submit_pending(&self, job_description: &str) -> SubmitOutcome {
        let request = SubmissionRequest::new(self.pending_file(), job_description);
        self.submit(request).await
    }

    pub async fn submit(&self, request: SubmissionRequest) -> SubmitOutcome {
        let (file, job_description, epoch) = match self.begin(request) {
            Ok(accepted) => accepted,
            Err(outcome) => return outcome,
        };

        match self.endpoint.score(&file, &job_description).await {
            Ok(response) => self.complete(epoch, response).await,
            Err(err) => self.fail(epoch, err),
        }
    }

    /// Back to a blank form from any state. Safe to call repeatedly; only a
    /// reset that actually cleared something notifies.
    pub fn reset(&self) {
        let had_form_content = {
            let mut inner = self.lock();
            let had_content = inner.state != SubmissionState::Idle
                || inner.session.is_some()
                || inner.pending_file.is_some()
                || inner.form != FormView::default();

            inner.epoch += 1;
            inner.session = None;
            inner.pending_file = None;
            inner.form = FormView::default();
            inner.transition(SubmissionState::Idle);
            had_content
        };
        let had_results =
            !self.renderer.snapshot().is_cleared() || self.renderer.live_chart_count() > 0;
        self.renderer.clear();

        if had_form_content || had_results {
            self.notifier.notify(RESET_MESSAGE, Severity::Info);
        } else {
            debug!("Reset with nothing to clear");
        }
    }

    /// Snapshot of the displayed analysis for download.
    pub fn build_report(&self) -> Result<AnalysisReport, ReportError> {
        let Some(session) = self.session() else {
            self.notifier.notify(NO_REPORT_MESSAGE, Severity::Warning);
            return Err(ReportError::NoSession);
        };

        Ok(AnalysisReport::build(
            &session,
            &self.renderer.charts(),
            &self.renderer.snapshot(),
        ))
    }

    pub async fn download_report(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        let report = self.build_report()?;

        match report.write_to(dir).await {
            Ok(path) => {
                self.notifier.notify(REPORT_SAVED_MESSAGE, Severity::Success);
                Ok(path)
            }
            Err(e) => {
                error!("Report export failed: {:#}", e);
                self.notifier.notify(REPORT_FAILED_MESSAGE, Severity::Error);
                Err(ReportError::Io(e))
            }
        }
    }

    fn begin(
        &self,
        request: SubmissionRequest,
    ) -> Result<(UploadFile, String, u64), SubmitOutcome> {
        let rejected = {
            let mut inner = self.lock();
            if !inner.state.accepts_submission() {
                debug!("Submission ignored while {:?}", inner.state);
                return Err(SubmitOutcome::Ignored);
            }

            let resting = inner.state;
            inner.transition(SubmissionState::Validating);
            match request.validate() {
                Ok((file, job_description)) => {
                    inner.transition(SubmissionState::Submitting);
                    inner.form.begin_submission();
                    return Ok((file, job_description, inner.epoch));
                }
                Err(err) => {
                    inner.transition(resting);
                    err
                }
            }
        };

        warn!("Submission rejected: {}", rejected);
        self.notifier
            .notify(rejected.user_message(), Severity::Warning);
        Err(SubmitOutcome::Rejected(rejected))
    }

    async fn complete(&self, epoch: u64, response: ScoringResponse) -> SubmitOutcome {
        let session = response.session_id;
        {
            let mut inner = self.lock();
            if inner.epoch != epoch {
                info!("Discarding analysis for session {} after reset", session);
                return SubmitOutcome::Superseded;
            }
            // Still Submitting: no new request until the render below returns.
            inner.form.response_received();
            inner.session = Some(session.clone());
        }
        info!("Analysis received for session {}", session);

        let outcome = self.renderer.render(&response.analysis_result).await;

        let current = {
            let mut inner = self.lock();
            let current = inner.epoch == epoch;
            if current {
                inner.form.finish_submission();
                inner.transition(SubmissionState::Succeeded);
            }
            current
        };

        if current && outcome == RenderOutcome::Completed {
            self.notifier.notify(SUCCESS_MESSAGE, Severity::Success);
            SubmitOutcome::Succeeded(session)
        } else {
            debug!("Rendering of session {} was superseded", session);
            SubmitOutcome::Superseded
        }
    }

    fn fail(&self, epoch: u64, err: SubmissionError) -> SubmitOutcome {
        error!("Analysis failed: {}", err);
        {
            let mut inner = self.lock();
            if inner.epoch != epoch {
                return SubmitOutcome::Superseded;
            }
            inner.session = None;
            inner.form.finish_submission();
            inner.transition(SubmissionState::Failed);
        }
        // A previous result has no session any more; don't leave it on screen.
        self.renderer.clear();
        self.notifier.notify(err.user_message(), Severity::Error);
        SubmitOutcome::Failed
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
