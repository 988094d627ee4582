//! Headless controller for a resume scoring front end.
//!
//! A [`SubmissionController`] takes a document and a job description, sends
//! them to the scoring service and hands the analysis to a [`ResultRenderer`],
//! which turns it into four chart models and a couple of text panels.

pub mod charts;
pub mod cli;
pub mod core;
pub mod error;
pub mod notify;
pub mod render;
pub mod report;
pub mod submission;
pub mod theme;
pub mod types;
pub mod utils;

pub use charts::{ChartDescriptor, ChartKind, ChartRegistry, ChartSlot};
pub use error::{ReportError, SubmissionError, ValidationError};
pub use notify::{Notifier, Severity, ToastQueue};
pub use render::{RenderOutcome, RenderTiming, ResultRenderer, ResultsView};
pub use report::AnalysisReport;
pub use submission::{SubmissionController, SubmissionState, SubmitOutcome};
pub use types::{AnalysisResult, SessionHandle, SubmissionRequest, UploadFile};
