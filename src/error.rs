// src/error.rs
use thiserror::Error;

/// Message shown to the user for every failed submission
pub const GENERIC_FAILURE_MESSAGE: &str = "Analysis failed. Please try again.";

/// Input problems caught before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no resume file selected")]
    MissingFile,

    #[error("job description is blank")]
    BlankJobDescription,
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        "Please select a resume file and enter a job description."
    }
}

/// Everything that can go wrong between submitting a request and receiving a
/// usable analysis.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("scoring service returned status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl SubmissionError {
    /// Text safe to show to the user; detail stays in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmissionError::Validation(err) => err.user_message(),
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        SubmissionError::Transport(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no analysis data available")]
    NoSession,

    #[error(transparent)]
    Io(#[from] anyhow::Error),
}
