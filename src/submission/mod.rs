// src/submission/mod.rs
pub mod controller;
pub mod state;

pub use controller::{SubmissionController, SubmitOutcome};
pub use state::{FormView, Progress, SubmissionState};
