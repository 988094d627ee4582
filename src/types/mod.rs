// src/types/mod.rs
pub mod analysis;
pub mod response;
pub mod upload;

pub use analysis::{AnalysisResult, ScoreMap, TextBlock};
pub use response::{HealthStatus, ScoringResponse, SessionHandle};
pub use upload::{FileInfo, SubmissionRequest, UploadFile};
