use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::SubmissionError;
use crate::types::analysis::AnalysisResult;

// ===== Service Response Types =====

/// Opaque identifier the scoring service assigns to one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionHandle(String);

impl SessionHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringResponse {
    pub session_id: SessionHandle,
    pub analysis_result: AnalysisResult,
}

#[derive(Deserialize)]
struct RawScoringResponse {
    session_id: Option<Value>,
    analysis_result: Option<Value>,
}

impl ScoringResponse {
    /// Parse a 2xx body. Anything short of an object carrying a non-blank
    /// `session_id` and an object `analysis_result` is malformed.
    pub fn parse(body: &str) -> Result<Self, SubmissionError> {
        let raw: RawScoringResponse = serde_json::from_str(body).map_err(|e| {
            SubmissionError::MalformedResponse(format!("invalid JSON body: {}", e))
        })?;

        let session_id = match raw.session_id {
            Some(Value::String(id)) if !id.trim().is_empty() => SessionHandle(id),
            Some(Value::Number(id)) => SessionHandle(id.to_string()),
            other => {
                return Err(SubmissionError::MalformedResponse(format!(
                    "missing or invalid session_id: {:?}",
                    other
                )))
            }
        };

        let analysis_value = raw.analysis_result.ok_or_else(|| {
            SubmissionError::MalformedResponse("missing analysis_result".to_string())
        })?;
        let analysis_result =
            AnalysisResult::from_value(analysis_value).map_err(SubmissionError::MalformedResponse)?;

        Ok(Self {
            session_id,
            analysis_result,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_success_body() {
        let response = ScoringResponse::parse(
            r#"{"session_id": "abc123", "analysis_result": {"overall_score": 82}}"#,
        )
        .unwrap();
        assert_eq!(response.session_id.as_str(), "abc123");
        assert_eq!(response.analysis_result.overall_score, Some(82.0));
    }

    #[test]
    fn missing_session_is_malformed() {
        let err = ScoringResponse::parse(r#"{"analysis_result": {}}"#).unwrap_err();
        assert!(matches!(err, SubmissionError::MalformedResponse(_)));

        let err =
            ScoringResponse::parse(r#"{"session_id": "  ", "analysis_result": {}}"#).unwrap_err();
        assert!(matches!(err, SubmissionError::MalformedResponse(_)));
    }

    #[test]
    fn non_object_analysis_is_malformed() {
        let err = ScoringResponse::parse(r#"{"session_id": "s1", "analysis_result": [1]}"#)
            .unwrap_err();
        assert!(matches!(err, SubmissionError::MalformedResponse(_)));
    }

    #[test]
    fn garbage_body_is_malformed() {
        for body in ["", "not json", "[]", "null"] {
            let err = ScoringResponse::parse(body).unwrap_err();
            assert!(matches!(err, SubmissionError::MalformedResponse(_)), "{}", body);
        }
    }

    #[test]
    fn health_status_ok() {
        let health: HealthStatus =
            serde_json::from_str(r#"{"status": "ok", "service": "Resume-Scorer"}"#).unwrap();
        assert!(health.is_ok());
    }
}
