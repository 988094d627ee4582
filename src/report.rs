// src/report.rs
//! Downloadable JSON snapshot of the displayed analysis

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::charts::{ChartDescriptor, ChartKind, ChartSeries};
use crate::core::FsOps;
use crate::render::ResultsView;
use crate::types::SessionHandle;
use crate::utils::sanitize_file_component;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub session_id: SessionHandle,
    pub timestamp: DateTime<Utc>,
    pub charts_data: IndexMap<String, ChartData>,
    pub analysis_summary: AnalysisSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartSeries,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub overall_score: String,
    pub score_description: String,
}

impl AnalysisReport {
    pub fn build(session: &SessionHandle, charts: &[ChartDescriptor], view: &ResultsView) -> Self {
        let charts_data = charts
            .iter()
            .map(|chart| {
                (
                    chart.id.clone(),
                    ChartData {
                        kind: chart.kind,
                        data: chart.series.clone(),
                    },
                )
            })
            .collect();

        Self {
            session_id: session.clone(),
            timestamp: Utc::now(),
            charts_data,
            analysis_summary: AnalysisSummary {
                overall_score: view
                    .score
                    .clone()
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                score_description: view
                    .score_description
                    .clone()
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            },
        }
    }

    pub fn file_name(&self) -> String {
        format!(
            "resume-analysis-{}.json",
            sanitize_file_component(self.session_id.as_str())
        )
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }

    /// Write the report into `dir` and return its path.
    pub async fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        FsOps::write_file_safe(&path, &self.to_json()?).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::describe_all;
    use crate::types::AnalysisResult;

    #[test]
    fn summary_falls_back_to_not_available() {
        let report = AnalysisReport::build(
            &SessionHandle::new("abc123"),
            &[],
            &ResultsView::revealed(),
        );
        assert_eq!(report.analysis_summary.overall_score, "N/A");
        assert_eq!(report.analysis_summary.score_description, "N/A");
        assert_eq!(report.file_name(), "resume-analysis-abc123.json");
    }

    #[test]
    fn json_shape_matches_download_format() {
        let charts = describe_all(&AnalysisResult::default());
        let view = ResultsView {
            score: Some("82".to_string()),
            ..ResultsView::revealed()
        };
        let report = AnalysisReport::build(&SessionHandle::new("s-1"), &charts, &view);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["session_id"], "s-1");
        assert_eq!(json["analysis_summary"]["overall_score"], "82");
        assert_eq!(json["charts_data"]["skillsChart"]["type"], "radar");
        assert_eq!(json["charts_data"]["experienceChart"]["type"], "ring");
        assert_eq!(json["charts_data"]["complianceChart"]["type"], "polarArea");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn file_name_is_sanitized() {
        let report = AnalysisReport::build(&SessionHandle::new("../x"), &[], &ResultsView::default());
        assert_eq!(report.file_name(), "resume-analysis-___x.json");
    }
}
