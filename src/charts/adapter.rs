// src/charts/adapter.rs
//! Pure mapping from an analysis payload to chart-ready series

use super::{ChartDescriptor, ChartSeries, ChartSlot, Dataset, SCORE_RANGE};
use crate::types::{AnalysisResult, ScoreMap};

pub fn skills_series(result: &AnalysisResult) -> ChartSeries {
    series_from(result.skills_match.as_ref(), Some("Skills Match"))
}

/// Slices keep their raw magnitudes; no normalization to 100%.
pub fn experience_series(result: &AnalysisResult) -> ChartSeries {
    series_from(result.experience_match.as_ref(), None)
}

pub fn education_series(result: &AnalysisResult) -> ChartSeries {
    series_from(result.education_match.as_ref(), Some("Education Match"))
}

pub fn compliance_series(result: &AnalysisResult) -> ChartSeries {
    series_from(result.job_compliance.as_ref(), None)
}

/// Build the descriptor for one slot. Missing data gives an empty series.
pub fn describe(slot: ChartSlot, result: &AnalysisResult) -> ChartDescriptor {
    let (series, value_range) = match slot {
        ChartSlot::Skills => (skills_series(result), Some(SCORE_RANGE)),
        ChartSlot::Experience => (experience_series(result), None),
        ChartSlot::Education => (education_series(result), Some(SCORE_RANGE)),
        ChartSlot::Compliance => (compliance_series(result), None),
    };

    ChartDescriptor {
        id: slot.id().to_string(),
        kind: slot.kind(),
        title: slot.title().to_string(),
        series,
        value_range,
    }
}

pub fn describe_all(result: &AnalysisResult) -> Vec<ChartDescriptor> {
    ChartSlot::ALL
        .iter()
        .map(|slot| describe(*slot, result))
        .collect()
}

fn series_from(scores: Option<&ScoreMap>, label: Option<&str>) -> ChartSeries {
    let Some(scores) = scores else {
        return empty_series(label);
    };

    ChartSeries {
        labels: scores.keys().cloned().collect(),
        datasets: vec![Dataset {
            label: label.map(str::to_string),
            data: scores.values().copied().collect(),
        }],
    }
}

fn empty_series(label: Option<&str>) -> ChartSeries {
    ChartSeries {
        labels: Vec::new(),
        datasets: vec![Dataset {
            label: label.map(str::to_string),
            data: Vec::new(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;

    fn scores(entries: &[(&str, f64)]) -> ScoreMap {
        entries
            .iter()
            .map(|(name, score)| (name.to_string(), *score))
            .collect()
    }

    #[test]
    fn skills_keep_key_order_and_values() {
        let result = AnalysisResult {
            skills_match: Some(scores(&[("Python", 90.0), ("SQL", 70.0), ("Go", 10.0)])),
            ..Default::default()
        };

        let series = skills_series(&result);
        assert_eq!(series.labels, vec!["Python", "SQL", "Go"]);
        assert_eq!(series.datasets.len(), 1);
        assert_eq!(series.datasets[0].data, vec![90.0, 70.0, 10.0]);
        assert_eq!(series.datasets[0].label.as_deref(), Some("Skills Match"));
    }

    #[test]
    fn experience_is_not_normalized() {
        let result = AnalysisResult {
            experience_match: Some(scores(&[("Backend", 80.0), ("Frontend", 60.0)])),
            ..Default::default()
        };

        let series = experience_series(&result);
        assert_eq!(series.datasets[0].data, vec![80.0, 60.0]);
        assert_eq!(series.datasets[0].data.iter().sum::<f64>(), 140.0);
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let result = AnalysisResult {
            education_match: Some(scores(&[("Degree", 120.0), ("Certs", -10.0)])),
            ..Default::default()
        };

        let descriptor = describe(ChartSlot::Education, &result);
        assert_eq!(descriptor.series.datasets[0].data, vec![120.0, -10.0]);
        assert_eq!(descriptor.value_range, Some(SCORE_RANGE));
    }

    #[test]
    fn missing_and_empty_mappings_give_empty_series() {
        let result = AnalysisResult {
            job_compliance: Some(ScoreMap::new()),
            ..Default::default()
        };

        for descriptor in describe_all(&result) {
            assert!(descriptor.series.is_empty(), "{}", descriptor.id);
            assert_eq!(descriptor.series.category_count(), 0);
        }
    }

    #[test]
    fn describe_all_follows_slot_order() {
        let descriptors = describe_all(&AnalysisResult::default());
        let ids: Vec<&str> = descriptors.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["skillsChart", "experienceChart", "educationChart", "complianceChart"]
        );
        let kinds: Vec<ChartKind> = descriptors.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChartKind::Radar,
                ChartKind::Ring,
                ChartKind::Bar,
                ChartKind::PolarArea
            ]
        );
    }
}
