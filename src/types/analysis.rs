// src/types/analysis.rs
//! Analysis payload returned by the scoring service

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Category name to score, in the order the service sent them.
pub type ScoreMap = IndexMap<String, f64>;

// ===== Analysis Result =====

/// Every field is optional: a missing or mistyped field only hides the
/// matching visual, it never fails the whole result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "lenient")]
    pub overall_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub score_description: Option<String>,
    #[serde(default, deserialize_with = "score_map")]
    pub skills_match: Option<ScoreMap>,
    #[serde(default, deserialize_with = "score_map")]
    pub experience_match: Option<ScoreMap>,
    #[serde(default, deserialize_with = "score_map")]
    pub education_match: Option<ScoreMap>,
    #[serde(default, deserialize_with = "score_map")]
    pub job_compliance: Option<ScoreMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub additional_points: Option<TextBlock>,
    #[serde(default, deserialize_with = "lenient")]
    pub improvements: Option<TextBlock>,
}

/// A panel body: either one paragraph or an ordered list of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextBlock {
    Items(Vec<String>),
    Single(String),
}

impl TextBlock {
    pub fn items(&self) -> Vec<String> {
        match self {
            TextBlock::Items(items) => items.clone(),
            TextBlock::Single(text) => vec![text.clone()],
        }
    }
}

impl AnalysisResult {
    /// Build from a raw JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, String> {
        if !value.is_object() {
            return Err(format!("analysis_result is not an object: {}", value));
        }
        serde_json::from_value(value).map_err(|e| e.to_string())
    }
}

// ===== Lenient Field Decoding =====

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }

    match serde_json::from_value::<T>(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            warn!("Ignoring analysis field with unexpected shape: {}", e);
            Ok(None)
        }
    }
}

fn score_map<'de, D>(deserializer: D) -> Result<Option<ScoreMap>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Object(entries) => entries,
        Value::Null => return Ok(None),
        other => {
            warn!("Ignoring score mapping that is not an object: {}", other);
            return Ok(None);
        }
    };

    let mut scores = ScoreMap::with_capacity(entries.len());
    for (name, score) in entries {
        match score.as_f64() {
            Some(score) => {
                scores.insert(name, score);
            }
            None => warn!("Skipping non-numeric score for '{}': {}", name, score),
        }
    }
    Ok(Some(scores))
}
