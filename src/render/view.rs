// src/render/view.rs
use serde::Serialize;
use std::time::Duration;

use crate::charts::ChartSlot;

/// A card on the results surface that gets an entrance animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Chart(ChartSlot),
    AdditionalPoints,
    Improvements,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntranceCue {
    pub panel: Panel,
    pub delay: Duration,
}

/// What the results surface is currently showing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultsView {
    pub visible: bool,
    pub score: Option<String>,
    pub score_description: Option<String>,
    pub additional_points: Option<Vec<String>>,
    pub improvements: Option<Vec<String>>,
    pub entrance: Vec<EntranceCue>,
}

impl ResultsView {
    pub fn revealed() -> Self {
        Self {
            visible: true,
            ..Self::default()
        }
    }

    pub fn is_cleared(&self) -> bool {
        *self == Self::default()
    }
}
