// src/charts/mod.rs
//! Chart models derived from an analysis and the registry that keeps them alive

pub mod adapter;
pub mod registry;

use serde::{Deserialize, Serialize};

pub use adapter::{describe, describe_all};
pub use registry::{ChartBackend, ChartHandle, ChartRegistry, HeadlessBackend};

/// Advisory display range for score axes.
pub const SCORE_RANGE: ValueRange = ValueRange {
    min: 0.0,
    max: 100.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Radar,
    Ring,
    Bar,
    PolarArea,
}

/// The four chart positions on the results surface, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSlot {
    Skills,
    Experience,
    Education,
    Compliance,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 4] = [
        ChartSlot::Skills,
        ChartSlot::Experience,
        ChartSlot::Education,
        ChartSlot::Compliance,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ChartSlot::Skills => "skillsChart",
            ChartSlot::Experience => "experienceChart",
            ChartSlot::Education => "educationChart",
            ChartSlot::Compliance => "complianceChart",
        }
    }

    pub fn kind(self) -> ChartKind {
        match self {
            ChartSlot::Skills => ChartKind::Radar,
            ChartSlot::Experience => ChartKind::Ring,
            ChartSlot::Education => ChartKind::Bar,
            ChartSlot::Compliance => ChartKind::PolarArea,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartSlot::Skills => "Skills Analysis",
            ChartSlot::Experience => "Experience Match",
            ChartSlot::Education => "Education Fit",
            ChartSlot::Compliance => "Job Compliance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSeries {
    pub fn category_count(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Everything a rendering backend needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    pub id: String,
    pub kind: ChartKind,
    pub title: String,
    pub series: ChartSeries,
    pub value_range: Option<ValueRange>,
}
