//! Serializable run diagnostics: stage timings and per-axis statistics.
use crate::types::Axis;
use serde::{Deserialize, Serialize};

/// Timing entry describing a single stage of the pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one axis or one run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

/// Per-axis statistics gathered while unwrapping.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisReport {
    pub axis: Axis,
    pub total_pixels: usize,
    /// Pixels that survived the modulation mask.
    pub valid_pixels: usize,
    /// Pixels rejected for low modulation.
    pub masked_pixels: usize,
    pub order_min: u32,
    pub order_max: u32,
    pub mean_modulation: f64,
    pub timing: TimingBreakdown,
}

/// Diagnostics of a full unwrapping run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnwrapDiagnostics {
    pub width: usize,
    pub height: usize,
    pub total_ms: f64,
    pub x: AxisReport,
    pub y: AxisReport,
}
