//! Chart datasets for the dashboard.
//!
//! The charting library is an external collaborator; this module only
//! shapes statistics into `{labels, data, backgroundColor}` datasets it
//! can draw directly.

use brick_core::scene::Scene;
use serde::Serialize;

/// Slice colors for the type-distribution doughnut, cycled when there are
/// more types than entries.
pub const TYPE_PALETTE: [&str; 5] = ["#ef4444", "#3b82f6", "#10b981", "#eab308", "#8b5cf6"];

/// One chart dataset with parallel label/value/color columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub labels: Vec<String>,
    pub data: Vec<usize>,
    pub background_color: Vec<String>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Brick count per type designation, in first-placed order. Palette
/// colors are assigned in the same order.
pub fn type_distribution(scene: &Scene) -> ChartData {
    let mut chart = ChartData::default();
    for (i, (kind, count)) in scene.type_counts().into_iter().enumerate() {
        chart.labels.push(kind.to_string());
        chart.data.push(count);
        chart
            .background_color
            .push(TYPE_PALETTE[i % TYPE_PALETTE.len()].to_string());
    }
    chart
}

/// Brick count per color. Slices are filled with the brick color itself
/// and labelled by first-placed order.
pub fn color_distribution(scene: &Scene) -> ChartData {
    let mut chart = ChartData::default();
    for (i, (color, count)) in scene.color_counts().into_iter().enumerate() {
        chart.labels.push(format!("Color {}", i + 1));
        chart.data.push(count);
        chart.background_color.push(color.as_str().to_string());
    }
    log::trace!("chart: {} color slices", chart.data.len());
    chart
}
