use serde::{Deserialize, Serialize};

use crate::catalog::MetricDescriptor;
use crate::format;

// ---------------------------------------------------------------------------
// KpiSummary — Headline value and period delta for one metric
// ---------------------------------------------------------------------------

/// Headline figure of a metric.
///
/// `delta` is the fractional change of the latest point over the one
/// before it, absent when it cannot be computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub value: u64,
    pub delta: Option<f64>,
}

// ---------------------------------------------------------------------------
// KpiDisplay — KPI card tuple handed to the renderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiDisplay {
    pub id: String,
    pub label: String,
    pub value: String,
    pub delta: Option<f64>,
    pub formatted_delta: Option<String>,
    pub color: String,
    pub has_chart: bool,
}

impl KpiDisplay {
    /// Format a summary using the metric's label, prefix and color.
    pub fn new(descriptor: &MetricDescriptor, summary: KpiSummary) -> Self {
        Self {
            id: descriptor.id.to_string(),
            label: descriptor.label.to_string(),
            value: format!(
                "{}{}",
                descriptor.kpi_prefix,
                format::compact(Some(summary.value as f64))
            ),
            delta: summary.delta,
            formatted_delta: summary.delta.map(format::delta),
            color: descriptor.color.to_string(),
            has_chart: descriptor.chart.is_some(),
        }
    }
}
