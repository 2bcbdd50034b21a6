//! Active-metric to chart configuration mapping.

use crate::catalog::{self, TabDescriptor};
use crate::config::NEUTRAL_COLOR;
use crate::models::{BarDescriptor, ChartConfig, KpiDisplay};

/// Build the chart configuration for the active metric of a tab.
///
/// Metrics outside the tab, unknown ids and metrics without a chart
/// template all yield [`ChartConfig::neutral`].
pub fn select(tab: &TabDescriptor, active_metric: &str, kpis: &[KpiDisplay]) -> ChartConfig {
    if !tab.contains(active_metric) {
        return ChartConfig::neutral();
    }
    let Some(template) = catalog::metric(active_metric).and_then(|d| d.chart) else {
        return ChartConfig::neutral();
    };

    ChartConfig {
        left_axis_label: template.left_label.to_string(),
        right_axis_label: template.right_label.to_string(),
        has_right_axis: template.has_right_axis,
        stacked: template.stacked,
        value_prefix: template.value_prefix.to_string(),
        bars: vec![BarDescriptor {
            key: template.bar_key.to_string(),
            name: template.bar_name.to_string(),
            color: color_of(active_metric, kpis).to_string(),
        }],
    }
}

/// Color assigned to a metric's KPI card, or the neutral color.
pub fn color_of<'a>(metric: &str, kpis: &'a [KpiDisplay]) -> &'a str {
    kpis.iter()
        .find(|k| k.id == metric)
        .map(|k| k.color.as_str())
        .unwrap_or(NEUTRAL_COLOR)
}
