use serde::{Deserialize, Serialize};

use crate::config::NEUTRAL_COLOR;

// ---------------------------------------------------------------------------
// BarDescriptor — One bar series drawn by the chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarDescriptor {
    /// Field of the series point the bar reads.
    pub key: String,
    pub name: String,
    pub color: String,
}

// ---------------------------------------------------------------------------
// ChartConfig — Declarative presentation parameters for the active metric
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub left_axis_label: String,
    pub right_axis_label: String,
    pub has_right_axis: bool,
    pub stacked: bool,
    pub value_prefix: String,
    pub bars: Vec<BarDescriptor>,
}

impl ChartConfig {
    /// Label of the left axis when no metric is charted.
    pub const NEUTRAL_LEFT_LABEL: &'static str = "Monthly";

    /// Config for an unknown or chartless selection: no bars, plain labels.
    pub fn neutral() -> Self {
        Self {
            left_axis_label: Self::NEUTRAL_LEFT_LABEL.to_string(),
            right_axis_label: String::new(),
            has_right_axis: false,
            stacked: false,
            value_prefix: String::new(),
            bars: Vec::new(),
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.bars.is_empty()
    }

    /// Color of the first bar, or the neutral color if there are none.
    pub fn primary_color(&self) -> &str {
        self.bars
            .first()
            .map(|b| b.color.as_str())
            .unwrap_or(NEUTRAL_COLOR)
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::neutral()
    }
}
