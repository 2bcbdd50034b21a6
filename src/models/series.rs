use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TimeSeriesPoint — Single dated total parsed from a feed row
// ---------------------------------------------------------------------------

/// One row of a feed. The date is kept as the raw label from the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub total: u64,
}

impl TimeSeriesPoint {
    pub fn new(date: impl Into<String>, total: u64) -> Self {
        Self {
            date: date.into(),
            total,
        }
    }
}

// ---------------------------------------------------------------------------
// MetricSeries — Ordered points for one metric
// ---------------------------------------------------------------------------

/// The points of one metric in feed-row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub metric: String,
    pub points: Vec<TimeSeriesPoint>,
}

impl MetricSeries {
    pub fn new(metric: impl Into<String>, points: Vec<TimeSeriesPoint>) -> Self {
        Self {
            metric: metric.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&TimeSeriesPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TimeSeriesPoint> {
        self.points.last()
    }

    /// The point immediately before the last one.
    pub fn previous(&self) -> Option<&TimeSeriesPoint> {
        self.points.len().checked_sub(2).map(|i| &self.points[i])
    }
}
