//! Concurrent fetch, parse and KPI derivation for one tab.
//!
//! All feeds of a tab are requested together and the aggregator waits for
//! every one of them to settle before building the [`TabSnapshot`]. A feed
//! that fails degrades to an empty series and raises the advisory flag;
//! it never blocks or corrupts the other feeds.

use std::collections::BTreeMap;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, KpiPolicy};
use crate::config::ADVISORY_MESSAGE;
use crate::fetcher::{FeedFetcher, FetchOutcome};
use crate::models::{FeedSource, KpiSummary, MetricSeries, TimeSeriesPoint};
use crate::parser;

// ---------------------------------------------------------------------------
// TabSnapshot
// ---------------------------------------------------------------------------

/// A feed that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedFailure {
    pub metric: String,
    pub error: String,
}

/// Everything one pipeline run produced for a tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabSnapshot {
    pub series: BTreeMap<String, MetricSeries>,
    pub kpis: BTreeMap<String, KpiSummary>,
    pub failures: Vec<FeedFailure>,
}

impl TabSnapshot {
    /// Points of a metric; empty for metrics that were not loaded.
    pub fn series(&self, metric: &str) -> &[TimeSeriesPoint] {
        self.series
            .get(metric)
            .map(|s| s.points.as_slice())
            .unwrap_or(&[])
    }

    /// KPI of a metric; zero with no delta for metrics that were not loaded.
    pub fn kpi(&self, metric: &str) -> KpiSummary {
        self.kpis.get(metric).copied().unwrap_or_default()
    }

    /// True if at least one feed failed to load.
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Dashboard-wide message shown when any feed failed.
    pub fn advisory(&self) -> Option<&'static str> {
        self.has_errors().then_some(ADVISORY_MESSAGE)
    }
}

// ---------------------------------------------------------------------------
// MetricsAggregator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MetricsAggregator {
    fetcher: FeedFetcher,
}

impl MetricsAggregator {
    pub fn new(fetcher: FeedFetcher) -> Self {
        Self { fetcher }
    }

    /// Fetch every source concurrently, then parse and summarize each.
    ///
    /// Always returns a complete snapshot with one series and one KPI per
    /// source. Failures are recorded in [`TabSnapshot::failures`].
    pub async fn load(&self, sources: &[FeedSource]) -> TabSnapshot {
        let outcomes = join_all(sources.iter().map(|source| self.fetcher.fetch(source))).await;

        let mut snapshot = TabSnapshot::default();
        for (source, outcome) in sources.iter().zip(outcomes) {
            let points = match outcome {
                FetchOutcome::Unconfigured => Vec::new(),
                FetchOutcome::Fetched(text) => parser::parse(&text, &source.metric),
                FetchOutcome::Failed(e) => {
                    tracing::warn!(metric = %source.metric, error = %e, "feed failed to load");
                    snapshot.failures.push(FeedFailure {
                        metric: source.metric.clone(),
                        error: e.to_string(),
                    });
                    Vec::new()
                }
            };
            let series = MetricSeries::new(&source.metric, points);
            if series.is_empty() {
                tracing::info!(metric = %source.metric, "series is empty");
            }

            let policy = catalog::metric(&source.metric)
                .map(|d| d.kpi_policy)
                .unwrap_or_default();
            snapshot
                .kpis
                .insert(source.metric.clone(), summarize(&series, policy));
            snapshot.series.insert(source.metric.clone(), series);
        }

        snapshot
    }
}

// ---------------------------------------------------------------------------
// KPI derivation
// ---------------------------------------------------------------------------

/// Latest value and its delta against the preceding point.
///
/// Only the last two points are consulted. The delta is absent with fewer
/// than two points or when the preceding total is zero.
pub fn kpi(series: &MetricSeries) -> KpiSummary {
    let Some(last) = series.last() else {
        return KpiSummary::default();
    };

    let delta = series
        .previous()
        .filter(|prev| prev.total != 0)
        .map(|prev| last.total as f64 / prev.total as f64 - 1.0);

    KpiSummary {
        value: last.total,
        delta,
    }
}

/// Derive a KPI under the given policy.
pub fn summarize(series: &MetricSeries, policy: KpiPolicy) -> KpiSummary {
    match policy {
        KpiPolicy::LatestWithDelta => kpi(series),
        KpiPolicy::FirstValueOnly => KpiSummary {
            value: series.first().map(|p| p.total).unwrap_or(0),
            delta: None,
        },
    }
}
