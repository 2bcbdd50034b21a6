//! Per-tab dashboard state.
//!
//! A session starts in `Loading` and moves to `Ready` exactly once, when
//! the tab's snapshot is merged. A closed session, or one that is already
//! ready, discards late snapshots, so an abandoned load has no effect.
//! The active metric is explicit session state, changed only by
//! [`TabSession::select`].

use serde::{Deserialize, Serialize};

use crate::aggregator::TabSnapshot;
use crate::catalog::TabDescriptor;
use crate::chart;
use crate::models::{ChartConfig, KpiDisplay, TimeSeriesPoint};

#[derive(Debug, Clone, PartialEq)]
pub enum TabState {
    Loading,
    Ready(TabSnapshot),
    Closed,
}

// ---------------------------------------------------------------------------
// RenderModel — Output handed to the rendering collaborator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub tab: String,
    pub title: String,
    pub loading: bool,
    pub kpis: Vec<KpiDisplay>,
    pub active_metric: String,
    /// Points of the active metric.
    pub series: Vec<TimeSeriesPoint>,
    pub chart: ChartConfig,
    pub advisory: Option<String>,
}

// ---------------------------------------------------------------------------
// TabSession
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TabSession {
    tab: &'static TabDescriptor,
    state: TabState,
    active_metric: String,
}

impl TabSession {
    pub fn new(tab: &'static TabDescriptor) -> Self {
        Self {
            tab,
            state: TabState::Loading,
            active_metric: tab.default_metric.to_string(),
        }
    }

    pub fn tab(&self) -> &'static TabDescriptor {
        self.tab
    }

    pub fn state(&self) -> &TabState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, TabState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, TabState::Ready(_))
    }

    pub fn snapshot(&self) -> Option<&TabSnapshot> {
        match &self.state {
            TabState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// Merge the tab's snapshot. Returns `false` if it was discarded.
    pub fn complete(&mut self, snapshot: TabSnapshot) -> bool {
        match self.state {
            TabState::Loading => {
                if snapshot.has_errors() {
                    tracing::warn!(
                        tab = self.tab.id,
                        failed = snapshot.failures.len(),
                        "tab ready with failed feeds"
                    );
                }
                self.state = TabState::Ready(snapshot);
                true
            }
            TabState::Ready(_) => {
                tracing::debug!(tab = self.tab.id, "tab already ready; snapshot discarded");
                false
            }
            TabState::Closed => {
                tracing::debug!(tab = self.tab.id, "tab closed; snapshot discarded");
                false
            }
        }
    }

    /// Tear the session down. Later snapshots are ignored.
    pub fn close(&mut self) {
        self.state = TabState::Closed;
    }

    pub fn active_metric(&self) -> &str {
        &self.active_metric
    }

    /// Change the active metric and render the result.
    pub fn select(&mut self, metric: &str) -> RenderModel {
        self.active_metric = metric.to_string();
        self.render()
    }

    /// KPI cards of the tab; zero-valued while loading.
    pub fn kpis(&self) -> Vec<KpiDisplay> {
        let empty = TabSnapshot::default();
        let snapshot = self.snapshot().unwrap_or(&empty);
        self.tab
            .descriptors()
            .map(|d| KpiDisplay::new(d, snapshot.kpi(d.id)))
            .collect()
    }

    pub fn render(&self) -> RenderModel {
        let kpis = self.kpis();
        let chart = chart::select(self.tab, &self.active_metric, &kpis);
        let snapshot = self.snapshot();

        RenderModel {
            tab: self.tab.id.to_string(),
            title: self.tab.title.to_string(),
            loading: self.is_loading(),
            active_metric: self.active_metric.clone(),
            series: snapshot
                .map(|s| s.series(&self.active_metric).to_vec())
                .unwrap_or_default(),
            advisory: snapshot.and_then(|s| s.advisory()).map(str::to_string),
            chart,
            kpis,
        }
    }
}
