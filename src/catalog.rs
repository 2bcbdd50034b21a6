//! Metric and tab lookup tables.
//!
//! Every per-metric decision in the pipeline (which columns to read, how
//! the KPI is derived, what the chart looks like) is taken from a
//! [`MetricDescriptor`] found here by metric id. Adding a metric is a new
//! table entry; no branching elsewhere needs to change.

// ---------------------------------------------------------------------------
// Descriptor types
// ---------------------------------------------------------------------------

/// Which columns of a feed row hold the date label and the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub date: usize,
    pub value: usize,
}

impl ColumnLayout {
    /// Minimum number of columns a row needs to be kept.
    pub fn min_columns(&self) -> usize {
        (self.date.max(self.value) + 1).max(2)
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self { date: 0, value: 1 }
    }
}

/// How a metric's headline value is derived from its series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KpiPolicy {
    /// Last point's total, delta against the point before it.
    #[default]
    LatestWithDelta,
    /// First point's total, never a delta. Used for single-value feeds.
    FirstValueOnly,
}

/// Chart presentation for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartTemplate {
    pub left_label: &'static str,
    pub right_label: &'static str,
    pub has_right_axis: bool,
    pub stacked: bool,
    pub value_prefix: &'static str,
    pub bar_key: &'static str,
    pub bar_name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    /// Environment variable holding the feed URL.
    pub env_var: &'static str,
    pub columns: ColumnLayout,
    pub kpi_policy: KpiPolicy,
    /// Prefix of the formatted KPI value.
    pub kpi_prefix: &'static str,
    pub color: &'static str,
    /// `None` for metrics that only have a KPI card.
    pub chart: Option<ChartTemplate>,
}

/// A dashboard tab: the metrics it shows, in KPI-card order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub metrics: &'static [&'static str],
    pub default_metric: &'static str,
}

impl TabDescriptor {
    pub fn contains(&self, metric: &str) -> bool {
        self.metrics.iter().any(|m| *m == metric)
    }

    /// Descriptors of this tab's metrics in display order.
    pub fn descriptors(&self) -> impl Iterator<Item = &'static MetricDescriptor> + '_ {
        self.metrics.iter().filter_map(|id| metric(id))
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

static METRICS: &[MetricDescriptor] = &[
    MetricDescriptor {
        id: "deposits",
        label: "Deposits",
        env_var: "RWA_PRIVATECREDIT_DEPOSITS",
        columns: ColumnLayout { date: 0, value: 1 },
        kpi_policy: KpiPolicy::LatestWithDelta,
        kpi_prefix: "$",
        color: "var(--accent-primary)",
        chart: Some(ChartTemplate {
            left_label: "Deposited Amount ($)",
            right_label: "",
            has_right_axis: false,
            stacked: true,
            value_prefix: "$",
            bar_key: "total",
            bar_name: "Deposited Amount",
        }),
    },
    MetricDescriptor {
        id: "borrows",
        label: "Borrows",
        env_var: "RWA_PRIVATECREDIT_BORROWS",
        columns: ColumnLayout { date: 0, value: 1 },
        kpi_policy: KpiPolicy::LatestWithDelta,
        kpi_prefix: "",
        color: "var(--accent-secondary)",
        chart: Some(ChartTemplate {
            left_label: "Borrowed Amount ($)",
            right_label: "",
            has_right_axis: false,
            stacked: false,
            value_prefix: "$",
            bar_key: "total",
            bar_name: "Borrowed Amount",
        }),
    },
    MetricDescriptor {
        id: "market_cap",
        label: "Market Cap",
        env_var: "RWA_REALESTATE_MARKET_CAP",
        columns: ColumnLayout { date: 0, value: 1 },
        kpi_policy: KpiPolicy::LatestWithDelta,
        kpi_prefix: "$",
        color: "var(--accent-primary)",
        chart: Some(ChartTemplate {
            left_label: "Market Cap ($)",
            right_label: "",
            has_right_axis: false,
            stacked: false,
            value_prefix: "$",
            bar_key: "total",
            bar_name: "Market Cap",
        }),
    },
    MetricDescriptor {
        id: "properties",
        label: "Properties",
        env_var: "RWA_REALESTATE_PROPERTIES",
        columns: ColumnLayout { date: 0, value: 1 },
        kpi_policy: KpiPolicy::FirstValueOnly,
        kpi_prefix: "",
        color: "var(--accent-secondary)",
        chart: None,
    },
];

static TABS: &[TabDescriptor] = &[
    TabDescriptor {
        id: "private-credit",
        title: "Private Credit",
        metrics: &["deposits", "borrows"],
        default_metric: "deposits",
    },
    TabDescriptor {
        id: "real-estate",
        title: "Real Estate",
        metrics: &["market_cap", "properties"],
        default_metric: "market_cap",
    },
];

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub fn metric(id: &str) -> Option<&'static MetricDescriptor> {
    METRICS.iter().find(|m| m.id == id)
}

pub fn metrics() -> &'static [MetricDescriptor] {
    METRICS
}

pub fn tab(id: &str) -> Option<&'static TabDescriptor> {
    TABS.iter().find(|t| t.id == id)
}

pub fn tabs() -> &'static [TabDescriptor] {
    TABS
}
