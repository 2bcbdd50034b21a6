pub mod chart;
pub mod feed;
pub mod kpi;
pub mod series;

pub use chart::{BarDescriptor, ChartConfig};
pub use feed::FeedSource;
pub use kpi::{KpiDisplay, KpiSummary};
pub use series::{MetricSeries, TimeSeriesPoint};
