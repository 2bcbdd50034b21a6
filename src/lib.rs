//! Data pipeline for the real-world-asset metrics dashboard.
//!
//! Each dashboard tab is backed by a handful of comma-delimited feeds, one
//! per metric. The pipeline fetches them concurrently, tolerating partial
//! failure, parses them into time series, derives a KPI per metric and
//! maps the user's active metric to a declarative chart configuration.
//! Rendering is left to the caller, which consumes a [`RenderModel`].
//!
//! # Quick start
//!
//! ```no_run
//! use rwa_metrics::{Dashboard, FeedConfig};
//!
//! # async fn example() -> rwa_metrics::Result<()> {
//! let feeds = FeedConfig::new()
//!     .with_url("deposits", "https://example.com/deposits.csv")
//!     .with_url("borrows", "https://example.com/borrows.csv");
//! let dashboard = Dashboard::builder().feeds(feeds).build()?;
//!
//! let mut session = dashboard.open_tab("private-credit")?;
//! dashboard.run(&mut session).await;
//! let model = session.select("borrows");
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod models;
pub mod parser;
pub mod session;

pub use aggregator::{FeedFailure, MetricsAggregator, TabSnapshot};
#[cfg(feature = "blocking")]
pub use blocking::BlockingDashboard;
pub use config::FeedConfig;
pub use error::{DashboardError, Result};
pub use fetcher::{FeedFetcher, FetchOutcome};
pub use models::{ChartConfig, FeedSource, KpiDisplay, KpiSummary, MetricSeries, TimeSeriesPoint};
pub use session::{RenderModel, TabSession, TabState};

use std::fmt;
use std::time::Duration;

use catalog::TabDescriptor;

// ---------------------------------------------------------------------------
// DashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Dashboard`].
///
/// Use [`Dashboard::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](DashboardBuilder::build).
pub struct DashboardBuilder {
    feeds: Option<FeedConfig>,
    timeout: Option<Duration>,
    user_agent: String,
    client: Option<reqwest::Client>,
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self {
            feeds: None,
            timeout: None,
            user_agent: config::DEFAULT_USER_AGENT.to_string(),
            client: None,
        }
    }
}

impl DashboardBuilder {
    /// Set the feed URLs.
    ///
    /// If not set, URLs are read from the environment (see
    /// [`FeedConfig::from_env`]).
    pub fn feeds(mut self, feeds: FeedConfig) -> Self {
        self.feeds = Some(feeds);
        self
    }

    /// Set a per-request timeout.
    ///
    /// No timeout is applied by default; the HTTP client's own behaviour
    /// is used.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the `User-Agent` sent with feed requests.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Use an existing HTTP client. Timeout and user agent settings are
    /// then ignored.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the dashboard. Fails only if the HTTP client cannot be built.
    pub fn build(self) -> Result<Dashboard> {
        let client = match self.client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder().user_agent(self.user_agent);
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };
        let feeds = self.feeds.unwrap_or_else(FeedConfig::from_env);
        Ok(Dashboard {
            feeds,
            aggregator: MetricsAggregator::new(FeedFetcher::new(client)),
        })
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Entry point: feed configuration plus the aggregator that loads tabs.
///
/// Created via [`Dashboard::builder()`].
pub struct Dashboard {
    feeds: FeedConfig,
    aggregator: MetricsAggregator,
}

impl Dashboard {
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    /// Look up a tab by id.
    pub fn tab(&self, tab_id: &str) -> Result<&'static TabDescriptor> {
        catalog::tab(tab_id).ok_or_else(|| DashboardError::NotFound(format!("Unknown tab: {tab_id}")))
    }

    /// The configured feed sources of a tab.
    pub fn sources(&self, tab_id: &str) -> Result<Vec<FeedSource>> {
        Ok(self.feeds.sources_for(self.tab(tab_id)?))
    }

    /// Run the pipeline for a tab and return its snapshot.
    ///
    /// Feed failures do not make this fail; they are reported in the
    /// snapshot. Only an unknown tab id is an error.
    pub async fn load_tab(&self, tab_id: &str) -> Result<TabSnapshot> {
        let sources = self.sources(tab_id)?;
        Ok(self.aggregator.load(&sources).await)
    }

    /// Start a session for a tab in the `Loading` state.
    pub fn open_tab(&self, tab_id: &str) -> Result<TabSession> {
        Ok(TabSession::new(self.tab(tab_id)?))
    }

    /// Load a session's tab and merge the result.
    ///
    /// Returns `false` if the session discarded the snapshot because it was
    /// closed or already ready. The session stays borrowed until the load
    /// settles; to abandon an in-flight load, drop this future. The session
    /// is then left `Loading` and can be closed. To close a session while a
    /// load runs elsewhere, use [`load_tab`](Self::load_tab) and hand the
    /// snapshot to [`TabSession::complete`] once it arrives.
    pub async fn run(&self, session: &mut TabSession) -> bool {
        let sources = self.feeds.sources_for(session.tab());
        let snapshot = self.aggregator.load(&sources).await;
        session.complete(snapshot)
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let configured: Vec<&str> = catalog::metrics()
            .iter()
            .map(|m| m.id)
            .filter(|id| self.feeds.url(id).is_some())
            .collect();
        let tabs: Vec<&str> = catalog::tabs().iter().map(|t| t.id).collect();
        write!(
            f,
            "Dashboard(tabs=[{}], configured=[{}])",
            tabs.join(", "),
            configured.join(", ")
        )
    }
}
