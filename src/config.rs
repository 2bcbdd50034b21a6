use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{self, TabDescriptor};
use crate::error::Result;
use crate::models::FeedSource;

pub const DEFAULT_USER_AGENT: &str = concat!("rwa-metrics/", env!("CARGO_PKG_VERSION"));
pub const ADVISORY_MESSAGE: &str = "Failed to load some data feeds";
pub const NEUTRAL_COLOR: &str = "#fff";
pub const CONFIG_FILE_NAME: &str = "feeds.json";

pub fn default_config_path() -> PathBuf {
    if let Some(dir) = dirs::config_dir() {
        dir.join("rwa-metrics").join(CONFIG_FILE_NAME)
    } else {
        PathBuf::from(".rwa-metrics").join(CONFIG_FILE_NAME)
    }
}

// ---------------------------------------------------------------------------
// FeedConfig
// ---------------------------------------------------------------------------

/// Feed URL per metric id. A metric without a URL is disabled and renders
/// as an empty series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedConfig {
    urls: BTreeMap<String, String>,
}

impl FeedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, metric: impl Into<String>, url: impl Into<String>) -> Self {
        self.set_url(metric, url);
        self
    }

    /// Set a metric's URL. A blank URL disables the metric.
    pub fn set_url(&mut self, metric: impl Into<String>, url: impl Into<String>) {
        let metric = metric.into();
        let url = url.into();
        if url.trim().is_empty() {
            self.urls.remove(&metric);
        } else {
            self.urls.insert(metric, url);
        }
    }

    pub fn url(&self, metric: &str) -> Option<&str> {
        self.urls.get(metric).map(String::as_str)
    }

    /// Read each catalog metric's URL from its environment variable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read each catalog metric's URL through `lookup`, keyed by env var name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();
        for descriptor in catalog::metrics() {
            if let Some(url) = lookup(descriptor.env_var) {
                config.set_url(descriptor.id, url);
            }
        }
        config
    }

    /// Parse a JSON object of `metric id -> url` (null disables a metric).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Option<String>> = serde_json::from_str(json)?;
        let mut config = Self::new();
        for (metric, url) in raw {
            if catalog::metric(&metric).is_none() {
                tracing::warn!(metric = %metric, "feed configured for unknown metric");
            }
            if let Some(url) = url {
                config.set_url(metric, url);
            }
        }
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Load the default config file if present, else the environment.
    pub fn load_default() -> Result<Self> {
        let path = default_config_path();
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading feed config");
            Self::from_json_file(&path)
        } else {
            Ok(Self::from_env())
        }
    }

    /// Feed sources of a tab, in the tab's metric order.
    pub fn sources_for(&self, tab: &TabDescriptor) -> Vec<FeedSource> {
        tab.metrics
            .iter()
            .map(|metric| FeedSource::new(*metric, self.url(metric).map(str::to_string)))
            .collect()
    }
}
