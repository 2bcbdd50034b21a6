use serde::Serialize;

// ---------------------------------------------------------------------------
// FeedSource — One external delimited-text resource
// ---------------------------------------------------------------------------

/// A single configured feed: the metric it carries and where to fetch it.
///
/// An absent (or blank) URL means the feed is not configured. That is a
/// valid state which yields an empty series without any network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSource {
    pub metric: String,
    url: Option<String>,
}

impl FeedSource {
    pub fn new(metric: impl Into<String>, url: Option<String>) -> Self {
        Self {
            metric: metric.into(),
            url: url.filter(|u| !u.trim().is_empty()),
        }
    }

    /// A source with a URL.
    pub fn configured(metric: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(metric, Some(url.into()))
    }

    /// A source with no URL.
    pub fn unconfigured(metric: impl Into<String>) -> Self {
        Self::new(metric, None)
    }

    /// The URL to fetch, if this source is configured.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}
