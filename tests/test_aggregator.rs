//! Aggregation tests: concurrent fetch, partial failure and KPI derivation.

mod common;

use std::time::{Duration, Instant};

use httpmock::prelude::*;
use rwa_metrics::aggregator::{kpi, summarize};
use rwa_metrics::catalog::KpiPolicy;
use rwa_metrics::{FeedConfig, FeedFetcher, FeedSource, FetchOutcome, MetricSeries, MetricsAggregator};

fn aggregator() -> MetricsAggregator {
    MetricsAggregator::new(FeedFetcher::new(reqwest::Client::new()))
}

fn series(rows: &[(&str, u64)]) -> MetricSeries {
    MetricSeries::new("x", common::points(rows))
}

// ---------------------------------------------------------------------------
// load
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_parses_series_and_kpi() {
    let server = MockServer::start_async().await;
    let mock = common::serve_csv(&server, "/deposits.csv", common::DEPOSITS_CSV).await;

    let sources = vec![FeedSource::configured("deposits", server.url("/deposits.csv"))];
    let snapshot = aggregator().load(&sources).await;

    mock.assert_async().await;
    assert_eq!(
        snapshot.series("deposits"),
        common::points(&[("2024-01", 100), ("2024-02", 150)]).as_slice()
    );
    let summary = snapshot.kpi("deposits");
    assert_eq!(summary.value, 150);
    assert!((summary.delta.unwrap() - 0.5).abs() < 1e-9);
    assert!(!snapshot.has_errors());
    assert_eq!(snapshot.advisory(), None);
}

#[tokio::test]
async fn header_only_feed_is_empty_not_failed() {
    let server = MockServer::start_async().await;
    common::serve_csv(&server, "/deposits.csv", common::HEADER_ONLY_CSV).await;

    let sources = vec![FeedSource::configured("deposits", server.url("/deposits.csv"))];
    let snapshot = aggregator().load(&sources).await;

    assert!(snapshot.series("deposits").is_empty());
    assert_eq!(snapshot.kpi("deposits").value, 0);
    assert_eq!(snapshot.kpi("deposits").delta, None);
    assert!(!snapshot.has_errors());
}

#[tokio::test]
async fn unconfigured_source_is_empty_without_request() {
    let server = MockServer::start_async().await;
    let mock = common::serve_csv(&server, "/deposits.csv", common::DEPOSITS_CSV).await;

    let sources = vec![
        FeedSource::unconfigured("deposits"),
        FeedSource::new("borrows", Some("   ".to_string())),
    ];
    let snapshot = aggregator().load(&sources).await;

    assert_eq!(mock.hits_async().await, 0);
    assert!(snapshot.series("deposits").is_empty());
    assert!(snapshot.series("borrows").is_empty());
    assert_eq!(snapshot.kpi("deposits").value, 0);
    assert!(!snapshot.has_errors());
}

#[tokio::test]
async fn failed_source_does_not_affect_siblings() {
    let server = MockServer::start_async().await;
    let failing = common::serve_status(&server, "/deposits.csv", 500).await;
    let ok = common::serve_csv(&server, "/borrows.csv", common::BORROWS_CSV).await;

    let sources = vec![
        FeedSource::configured("deposits", server.url("/deposits.csv")),
        FeedSource::configured("borrows", server.url("/borrows.csv")),
    ];
    let snapshot = aggregator().load(&sources).await;

    failing.assert_async().await;
    ok.assert_async().await;
    assert!(snapshot.series("deposits").is_empty());
    assert_eq!(snapshot.series("borrows").len(), 3);
    assert_eq!(snapshot.kpi("borrows").value, 45000);
    assert!(snapshot.has_errors());
    assert_eq!(snapshot.failures.len(), 1);
    assert_eq!(snapshot.failures[0].metric, "deposits");
    assert_eq!(snapshot.advisory(), Some("Failed to load some data feeds"));
}

#[tokio::test]
async fn transport_error_is_recorded_as_failure() {
    let server = MockServer::start_async().await;
    common::serve_csv(&server, "/borrows.csv", common::BORROWS_CSV).await;

    let sources = vec![
        FeedSource::configured("deposits", common::UNREACHABLE_URL),
        FeedSource::configured("borrows", server.url("/borrows.csv")),
    ];
    let snapshot = aggregator().load(&sources).await;

    assert_eq!(snapshot.failures.len(), 1);
    assert_eq!(snapshot.failures[0].metric, "deposits");
    assert_eq!(snapshot.series("borrows").len(), 3);
}

#[tokio::test]
async fn all_sources_failing_still_yields_complete_snapshot() {
    let server = MockServer::start_async().await;
    common::serve_status(&server, "/deposits.csv", 404).await;
    common::serve_status(&server, "/borrows.csv", 503).await;

    let sources = vec![
        FeedSource::configured("deposits", server.url("/deposits.csv")),
        FeedSource::configured("borrows", server.url("/borrows.csv")),
    ];
    let snapshot = aggregator().load(&sources).await;

    assert_eq!(snapshot.failures.len(), 2);
    assert_eq!(snapshot.series.len(), 2);
    assert_eq!(snapshot.kpis.len(), 2);
}

#[tokio::test]
async fn failed_feed_is_not_retried() {
    let server = MockServer::start_async().await;
    let failing = common::serve_status(&server, "/deposits.csv", 429).await;

    let sources = vec![FeedSource::configured("deposits", server.url("/deposits.csv"))];
    aggregator().load(&sources).await;

    assert_eq!(failing.hits_async().await, 1);
}

#[tokio::test]
async fn first_value_policy_applies_to_properties() {
    let server = MockServer::start_async().await;
    common::serve_csv(&server, "/properties.csv", "date,total\n2024-01,12\n2024-02,15\n").await;

    let sources = vec![FeedSource::configured("properties", server.url("/properties.csv"))];
    let snapshot = aggregator().load(&sources).await;

    assert_eq!(snapshot.kpi("properties").value, 12);
    assert_eq!(snapshot.kpi("properties").delta, None);
}

#[tokio::test]
async fn slow_feeds_are_fetched_concurrently() {
    let delay = Duration::from_millis(600);
    let server = MockServer::start_async().await;
    common::serve_csv_delayed(&server, "/deposits.csv", common::DEPOSITS_CSV, delay).await;
    common::serve_csv_delayed(&server, "/borrows.csv", common::DEPOSITS_CSV, delay).await;
    common::serve_csv_delayed(&server, "/market_cap.csv", common::DEPOSITS_CSV, delay).await;

    let sources = vec![
        FeedSource::configured("deposits", server.url("/deposits.csv")),
        FeedSource::configured("borrows", server.url("/borrows.csv")),
        FeedSource::configured("market_cap", server.url("/market_cap.csv")),
    ];

    let started = Instant::now();
    let snapshot = aggregator().load(&sources).await;
    let elapsed = started.elapsed();

    // Sequential fetching would take at least 1800ms.
    assert!(elapsed < 2 * delay, "took {elapsed:?}");
    for metric in ["deposits", "borrows", "market_cap"] {
        assert_eq!(snapshot.series(metric).len(), 2, "{metric}");
    }
    assert!(!snapshot.has_errors());
}

#[tokio::test]
async fn sources_from_config_follow_tab_order() {
    let feeds = FeedConfig::new().with_url("borrows", "https://example.com/b.csv");
    let tab = rwa_metrics::catalog::tab("private-credit").unwrap();
    let sources = feeds.sources_for(tab);

    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0], FeedSource::unconfigured("deposits"));
    assert_eq!(sources[1].url(), Some("https://example.com/b.csv"));
}

// ---------------------------------------------------------------------------
// fetch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_reports_status_failure() {
    let server = MockServer::start_async().await;
    common::serve_status(&server, "/missing.csv", 404).await;

    let fetcher = FeedFetcher::new(reqwest::Client::new());
    let outcome = fetcher
        .fetch(&FeedSource::configured("deposits", server.url("/missing.csv")))
        .await;

    match outcome {
        FetchOutcome::Failed(rwa_metrics::DashboardError::Status { status, .. }) => {
            assert_eq!(status, 404)
        }
        other => panic!("expected status failure, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_unconfigured_makes_no_request() {
    let fetcher = FeedFetcher::new(reqwest::Client::new());
    let outcome = fetcher.fetch(&FeedSource::unconfigured("deposits")).await;
    assert!(matches!(outcome, FetchOutcome::Unconfigured));
}

// ---------------------------------------------------------------------------
// kpi
// ---------------------------------------------------------------------------

#[test]
fn kpi_of_empty_series_is_zero() {
    let summary = kpi(&MetricSeries::default());
    assert_eq!(summary.value, 0);
    assert_eq!(summary.delta, None);
}

#[test]
fn kpi_of_single_point_has_no_delta() {
    let summary = kpi(&series(&[("2024-01", 80)]));
    assert_eq!(summary.value, 80);
    assert_eq!(summary.delta, None);
}

#[test]
fn kpi_delta_absent_when_previous_is_zero() {
    let summary = kpi(&series(&[("2024-01", 0), ("2024-02", 50)]));
    assert_eq!(summary.value, 50);
    assert_eq!(summary.delta, None);
}

#[test]
fn kpi_delta_uses_last_two_points_only() {
    let summary = kpi(&series(&[
        ("2024-01", 1),
        ("2024-02", 400),
        ("2024-03", 300),
    ]));
    assert_eq!(summary.value, 300);
    assert!((summary.delta.unwrap() - (300.0 / 400.0 - 1.0)).abs() < 1e-9);
}

#[test]
fn kpi_delta_can_be_negative_to_minus_one() {
    let summary = kpi(&series(&[("2024-01", 200), ("2024-02", 0)]));
    assert_eq!(summary.value, 0);
    assert!((summary.delta.unwrap() + 1.0).abs() < 1e-9);
}

#[test]
fn first_value_policy_ignores_later_points() {
    let summary = summarize(&series(&[("a", 5), ("b", 9)]), KpiPolicy::FirstValueOnly);
    assert_eq!(summary.value, 5);
    assert_eq!(summary.delta, None);
    assert_eq!(summarize(&MetricSeries::default(), KpiPolicy::FirstValueOnly).value, 0);
}
