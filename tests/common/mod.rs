//! Shared test fixtures for the pipeline integration tests.
//!
//! Provides sample feed bodies and helpers that serve them from an
//! `httpmock` server and build a `Dashboard` pointed at it.

#![allow(dead_code)]

use std::time::Duration;

use httpmock::prelude::*;
use httpmock::Mock;
use rwa_metrics::{Dashboard, FeedConfig, TimeSeriesPoint};

pub const DEPOSITS_CSV: &str = "date,total\n2024-01,100\n2024-02,150\n";

pub const BORROWS_CSV: &str = "date,total,extra\n\
2024-01-31,40000,x\n\
2024-02-29,50000,y\n\
2024-03-31,45000,z\n";

pub const HEADER_ONLY_CSV: &str = "date,total\n";

/// An address that refuses connections.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1/feed.csv";

/// Serve `body` with status 200 at `path`.
pub async fn serve_csv<'a>(server: &'a MockServer, path: &str, body: &str) -> Mock<'a> {
    let path = path.to_string();
    let body = body.to_string();
    server
        .mock_async(move |when, then| {
            when.method(GET).path(path);
            then.status(200)
                .header("content-type", "text/csv")
                .body(body);
        })
        .await
}

/// Like [`serve_csv`], but the response is held back for `delay`.
pub async fn serve_csv_delayed<'a>(
    server: &'a MockServer,
    path: &str,
    body: &str,
    delay: Duration,
) -> Mock<'a> {
    let path = path.to_string();
    let body = body.to_string();
    server
        .mock_async(move |when, then| {
            when.method(GET).path(path);
            then.status(200).delay(delay).body(body);
        })
        .await
}

/// Serve an empty response with the given status at `path`.
pub async fn serve_status<'a>(server: &'a MockServer, path: &str, status: u16) -> Mock<'a> {
    let path = path.to_string();
    server
        .mock_async(move |when, then| {
            when.method(GET).path(path);
            then.status(status);
        })
        .await
}

pub fn dashboard(feeds: FeedConfig) -> Dashboard {
    Dashboard::builder().feeds(feeds).build().unwrap()
}

pub fn points(rows: &[(&str, u64)]) -> Vec<TimeSeriesPoint> {
    rows.iter()
        .map(|(date, total)| TimeSeriesPoint::new(*date, *total))
        .collect()
}
