use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rwa_metrics::{Dashboard, FeedConfig};
use tracing_subscriber::EnvFilter;

/// Load one dashboard tab and print its render model as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Tab id, e.g. `private-credit`
    tab: String,

    /// Metric to make active instead of the tab default
    #[arg(long)]
    metric: Option<String>,

    /// JSON file mapping metric ids to feed URLs
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> rwa_metrics::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let feeds = match &cli.config {
        Some(path) => FeedConfig::from_json_file(path)?,
        None => FeedConfig::load_default()?,
    };
    let mut builder = Dashboard::builder().feeds(feeds);
    if let Some(secs) = cli.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let dashboard = builder.build()?;
    tracing::debug!("{dashboard}");

    let mut session = dashboard.open_tab(&cli.tab)?;
    dashboard.run(&mut session).await;
    let model = match &cli.metric {
        Some(metric) => session.select(metric),
        None => session.render(),
    };

    println!("{}", serde_json::to_string_pretty(&model)?);
    Ok(())
}
