//! Non-interactive front end: one query per invocation, the report printed as JSON.
//!
//! Logs go to stderr (`RUST_LOG`, default `info`), the report and raw records to stdout.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use bikeshare_stats::config::DatasetConfig;
use bikeshare_stats::execution::{ExecutionOptions, StatsEngine, TracingExecutionObserver};
use bikeshare_stats::ingestion::{IngestionOptions, IngestionSeverity, TracingObserver};
use bikeshare_stats::session::Session;
use bikeshare_stats::types::FilterCriteria;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "bikeshare-stats")]
#[command(about = "Descriptive statistics over US bike-share trip logs", long_about = None)]
struct Cli {
    /// City to analyze: chicago, new york city or washington
    #[arg(short, long)]
    city: String,

    /// Month name, or "all"
    #[arg(short, long, default_value = "all")]
    month: String,

    /// Day of the week, or "all"
    #[arg(short, long, default_value = "all")]
    day: String,

    /// Directory holding the city trip logs (defaults to $BIKESHARE_DATA_DIR, then ".")
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Compute the report sections one after another instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Print this many batches of raw records after the report
    #[arg(long, default_value_t = 0)]
    raw_batches: usize,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let criteria = FilterCriteria::parse(&cli.city, &cli.month, &cli.day)?;

    let config = match cli.data_dir {
        Some(dir) => DatasetConfig::new(dir),
        None => DatasetConfig::from_env(),
    };
    let ingest_opts = IngestionOptions {
        observer: Some(Arc::new(TracingObserver)),
        alert_at_or_above: IngestionSeverity::Critical,
        ..Default::default()
    };

    let session = Session::open(criteria, &config, &ingest_opts)
        .with_context(|| format!("loading {}", config.path_for(criteria.city).display()))?;
    if !session.skipped().is_empty() {
        warn!(skipped = session.skipped().len(), "some rows could not be parsed");
    }
    info!(
        city = %criteria.city,
        month = %criteria.month,
        day = %criteria.day,
        loaded = session.full().len(),
        matching = session.filtered().len(),
        "dataset ready"
    );

    let engine = StatsEngine::new(ExecutionOptions {
        parallel: !cli.sequential,
        num_threads: None,
    })?
    .with_observer(Arc::new(TracingExecutionObserver));

    let report = session.report(&engine);
    println!("{}", serde_json::to_string_pretty(&report)?);

    let mut pager = session.pager();
    for _ in 0..cli.raw_batches {
        let batch = pager.next_batch();
        if batch.is_empty() {
            info!("no more raw records");
            break;
        }
        for record in batch.records {
            println!("{}", serde_json::to_string(record)?);
        }
    }

    Ok(())
}
