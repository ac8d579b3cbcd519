//! CLI entry point for the AGNSS relay.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use agnss_relay::{
    AssistanceRequest, HttpPublisher, RangeClient, RangeFetcher, RelayConfig, SessionOutcome,
    SessionRunner,
};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(
        endpoint = %args.endpoint,
        publish_url = %args.publish_url,
        topic = %args.topic,
        chunk_size = args.chunk_size,
        "CLI arguments parsed"
    );
    info!("AGNSS relay starting");

    let config = RelayConfig::new(
        &args.endpoint,
        &args.publish_url,
        &args.topic,
        args.chunk_size,
        args.service_key.clone(),
    )?;

    let client = RangeClient::new(&config.endpoint, &config.service_key)?;
    let fetcher = RangeFetcher::new(client, config.chunk_size);
    let publisher = Arc::new(HttpPublisher::new(&config.publish_url));
    let runner = SessionRunner::new(fetcher, publisher, config.topic.clone());

    let request = if args.types.is_empty() {
        AssistanceRequest::all()
    } else {
        AssistanceRequest::with_types(args.types.clone())
    };

    let outcome = runner.run(&request).await?;
    println!("{}", serde_json::to_string(&outcome)?);

    Ok(match outcome {
        SessionOutcome::Complete { .. } => ExitCode::SUCCESS,
        SessionOutcome::Rejected { .. } => ExitCode::from(1),
    })
}
