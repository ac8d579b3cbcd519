//! CLI argument definitions using clap derive macros.

use clap::Parser;

use agnss_relay::DEFAULT_CHUNK_SIZE;
use agnss_relay::config::DEFAULT_TOPIC;

/// Relay assisted-GNSS data from a cloud location endpoint to devices.
///
/// The relay retrieves the assistance blob in byte-range chunks, publishes
/// each chunk to the device topic, and prints the base64 encoding of the
/// full blob as JSON.
#[derive(Parser, Debug)]
#[command(name = "agnss-relay")]
#[command(author, version, about)]
pub struct Args {
    /// Assistance endpoint URL accepting ranged POST requests
    #[arg(short = 'e', long)]
    pub endpoint: String,

    /// Base URL of the publish data plane
    #[arg(short = 'p', long)]
    pub publish_url: String,

    /// Topic chunks are published to
    #[arg(short = 't', long, default_value = DEFAULT_TOPIC)]
    pub topic: String,

    /// Bytes requested per chunk (1-1048576)
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, value_parser = clap::value_parser!(u64).range(1..=1_048_576))]
    pub chunk_size: u64,

    /// Assistance category to request (repeatable); omit for all known categories
    #[arg(long = "type", value_name = "CODE")]
    pub types: Vec<u8>,

    /// Service key for the assistance endpoint; defaults to $AGNSS_SERVICE_KEY
    #[arg(long)]
    pub service_key: Option<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
