// main.rs - bucketrecon CLI
// Purpose: Scan a domain for publicly accessible cloud storage buckets
//          (AWS S3, Google Cloud Storage, Azure Blob Storage)

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::process::ExitCode;

use bucketrecon::logging::init_logging;
use bucketrecon::{DnsResolver, HttpFetcher, ScanConfig, ScanError, Scanner, TracingObserver};

const EXIT_SCAN_COMPLETED: u8 = 0;
const EXIT_INVALID_DOMAIN: u8 = 1;
const EXIT_INTERNAL_ERROR: u8 = 2;

/// Scans a domain for publicly accessible cloud storage buckets.
#[derive(Parser, Debug)]
#[command(
    name = "bucketrecon",
    version,
    about = "Scans a domain for publicly accessible cloud storage buckets.",
    after_help = r#"
CANDIDATES PROBED (per domain):

  Names:      {domain}, {domain}-bucket, bucket-{domain}, dots-to-hyphens,
              {domain}-public, public-{domain}
  Providers:  https://{name}.s3.amazonaws.com
              https://storage.googleapis.com/{name}
              https://{name}.blob.core.windows.net

EXIT CODES:

  0  scan completed (buckets found or not)
  1  invalid or unresolvable domain
  2  unexpected internal error
"#
)]
struct Args {
    /// The domain to scan.
    #[arg(value_name = "DOMAIN")]
    domain: String,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let outcome = match init_logging(args.verbose) {
        Ok(()) => run(&args).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{} {:#}", "[ERROR]".red().bold(), e);
            ExitCode::from(EXIT_INTERNAL_ERROR)
        }
    }
}

/// Runs one scan and returns the process exit code.
async fn run(args: &Args) -> Result<u8> {
    let config = ScanConfig::default();
    let fetcher = HttpFetcher::new(config.timeout, &config.user_agent)
        .map_err(|e| ScanError::Client(e.to_string()))
        .context("Failed to create HTTP client")?;
    let resolver = DnsResolver::new();
    let observer = TracingObserver::with_progress();

    let scanner = Scanner::new(config, &fetcher, &resolver, &observer);

    match scanner.scan(&args.domain).await {
        Ok(report) => {
            print!("{}", report);
            Ok(EXIT_SCAN_COMPLETED)
        }
        Err(e @ ScanError::InvalidDomain { .. }) => {
            tracing::error!("{}", e);
            Ok(EXIT_INVALID_DOMAIN)
        }
        Err(e) => Err(e).context("Scan failed"),
    }
}
