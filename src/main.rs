//! CLI entry point for the RSF occupancy tool.
//!
//! Provides subcommands for aggregating a scraped occupancy CSV into a
//! heatmap/timeline report, publishing that report to S3, and serving it over
//! HTTP.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rsf_occupancy::{
    fetch::load_source,
    ingest::parse_csv,
    occupancy::{AggregateOptions, OccupancyReport, aggregate_with},
    output::{log_summary, to_json, write_report},
    publish::{DEFAULT_KEY, publish_report},
    server::{AppState, serve},
};
use std::ffi::OsStr;
use std::io::Write;
use std::net::SocketAddr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "rsf_occupancy")]
#[command(about = "Aggregate gym occupancy readings into a weekday heatmap", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Path to file or URL to fetch
    #[arg(value_name = "FILE_OR_URL", env = "RSF_CSV_PATH", default_value = DEFAULT_CSV_PATH)]
    source: String,

    /// Keep readings taken outside opening hours
    #[arg(long, default_value_t = false)]
    all_hours: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate an occupancy CSV and write the JSON report
    Analyze {
        #[command(flatten)]
        input: SourceArgs,

        /// JSON file to write (`-` for stdout, `.gz` suffix compresses)
        #[arg(short, long, default_value = "-")]
        output: String,

        /// Pretty-print the JSON
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Aggregate an occupancy CSV and upload the JSON report to S3
    Publish {
        #[command(flatten)]
        input: SourceArgs,

        /// S3 bucket name to upload to (e.g., "my-bucket")
        #[arg(long, env = "RSF_S3_BUCKET")]
        s3_bucket: String,

        /// Object key for the report
        #[arg(long, default_value = DEFAULT_KEY)]
        key: String,

        /// Gzip compress the report before uploading
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Serve the report over HTTP, re-reading the CSV per request
    Serve {
        /// CSV file backing the endpoint
        #[arg(long, env = "RSF_CSV_PATH", default_value = DEFAULT_CSV_PATH)]
        csv: String,

        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,

        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,

        /// Keep readings taken outside opening hours
        #[arg(long, default_value_t = false)]
        all_hours: bool,
    },
}

const DEFAULT_CSV_PATH: &str = "RSF_Analysis/scraped_data2.csv";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/rsf_occupancy.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("rsf_occupancy.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            pretty,
        } => {
            let report = build_report(&input).await?;
            log_summary(&report);

            if output == "-" {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&to_json(&report, pretty)?)?;
                writeln!(stdout)?;
            } else {
                write_report(&output, &report, pretty)?;
                info!(output = %output, "Report written");
            }
        }
        Commands::Publish {
            input,
            s3_bucket,
            key,
            gzip,
        } => {
            let report = build_report(&input).await?;
            log_summary(&report);

            let config = aws_config::load_from_env().await;
            let s3 = aws_sdk_s3::Client::new(&config);
            let key = publish_report(&s3, &s3_bucket, &key, &report, gzip).await?;
            info!(bucket = %s3_bucket, key = %key, "Publish complete");
        }
        Commands::Serve {
            csv,
            host,
            port,
            all_hours,
        } => {
            let addr: SocketAddr = format!("{host}:{port}").parse()?;
            let state = AppState::new(csv).with_options(options(all_hours));
            serve(addr, state).await?;
        }
    }

    Ok(())
}

fn options(all_hours: bool) -> AggregateOptions {
    AggregateOptions {
        filter_open_hours: !all_hours,
    }
}

/// Loads, ingests and aggregates the configured source.
#[tracing::instrument(skip_all, fields(source = %input.source, all_hours = input.all_hours))]
async fn build_report(input: &SourceArgs) -> Result<OccupancyReport> {
    let bytes = load_source(&input.source).await?;
    let readings = parse_csv(&bytes)?;
    info!(readings = readings.len(), "Readings ingested");

    Ok(aggregate_with(&readings, &options(input.all_hours)))
}
