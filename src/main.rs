//! CLI entry point for the gradebook rater.
//!
//! Grades a score sheet from a local workbook, CSV file or shared-sheet
//! link and prints the numbered final report.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use gradebook_rater::fetch::BasicClient;
use gradebook_rater::output::{render_table, to_csv_string, to_json, write_csv};
use gradebook_rater::process_source;
use std::ffi::OsStr;
use std::io::{BufRead, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gradebook_rater")]
#[command(about = "Compute final grades from a spreadsheet of assessment scores", long_about = None)]
struct Cli {
    /// Path to an Excel/CSV file or a Google Sheets link. Prompted for when omitted.
    #[arg(value_name = "FILE_OR_URL")]
    source: Option<String>,

    /// How to print the report
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Also write the report as CSV to this file
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let _file_guard = init_logging()?;

    let cli = Cli::parse();

    let source = match cli.source {
        Some(source) => source,
        None => prompt_source()?,
    };

    info!(source = %source, "Processing started");

    let client = BasicClient::new();
    let report = match process_source(&client, &source).await {
        Ok(report) => report,
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Grading failed");
            eprintln!("[ERROR] {}: {}", e.kind(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let rendered = match cli.format {
        Format::Table => render_table(&report),
        Format::Json => to_json(&report)?,
        Format::Csv => to_csv_string(&report)?,
    };
    println!("{}", rendered);

    if let Some(path) = cli.output {
        write_csv(&path, &report)?;
    }

    info!("Processing finished");
    Ok(ExitCode::SUCCESS)
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_logging() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/gradebook_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gradebook_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

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

    Ok(guard)
}

/// Asks for the source on stdin.
fn prompt_source() -> Result<String> {
    print!("Enter Excel file path or Google Sheets link: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    let source = line.trim().to_string();
    if source.is_empty() {
        anyhow::bail!("no file path or link given");
    }
    Ok(source)
}
