mod engine;
mod models;
mod schema;
mod types;

use std::io::{stderr, stdout, BufWriter};
use std::path::PathBuf;
use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::{output_path, ConvertError, ConvertOptions, FileConverter, OutputMode, SummaryReport};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: hlap-convert [input].txt [log_level:optional] > [summary].csv");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: info)");
        exit(1);
    }

    let input = PathBuf::from(&args[1]);
    let log_level = args.get(2)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::INFO);

    setup_logging(log_level);

    let timer = Instant::now();
    let reports = convert_all_modes(input).await?;
    let duration = timer.elapsed();

    info!("Converted extract in: {duration:?}");

    write_results_to_stdout(&reports)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the run summary, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

/// The paper-print and full-statement runs share nothing but the input, so they run side by side.
async fn convert_all_modes(input: PathBuf) -> Result<Vec<SummaryReport>> {
    let handles: Vec<_> = OutputMode::ALL.into_iter()
        .map(|mode| spawn_conversion(input.clone(), mode))
        .collect();

    let mut reports = Vec::with_capacity(handles.len());

    for handle in handles {
        reports.push(handle.await??);
    }

    Ok(reports)
}

fn spawn_conversion(input: PathBuf, mode: OutputMode) -> JoinHandle<Result<SummaryReport, ConvertError>> {
    spawn_blocking(move || {
        let output = output_path(&input, mode);
        let summary = FileConverter::new(ConvertOptions::for_mode(mode)).convert_file(&input, &output)?;

        Ok(summary.report(output.display().to_string(), mode))
    })
}

fn write_results_to_stdout(reports: &[SummaryReport]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(BufWriter::new(stdout().lock()));

    for report in reports {
        writer.serialize(report)?;
    }

    writer.flush()?;

    Ok(())
}
