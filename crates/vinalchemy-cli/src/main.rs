mod config;
mod logging;
mod summary;

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use vinalchemy_core::record_json_schema;
use vinalchemy_generate::output::csv::write_records_csv;
use vinalchemy_generate::output::write_report_json;
use vinalchemy_generate::{GenerationEngine, GenerationError};

use config::{FileConfig, Overrides, load_file_config, resolve};
use logging::init_logging;
use summary::render_summary;

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("logging error: {0}")]
    Logging(#[from] logging::LoggingError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "vinalchemy",
    version,
    about = "Generate a realistic, deliberately dirty wine orders dataset"
)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the JSON Schema of one output row.
    Schema,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of wines to generate before duplicates (clamped to 100..=1000).
    #[arg(long, allow_negative_numbers = true)]
    rows: Option<i64>,
    /// Random seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Output CSV path [default: wines.csv].
    #[arg(long)]
    out: Option<PathBuf>,
    /// Optional output path for the JSON generation report.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Reference instant for order dates (RFC 3339) [default: now].
    #[arg(long, value_name = "RFC3339")]
    as_of: Option<DateTime<Utc>>,
    /// TOML file with a [generate] table.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Append JSON logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Number of rows printed after generation [default: 5].
    #[arg(long)]
    preview: Option<usize>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Schema) => print_schema(),
        None => run_generate(cli.generate),
    }
}

fn print_schema() -> Result<(), CliError> {
    let schema = serde_json::to_string_pretty(&record_json_schema())?;
    println!("{schema}");
    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        rows,
        seed,
        out,
        report,
        as_of,
        config,
        log_file,
        preview,
    } = args;

    init_logging(log_file.as_deref())?;

    let file = match config.as_deref() {
        Some(path) => {
            let loaded = load_file_config(path)?;
            tracing::info!(event = "config_loaded", path = %path.display());
            loaded
        }
        None => FileConfig::default(),
    };
    let overrides = Overrides {
        rows,
        seed,
        out,
        report,
        as_of,
        preview,
    };
    let run = resolve(overrides, file, Utc::now());

    tracing::info!(
        event = "run_started",
        seed = run.options.seed,
        rows = run.options.rows,
        as_of = %run.options.as_of
    );
    let timer = Instant::now();

    let result = GenerationEngine::new(run.options.clone()).run()?;

    let bytes = write_records_csv(&run.out, &result.records).map_err(GenerationError::from)?;
    tracing::info!(event = "csv_written", path = %run.out.display(), bytes);

    if let Some(path) = run.report.as_deref() {
        write_report_json(path, &result.report)?;
        tracing::info!(event = "report_written", path = %path.display());
    }

    print!(
        "{}",
        render_summary(
            &result.records,
            &result.report,
            &run.out,
            bytes,
            run.preview
        )
    );

    let duration_ms = timer.elapsed().as_millis();
    let status = if result.report.is_clean() {
        "success"
    } else {
        "checks_failed"
    };
    tracing::info!(event = "run_finished", status, duration_ms = duration_ms);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_flags_without_subcommand() {
        let cli = Cli::try_parse_from([
            "vinalchemy",
            "--rows",
            "-5",
            "--seed",
            "7",
            "--as-of",
            "2025-03-01T12:00:00Z",
            "--preview",
            "0",
        ])
        .expect("parse flags");
        assert!(cli.command.is_none());
        assert_eq!(cli.generate.rows, Some(-5));
        assert_eq!(cli.generate.seed, Some(7));
        assert_eq!(
            cli.generate.as_of.map(|instant| instant.to_rfc3339()),
            Some("2025-03-01T12:00:00+00:00".to_string())
        );
        assert_eq!(cli.generate.preview, Some(0));
    }

    #[test]
    fn parses_schema_subcommand() {
        let cli = Cli::try_parse_from(["vinalchemy", "schema"]).expect("parse schema");
        assert!(matches!(cli.command, Some(Command::Schema)));
    }

    #[test]
    fn rejects_malformed_as_of() {
        assert!(Cli::try_parse_from(["vinalchemy", "--as-of", "yesterday"]).is_err());
    }
}
