/// Top Errors - a test log analyzer
///
/// The main entry point for the analyzer. It parses command-line arguments,
/// analyzes the log file, and prints the report.

use std::fs::File;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use colored::Colorize;
use log::{info, LevelFilter};

use top_errors::app::run_analyzer;
use top_errors::config::load_config;
use top_errors::utils::output_formatter;
use top_errors::{LogFileError, Report};

/// Output format for stdout
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON with sorted keys
    Json,
    /// Colored human-readable summary
    Text,
}

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "top_errors",
    version,
    about = "Tallies PASS/FAIL_<code> outcomes in a test log",
    long_about = "Reads a log made of PASS, FAIL_<code> and other tokens separated by
commas or whitespace, counts each error code, and prints a summary report:
- top_errors: error code to count
- etc: unrecognized tokens (and UNKNOWN failures) to count
- message: status for all-pass, empty, or signal-free logs"
)]
struct Args {
    /// Path to the log file to analyze
    #[arg(long = "logfile")]
    logfile: PathBuf,

    /// Output format written to stdout
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Number of error codes listed in text format
    #[arg(long = "top", default_value = "10")]
    top: usize,

    /// Output in markdown format (wrapped in triple backticks)
    #[arg(long = "md", action = ArgAction::SetTrue)]
    md: bool,

    /// Export the report to a JSON file
    #[arg(long = "json")]
    json: Option<PathBuf>,

    /// Export the report to a CSV file
    #[arg(long = "csv")]
    csv: Option<PathBuf>,

    /// Suppress stdout output
    #[arg(long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(long = "log-level", default_value = "warn")]
    log_level: LevelFilter,

    /// Write logs to this file instead of stderr
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

/// Main entry point function
fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args);

    let config = load_config(args.config.as_deref());

    let report = match run_analyzer(&args.logfile, &config) {
        Ok(report) => report,
        Err(e @ LogFileError::NotFound { .. }) => {
            eprintln!("{}", format!("Error: {}", e).red());
            process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    export_report(&report, &args)?;

    if !args.quiet {
        println!("{}", render(&report, &args)?.trim_end());
    }

    Ok(())
}

/// Set up logging to stderr or to a log file
fn setup_logging(args: &Args) {
    let mut builder = env_logger::Builder::new();

    builder.filter_level(args.log_level);

    builder.format(|buf, record| {
        use chrono::Local;
        use std::io::Write;
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(log_file) = &args.log_file {
        match File::create(log_file) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Cannot open log file {}: {}", log_file.display(), e),
        }
    }

    builder.init();
}

/// Render the report for stdout in the requested format
fn render(report: &Report, args: &Args) -> Result<String> {
    let output = match args.format {
        OutputFormat::Json => {
            let json = output_formatter::to_pretty_json(report)?;
            if args.md {
                output_formatter::wrap_markdown(&json)
            } else {
                json
            }
        }
        OutputFormat::Text => output_formatter::format_report(report, args.top, args.md),
    };

    Ok(output)
}

/// Write the report to the export files named on the command line
fn export_report(report: &Report, args: &Args) -> Result<()> {
    if let Some(json_path) = &args.json {
        output_formatter::export_report_json(report, json_path)?;
        info!("Wrote JSON report to {}", json_path.display());
    }

    if let Some(csv_path) = &args.csv {
        output_formatter::create_csv_report(report, csv_path)?;
        info!("Wrote CSV report to {}", csv_path.display());
    }

    Ok(())
}
