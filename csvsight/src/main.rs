//! CSV profiling report generator.
//!
//! Loads a delimited text file, profiles it, and renders the dashboard
//! sections: overview metrics, data preview, column details, and numeric and
//! categorical statistics, as plain text, markdown, or JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use csvsight_core::{LoaderConfig, TableProfiler, init_logging, load_path};

mod report;

use report::{ReportOptions, render_json_report, render_report};

/// Command-line interface for the report generator
#[derive(Parser)]
#[command(name = "csvsight")]
#[command(about = "CSV profiling and summary report generator")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Command {
    /// Profile a delimited text file and render its report
    Report(ReportArgs),
}

/// Arguments for the report command
#[derive(Args)]
pub struct ReportArgs {
    /// Input file path
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Field delimiter (auto-detected when omitted)
    #[arg(long, help = "Single ASCII field delimiter, e.g. ';'")]
    pub delimiter: Option<char>,

    /// Number of rows in the data preview section
    #[arg(long, default_value = "5")]
    pub preview_rows: usize,
}

/// Available output formats
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// Aligned plain-text report
    Text,
    /// Markdown report
    Markdown,
    /// JSON structured output
    Json,
}

/// Shared flags
#[derive(Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all output except errors")]
    pub quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)
        .context("Failed to initialize logging")?;

    match cli.command {
        Some(Command::Report(args)) => run_report(&args),
        None => {
            eprintln!("Error: a command is required");
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    }
}

fn run_report(args: &ReportArgs) -> anyhow::Result<()> {
    let config = loader_config(args)?;

    let table = load_path(&args.input, &config)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    let mut profiler = TableProfiler::new();
    let profile = profiler.profile(&table);

    let options = ReportOptions {
        markdown: matches!(args.format, OutputFormat::Markdown),
        preview_rows: args.preview_rows,
    };

    let rendered = match args.format {
        OutputFormat::Text | OutputFormat::Markdown => render_report(&table, &profile, &options),
        OutputFormat::Json => render_json_report(&table, &profile, &options)
            .context("Failed to serialize report")?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!(output = %path.display(), "report written");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn loader_config(args: &ReportArgs) -> anyhow::Result<LoaderConfig> {
    let mut config = LoaderConfig::new();
    if let Some(delimiter) = args.delimiter {
        anyhow::ensure!(
            delimiter.is_ascii(),
            "delimiter must be a single ASCII character, got '{}'",
            delimiter
        );
        config = config.with_delimiter(delimiter as u8);
    }
    Ok(config)
}
