//! CLI entry point for file-usage

use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use termcolor::StandardStream;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use file_usage::config::{DEFAULT_INDENT, DEFAULT_PRECISION, DEFAULT_THRESHOLD};
use file_usage::output::color_choice;
use file_usage::{
    JsonReport, OutputConfig, Record, ReportConfig, TextFormatter, generate_report, read_records,
    write_json, write_summary,
};

/// Environment variable holding the log filter, e.g. `FILE_USAGE_LOG=debug`.
const LOG_ENV: &str = "FILE_USAGE_LOG";

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "file-usage")]
#[command(about = "Compute filesystem usage by user and directory")]
#[command(version)]
struct Args {
    /// Usage listing with one `SIZE OWNER PATH` record per line (default: stdin)
    input: Option<PathBuf>,

    /// Percentage of total usage threshold, below which files/directories are not shown
    #[arg(
        long = "thresh",
        value_name = "N",
        default_value_t = DEFAULT_THRESHOLD,
        allow_negative_numbers = true
    )]
    threshold: f64,

    /// Directory level indentation in output
    #[arg(long = "indent", value_name = "N", default_value_t = DEFAULT_INDENT)]
    indent: usize,

    /// Decimal places for sizes in GB
    #[arg(long = "precision", value_name = "N", default_value_t = DEFAULT_PRECISION)]
    precision: usize,

    /// Only report usage under this path prefix
    #[arg(long = "path", value_name = "PREFIX")]
    path: Option<String>,

    /// Only report usage owned by this user
    #[arg(long = "user", value_name = "NAME")]
    user: Option<String>,

    /// Show usernames associated with files/directories in the output
    #[arg(long = "showusers")]
    show_users: bool,

    /// Print every directory level on its own line
    #[arg(long = "no-collapse")]
    no_collapse: bool,

    /// Skip lines with missing fields instead of failing
    #[arg(long = "lenient")]
    lenient: bool,

    /// Omit the per-user totals section
    #[arg(long = "no-summary")]
    no_summary: bool,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

impl Args {
    fn report_config(&self) -> ReportConfig {
        ReportConfig {
            threshold: self.threshold,
            indent_width: self.indent,
            precision: self.precision,
            path_filter: self.path.clone(),
            user_filter: self.user.clone(),
            show_users: self.show_users,
            collapse: !self.no_collapse,
        }
    }

    fn output_config(&self) -> OutputConfig {
        OutputConfig {
            use_color: !self.json && should_use_color(self.color),
            show_summary: !self.no_summary,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(args: &Args) -> Result<Vec<Record>> {
    match args.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path)
                .with_context(|| format!("cannot open '{}'", path.display()))?;
            read_records(BufReader::new(file), args.lenient)
                .with_context(|| format!("reading '{}'", path.display()))
        }
        _ => read_records(io::stdin().lock(), args.lenient).context("reading stdin"),
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.report_config();
    config.validate().context("invalid configuration")?;
    let output = args.output_config();

    let records = read_input(args)?;
    debug!(records = records.len(), "input parsed");

    let report = generate_report(&records, &config)?;

    if args.json {
        let report = JsonReport::new(report.summary, report.lines);
        return write_json(&mut io::stdout().lock(), &report).context("error writing output");
    }

    let mut stdout = StandardStream::stdout(color_choice(output.use_color));
    if output.show_summary {
        write_summary(&mut stdout, &report.summary, config.precision)
            .context("error writing output")?;
    }
    TextFormatter::new(&config)
        .write_all(&mut stdout, &report.lines)
        .and_then(|()| stdout.flush())
        .context("error writing output")
}

fn main() {
    let args = Args::parse();
    init_logging();

    if let Err(e) = run(&args) {
        eprintln!("file-usage: {:#}", e);
        process::exit(1);
    }
}
