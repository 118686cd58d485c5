use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use trend_report::config::{DEFAULT_SAMPLES, DEFAULT_TOP};
use trend_report::{run, Mode, ReportFormat, Settings, TrendError};

/// Rank the top trending hashtags or sounds in a file of video metadata,
/// one JSON object per line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File containing the video records (gzip-compressed if it ends in .gz)
    input: PathBuf,

    /// File the report is written to
    output: PathBuf,

    /// What to group the videos by
    #[arg(value_enum)]
    mode: Mode,

    /// Number of groups to report
    #[arg(short, long, default_value_t = DEFAULT_TOP)]
    top: usize,

    /// Number of sample videos shown per group
    #[arg(short, long, default_value_t = DEFAULT_SAMPLES)]
    samples: usize,

    /// Output format of the report
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Parse and group the input on all cores
    #[arg(short, long)]
    parallel: bool,

    /// Log progress to stderr (RUST_LOG overrides this)
    #[arg(short, long)]
    verbose: bool,
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Settings {
            input: args.input,
            output: args.output,
            mode: args.mode,
            top: args.top,
            samples: args.samples,
            format: args.format,
            parallel: args.parallel,
        }
    }
}

fn parse_args() -> Result<Args, TrendError> {
    Args::try_parse().map_err(argument_error)
}

fn argument_error(err: clap::Error) -> TrendError {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => err.exit(),
        ErrorKind::MissingRequiredArgument
        | ErrorKind::UnknownArgument
        | ErrorKind::WrongNumberOfValues
        | ErrorKind::TooManyValues => TrendError::ArgumentCount(err.render().to_string()),
        _ => TrendError::Arguments(err),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            init_logging(false);
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(args.verbose);
    debug!(?args, "parsed arguments");

    match run(&Settings::from(args)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
