use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use serde_json::json;

use fpick::app_dirs;
use fpick::types::PickOutcome;

/// Produce the full version banner including the configuration directory.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::get_config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("fpick {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");

    Box::leak(details.into_boxed_str())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

#[derive(Parser, Debug, Default)]
#[command(
    name = "fpick",
    version,
    long_version = long_version(),
    about = "Interactive fuzzy file picker for editor integration"
)]
pub(crate) struct CliArgs {
    #[arg(
        value_name = "DIR",
        help = "Directory to start browsing (default: current directory)"
    )]
    pub(crate) root: Option<PathBuf>,
    #[arg(
        short = 'q',
        long,
        value_name = "QUERY",
        help = "Provide an initial filter query (default: empty)"
    )]
    pub(crate) initial_query: Option<String>,
    #[arg(
        long,
        value_name = "COMMAND",
        env = "FPICK_ENGINE",
        help = "Ranking engine executable (default: fpick-engine)"
    )]
    pub(crate) engine: Option<PathBuf>,
    #[arg(
        long = "engine-arg",
        value_name = "ARG",
        action = ArgAction::Append,
        help = "Extra argument passed to the engine before the query (repeatable)"
    )]
    pub(crate) engine_args: Vec<String>,
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "FPICK_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'o',
        long,
        value_enum,
        default_value = "plain",
        help = "How to report the picked file on stdout"
    )]
    pub(crate) output: OutputFormat,
    #[arg(long, help = "Print the effective configuration before starting")]
    pub(crate) print_config: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Plain,
    Json,
}

/// Print the picked path, if any, for the invoking process to capture.
pub(crate) fn print_plain(outcome: &PickOutcome) {
    if let PickOutcome::Activated(path) = outcome {
        println!("{}", path.display());
    }
}

/// Format the outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &PickOutcome) -> Result<String> {
    let payload = json!({
        "accepted": !outcome.is_cancelled(),
        "path": outcome.path(),
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the outcome.
pub(crate) fn print_json(outcome: &PickOutcome) -> Result<()> {
    println!("{}", format_outcome_json(outcome)?);
    Ok(())
}
