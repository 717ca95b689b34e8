mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use workflow::PickerWorkflow;

fn main() -> Result<()> {
    fpick::logging::initialize();
    let cli = parse_cli();
    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
    }

    run_picker(cli.output, resolved)
}

/// Run the picker and report the outcome in the chosen format.
fn run_picker(format: OutputFormat, settings: settings::ResolvedConfig) -> Result<()> {
    let workflow = PickerWorkflow::from_config(settings);
    let outcome = workflow.run()?;

    match format {
        OutputFormat::Plain => print_plain(&outcome),
        OutputFormat::Json => print_json(&outcome)?,
    }

    Ok(())
}
