//! todomvc-e2e: list and run the TodoMVC end-to-end scenarios
//!
//! ## Usage
//!
//! ```bash
//! todomvc-e2e list                                # Every scenario
//! todomvc-e2e list --variant classic --category negative
//! todomvc-e2e run -j 4                            # Headless, four at a time
//! todomvc-e2e run --filter TC04 --headed -v
//! ```

use clap::Parser;
use std::process::ExitCode;
use todomvc_e2e::{logging, Variant};
use todomvc_e2e_cli::{select, Cli, CliResult, Commands, ListArgs, Reporter, RunArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(logging::filter_for(cli.verbose, cli.quiet));
    let reporter = Reporter::new(cli.color.enabled(), cli.quiet);

    match run(cli.command, &reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, reporter: &Reporter) -> CliResult<()> {
    match command {
        Commands::List(args) => run_list(&args, reporter),
        Commands::Run(args) => run_scenarios(&args, reporter),
    }
}

fn run_list(args: &ListArgs, reporter: &Reporter) -> CliResult<()> {
    let scenarios = select(&args.select, &Variant::ALL)?;
    reporter.list(&scenarios);
    Ok(())
}

#[cfg(feature = "browser")]
fn run_scenarios(args: &RunArgs, reporter: &Reporter) -> CliResult<()> {
    use todomvc_e2e_cli::{run_live, suite_config, CliError};

    let config = suite_config(args)?;
    let scenarios = select(&args.select, &config.variants)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(run_live(&config, scenarios))?;

    for outcome in &report.outcomes {
        reporter.outcome(outcome);
    }
    reporter.summary(&report);

    if report.all_passed() {
        Ok(())
    } else {
        Err(CliError::ScenariosFailed {
            failed: report.failed_count(),
            total: report.total(),
        })
    }
}

#[cfg(not(feature = "browser"))]
fn run_scenarios(_args: &RunArgs, _reporter: &Reporter) -> CliResult<()> {
    Err(todomvc_e2e_cli::CliError::FeatureDisabled { feature: "browser" })
}
