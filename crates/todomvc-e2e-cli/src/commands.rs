//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// todomvc-e2e: end-to-end scenarios for the TodoMVC React builds
#[derive(Parser, Debug)]
#[command(name = "todomvc-e2e")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only failures and the summary)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List scenarios
    List(ListArgs),

    /// Run scenarios against the live pages in Chromium
    Run(RunArgs),
}

/// Scenario selection shared by `list` and `run`
#[derive(Args, Debug, Clone, Default)]
pub struct SelectArgs {
    /// Variant to include (classic, typescript-react); repeatable
    #[arg(long = "variant", value_name = "VARIANT")]
    pub variants: Vec<String>,

    /// Only scenarios of this category (functional, edge-input, negative)
    #[arg(long)]
    pub category: Option<String>,

    /// Only scenarios whose id or name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Selection
    #[command(flatten)]
    pub select: SelectArgs,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Selection
    #[command(flatten)]
    pub select: SelectArgs,

    /// Scenarios run concurrently
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Wait and assertion timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// YAML suite configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Color choice
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorArg {
    /// Whether result output on stderr should be colored
    #[must_use]
    pub fn enabled(self) -> bool {
        match self {
            Self::Auto => console::colors_enabled_stderr(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        let cli = Cli::parse_from([
            "todomvc-e2e",
            "list",
            "--variant",
            "classic",
            "--category",
            "negative",
        ]);
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.select.variants, vec!["classic"]);
                assert_eq!(args.select.category.as_deref(), Some("negative"));
            }
            Commands::Run(_) => panic!("expected list"),
        }
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::parse_from([
            "todomvc-e2e",
            "-vv",
            "run",
            "--variant",
            "classic",
            "--variant",
            "typescript-react",
            "-j",
            "4",
            "--timeout-ms",
            "8000",
            "--headed",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.select.variants.len(), 2);
                assert_eq!(args.workers, Some(4));
                assert_eq!(args.timeout_ms, Some(8000));
                assert!(args.headed);
                assert!(args.config.is_none());
            }
            Commands::List(_) => panic!("expected run"),
        }
    }

    #[test]
    fn test_color_arg() {
        assert!(ColorArg::Always.enabled());
        assert!(!ColorArg::Never.enabled());
    }
}
