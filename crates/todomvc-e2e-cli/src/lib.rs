//! todomvc-e2e CLI library
//!
//! Scenario selection, configuration layering and the live run driver behind
//! the `todomvc-e2e` binary.

#![warn(missing_docs)]

mod commands;
mod error;
mod output;

pub use commands::{Cli, ColorArg, Commands, ListArgs, RunArgs, SelectArgs};
pub use error::{CliError, CliResult};
pub use output::Reporter;

use todomvc_e2e::config::parse_variants;
use todomvc_e2e::scenarios::{self, Category};
use todomvc_e2e::{Scenario, SuiteConfig, Variant};

/// Scenarios matching `args`, in catalog order.
///
/// `--variant` wins over `default_variants` when given.
pub fn select(args: &SelectArgs, default_variants: &[Variant]) -> CliResult<Vec<Scenario>> {
    let variants = if args.variants.is_empty() {
        default_variants.to_vec()
    } else {
        parse_variants(&args.variants.join(","))?
    };
    let category = args
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()?;

    let selected: Vec<Scenario> = scenarios::catalog()
        .into_iter()
        .filter(|s| variants.contains(&s.variant))
        .filter(|s| category.map_or(true, |c| s.category == c))
        .filter(|s| args.filter.as_deref().map_or(true, |f| s.matches(f)))
        .collect();

    if selected.is_empty() {
        return Err(CliError::invalid_argument("no scenarios match the selection"));
    }
    Ok(selected)
}

/// Defaults, then `--config`, then `TODOMVC_*` variables, then flags
pub fn suite_config(args: &RunArgs) -> CliResult<SuiteConfig> {
    let base = match &args.config {
        Some(path) => SuiteConfig::from_yaml_file(path)?,
        None => SuiteConfig::default(),
    };
    let mut config = base.apply_env(|key| std::env::var(key).ok())?;
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(ms) = args.timeout_ms {
        config.wait = config.wait.with_timeout(ms);
    }
    if args.headed {
        config.browser.headless = false;
    }
    config.validate()?;
    Ok(config)
}

/// Launch Chromium and run `scenarios` with one browser context each
#[cfg(feature = "browser")]
pub async fn run_live(
    config: &SuiteConfig,
    scenarios: Vec<Scenario>,
) -> CliResult<todomvc_e2e::SuiteReport> {
    use std::sync::Arc;
    use todomvc_e2e::{run_all, ChromiumBrowser};

    let browser = Arc::new(ChromiumBrowser::launch(config.browser.clone()).await?);
    let nav = config.navigation_timeout_ms;
    let factory = {
        let browser = Arc::clone(&browser);
        move || {
            let browser = Arc::clone(&browser);
            async move {
                browser
                    .new_driver()
                    .await
                    .map(|d| d.with_navigation_timeout(nav))
            }
        }
    };

    let report = run_all(scenarios, config.workers, config, factory).await?;
    match Arc::try_unwrap(browser) {
        Ok(browser) => browser.close().await?,
        Err(_) => tracing::warn!("browser still referenced; leaving it to exit with the process"),
    }
    Ok(report)
}
