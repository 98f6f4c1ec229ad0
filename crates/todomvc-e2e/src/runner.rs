//! Scenario execution.
//!
//! Each scenario gets its own driver from a factory, so scenarios share no
//! page state and can run concurrently up to the configured worker count.
//! Scenarios about session isolation also get a second, earlier session
//! from the same factory, seeded before the scenario runs and closed after.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::config::SuiteConfig;
use crate::driver::Driver;
use crate::page::TodoPage;
use crate::registry::Variant;
use crate::result::{TodoError, TodoResult};
use crate::scenarios::Scenario;
use crate::wait::{WaitPolicy, DEFAULT_NAVIGATION_TIMEOUT_MS};

/// Timing applied to every page a run creates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Actionability and assertion polling
    pub wait: WaitPolicy,
    /// How long `navigate` waits for the page to become usable
    pub load_timeout_ms: u64,
}

impl RunOptions {
    /// Bind `driver` to `variant` with these timings
    #[must_use]
    pub fn page<D: Driver>(&self, driver: D, variant: Variant) -> TodoPage<D> {
        TodoPage::new(driver, variant, self.wait).with_load_timeout(self.load_timeout_ms)
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        WaitPolicy::default().into()
    }
}

impl From<WaitPolicy> for RunOptions {
    fn from(wait: WaitPolicy) -> Self {
        Self {
            wait,
            load_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
        }
    }
}

impl From<&SuiteConfig> for RunOptions {
    fn from(config: &SuiteConfig) -> Self {
        Self {
            wait: config.wait,
            load_timeout_ms: config.navigation_timeout_ms,
        }
    }
}

/// Result of running one scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOutcome {
    /// Scenario id
    pub id: String,
    /// Scenario name
    pub name: String,
    /// Whether every assertion held
    pub passed: bool,
    /// Failure description
    pub error: Option<String>,
    /// Wall time including driver teardown
    pub duration: Duration,
}

impl ScenarioOutcome {
    /// Passing outcome
    #[must_use]
    pub fn pass(scenario: &Scenario) -> Self {
        Self {
            id: scenario.id.clone(),
            name: scenario.name.to_string(),
            passed: true,
            error: None,
            duration: Duration::ZERO,
        }
    }

    /// Failing outcome
    #[must_use]
    pub fn fail(scenario: &Scenario, error: impl Into<String>) -> Self {
        Self {
            id: scenario.id.clone(),
            name: scenario.name.to_string(),
            passed: false,
            error: Some(error.into()),
            duration: Duration::ZERO,
        }
    }

    /// Set duration
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Outcomes of a run, in catalog order
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    /// Individual outcomes
    pub outcomes: Vec<ScenarioOutcome>,
    /// Total wall time
    pub duration: Duration,
}

impl SuiteReport {
    /// Whether every scenario passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    /// Passed scenario count
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    /// Failed scenario count
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed).count()
    }

    /// Total scenario count
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Failed outcomes
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed).collect()
    }
}

/// Run one scenario on `driver`, then close the driver.
///
/// Assertion and driver failures become a failing outcome rather than an
/// error, so one broken scenario does not stop the others.
pub async fn run_scenario<D: Driver>(
    scenario: &Scenario,
    driver: D,
    options: impl Into<RunOptions>,
) -> ScenarioOutcome {
    let start = Instant::now();
    let mut page = options.into().page(driver, scenario.variant);
    let result = scenario.run(&mut page).await;
    if let Err(e) = page.close().await {
        warn!(id = %scenario.id, error = %e, "driver close failed");
    }
    let outcome = match result {
        Ok(()) => {
            info!(id = %scenario.id, variant = %scenario.variant, "passed");
            ScenarioOutcome::pass(scenario)
        }
        Err(e) => {
            warn!(id = %scenario.id, variant = %scenario.variant, error = %e, "failed");
            ScenarioOutcome::fail(scenario, e.to_string())
        }
    };
    outcome.with_duration(start.elapsed())
}

/// Open a session from `factory` and leave the scenario's seed state in it
async fn seed_prior_session<D, F, Fut>(
    scenario: &Scenario,
    factory: &F,
    options: RunOptions,
) -> TodoResult<TodoPage<D>>
where
    D: Driver,
    F: Fn() -> Fut,
    Fut: Future<Output = TodoResult<D>>,
{
    let mut page = options.page(factory().await?, scenario.variant);
    if let Err(e) = scenario.seed_prior_session(&mut page).await {
        let _ = page.close().await;
        return Err(e);
    }
    Ok(page)
}

/// Run `scenarios` with at most `workers` in flight, each on a fresh driver
/// from `factory`.
///
/// A driver that cannot be created fails its scenario. Outcomes keep the
/// input order.
pub async fn run_all<D, F, Fut>(
    scenarios: Vec<Scenario>,
    workers: usize,
    options: impl Into<RunOptions>,
    factory: F,
) -> TodoResult<SuiteReport>
where
    D: Driver + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = TodoResult<D>> + Send + 'static,
{
    if workers == 0 {
        return Err(TodoError::config("workers must be at least 1"));
    }
    let options = options.into();
    let start = Instant::now();
    let permits = Arc::new(Semaphore::new(workers));
    let factory = Arc::new(factory);
    info!(scenarios = scenarios.len(), workers, "starting run");

    let mut handles = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let permits = Arc::clone(&permits);
        let factory = Arc::clone(&factory);
        handles.push(tokio::spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                return ScenarioOutcome::fail(&scenario, "worker pool closed");
            };
            let started = Instant::now();
            let prior = if scenario.needs_prior_session() {
                match seed_prior_session(&scenario, factory.as_ref(), options).await {
                    Ok(page) => Some(page),
                    Err(e) => {
                        warn!(id = %scenario.id, error = %e, "could not seed prior session");
                        return ScenarioOutcome::fail(&scenario, format!("prior session: {e}"))
                            .with_duration(started.elapsed());
                    }
                }
            } else {
                None
            };
            let outcome = match factory().await {
                Ok(driver) => run_scenario(&scenario, driver, options).await,
                Err(e) => {
                    warn!(id = %scenario.id, error = %e, "could not create driver");
                    ScenarioOutcome::fail(&scenario, e.to_string())
                        .with_duration(started.elapsed())
                }
            };
            if let Some(mut page) = prior {
                if let Err(e) = page.close().await {
                    warn!(id = %scenario.id, error = %e, "prior session close failed");
                }
            }
            outcome
        }));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        let outcome = handle.await.map_err(|e| TodoError::Page {
            message: format!("scenario task failed: {e}"),
        })?;
        outcomes.push(outcome);
    }

    let report = SuiteReport {
        outcomes,
        duration: start.elapsed(),
    };
    info!(
        passed = report.passed_count(),
        failed = report.failed_count(),
        "run finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeTodoApp;
    use crate::registry::Variant;
    use crate::scenarios::{find, for_variant};

    fn quick() -> WaitPolicy {
        WaitPolicy::new(50).with_poll_interval(5)
    }

    #[tokio::test]
    async fn test_run_scenario_passes_on_fake() {
        let scenario = find("TC01").unwrap();
        let outcome = run_scenario(&scenario, FakeTodoApp::new(scenario.variant), quick()).await;
        assert!(outcome.passed, "{:?}", outcome.error);
        assert_eq!(outcome.id, "TC01");
    }

    #[tokio::test]
    async fn test_wrong_variant_driver_fails_scenario() {
        let scenario = find("TC01").unwrap();
        let outcome = run_scenario(&scenario, FakeTodoApp::new(Variant::Classic), quick()).await;
        assert!(!outcome.passed);
        assert!(outcome.error.unwrap().contains("Navigation"));
    }

    #[tokio::test]
    async fn test_run_all_keeps_order() {
        let scenarios = for_variant(Variant::Classic);
        let ids: Vec<String> = scenarios.iter().map(|s| s.id.clone()).collect();
        let report = run_all(scenarios, 4, quick(), || async {
            Ok(FakeTodoApp::new(Variant::Classic))
        })
        .await
        .unwrap();
        assert!(report.all_passed(), "{:?}", report.failures());
        let got: Vec<String> = report.outcomes.iter().map(|o| o.id.clone()).collect();
        assert_eq!(got, ids);
    }

    #[tokio::test]
    async fn test_factory_failure_fails_scenario() {
        let scenarios = vec![find("TC17").unwrap()];
        let report = run_all(scenarios, 1, quick(), || async {
            Err::<FakeTodoApp, _>(TodoError::BrowserLaunch {
                message: "no chromium".into(),
            })
        })
        .await
        .unwrap();
        assert_eq!(report.failed_count(), 1);
        assert!(report.failures()[0].error.as_deref().unwrap().contains("no chromium"));
    }

    #[tokio::test]
    async fn test_isolation_scenario_gets_a_seeded_prior_session() {
        let opened = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = Arc::clone(&opened);
        let report = run_all(vec![find("TC35").unwrap()], 1, quick(), move || {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            async { Ok(FakeTodoApp::new(Variant::TypescriptReact)) }
        })
        .await
        .unwrap();
        assert!(report.all_passed(), "{:?}", report.failures());
        assert_eq!(opened.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_isolation_scenario_fails_on_reused_session() {
        let scenario = find("TC35").unwrap();
        let options = RunOptions::from(quick());
        let mut seeded = options.page(FakeTodoApp::new(Variant::TypescriptReact), scenario.variant);
        scenario.seed_prior_session(&mut seeded).await.unwrap();

        // typescript-react restores its list on reload within one session
        let outcome = run_scenario(&scenario, seeded.into_driver(), options).await;
        assert!(!outcome.passed);
        assert!(outcome.error.unwrap().contains("count 3"));
    }

    #[test]
    fn test_options_carry_navigation_timeout() {
        use crate::page::PageObject;

        let config = SuiteConfig {
            navigation_timeout_ms: 4_321,
            ..SuiteConfig::default()
        };
        let options = RunOptions::from(&config);
        assert_eq!(options.wait, config.wait);
        let page = options.page(FakeTodoApp::new(Variant::Classic), Variant::Classic);
        assert_eq!(page.load_timeout_ms(), 4_321);
        assert_eq!(
            RunOptions::from(quick()).load_timeout_ms,
            DEFAULT_NAVIGATION_TIMEOUT_MS
        );
    }

    #[tokio::test]
    async fn test_zero_workers_rejected() {
        let err = run_all(Vec::new(), 0, quick(), || async {
            Ok(FakeTodoApp::new(Variant::Classic))
        })
        .await
        .unwrap_err();
        assert!(err.is_config());
    }
}
