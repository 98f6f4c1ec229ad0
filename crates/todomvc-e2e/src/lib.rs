//! End-to-end suite for two TodoMVC builds.
//!
//! The same scenarios run against the classic React build and the
//! TypeScript React build. Variant differences (selectors, count wording,
//! optional controls) live in one registry; scenarios talk to a variant-aware
//! page adapter and never hard-code a selector.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │  Scenarios   │───►│   TodoPage   │───►│    Driver    │
//! │ (catalog)    │    │ (+ Expect)   │    │ Chromium/Fake│
//! └──────────────┘    └──────┬───────┘    └──────────────┘
//!                            │
//!                     ┌──────▼───────┐
//!                     │   Registry   │
//!                     │ variant → sel│
//!                     └──────────────┘
//! ```
//!
//! Every wait goes through an explicit [`WaitPolicy`]: actions wait for
//! their target to be actionable, expectations retry until they hold, and
//! both give up with a descriptive error at the policy's timeout.

#![warn(missing_docs)]

mod browser;
mod driver;
mod expect;
mod fake;
mod locator;
mod page;
mod registry;
mod result;

/// Suite configuration from defaults, YAML and environment
pub mod config;

/// Tracing subscriber setup
pub mod logging;

/// Concurrent scenario execution
pub mod runner;

/// Scenario catalog
pub mod scenarios;

/// Polling and timeouts
pub mod wait;

pub use browser::BrowserConfig;
#[cfg(feature = "browser")]
pub use browser::{ChromiumBrowser, ChromiumDriver};
pub use config::SuiteConfig;
pub use driver::{has_class, keys, Driver};
pub use expect::{normalize_text, Expect};
pub use fake::{FakeItem, FakeTodoApp};
pub use locator::{Locator, Step};
pub use page::{PageObject, TodoPage};
pub use registry::{Filter, FilterSelectors, Selectors, Variant};
pub use result::{TodoError, TodoResult};
pub use runner::{run_all, run_scenario, RunOptions, ScenarioOutcome, SuiteReport};
pub use scenarios::{Category, Check, Scenario};
pub use wait::{poll_until, PollOutcome, Sample, WaitPolicy};

/// Common imports
pub mod prelude {
    pub use super::{
        Driver, Expect, FakeTodoApp, Filter, Locator, PageObject, Scenario, TodoError, TodoPage,
        TodoResult, Variant, WaitPolicy,
    };
    #[cfg(feature = "browser")]
    pub use super::{ChromiumBrowser, ChromiumDriver};
}
