//! Suite configuration
//!
//! Defaults can be overridden from a YAML file and then from `TODOMVC_*`
//! environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::browser::BrowserConfig;
use crate::registry::Variant;
use crate::result::{TodoError, TodoResult};
use crate::wait::{WaitPolicy, DEFAULT_NAVIGATION_TIMEOUT_MS};

/// Environment variable names read by [`SuiteConfig::apply_env`]
pub mod env {
    /// `true`/`false`
    pub const HEADLESS: &str = "TODOMVC_HEADLESS";
    /// Path to the chromium binary
    pub const CHROMIUM_PATH: &str = "CHROMIUM_PATH";
    /// Wait/assertion timeout in milliseconds
    pub const TIMEOUT_MS: &str = "TODOMVC_TIMEOUT_MS";
    /// Poll interval in milliseconds
    pub const POLL_MS: &str = "TODOMVC_POLL_MS";
    /// Navigation timeout in milliseconds
    pub const NAVIGATION_TIMEOUT_MS: &str = "TODOMVC_NAVIGATION_TIMEOUT_MS";
    /// Parallel scenario count
    pub const WORKERS: &str = "TODOMVC_WORKERS";
    /// Comma-separated variant keys
    pub const VARIANTS: &str = "TODOMVC_VARIANTS";
}

/// Configuration for a suite run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Browser launch options
    pub browser: BrowserConfig,
    /// Actionability and assertion polling
    pub wait: WaitPolicy,
    /// Navigation timeout in milliseconds
    pub navigation_timeout_ms: u64,
    /// Scenarios run concurrently
    pub workers: usize,
    /// Variants to run
    pub variants: Vec<Variant>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            browser: BrowserConfig::default(),
            wait: WaitPolicy::default(),
            navigation_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
            workers: 1,
            variants: Variant::ALL.to_vec(),
        }
    }
}

impl SuiteConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse YAML; missing keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> TodoResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> TodoResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> TodoResult<Self> {
        Self::default().apply_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup` (the process environment in production)
    pub fn apply_env<F>(mut self, lookup: F) -> TodoResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(env::HEADLESS) {
            self.browser.headless = parse_bool(env::HEADLESS, &v)?;
        }
        if let Some(v) = lookup(env::CHROMIUM_PATH) {
            if !v.is_empty() {
                self.browser.chromium_path = Some(v);
            }
        }
        if let Some(v) = lookup(env::TIMEOUT_MS) {
            self.wait.timeout_ms = parse_num(env::TIMEOUT_MS, &v)?;
        }
        if let Some(v) = lookup(env::POLL_MS) {
            self.wait.poll_interval_ms = parse_num(env::POLL_MS, &v)?;
        }
        if let Some(v) = lookup(env::NAVIGATION_TIMEOUT_MS) {
            self.navigation_timeout_ms = parse_num(env::NAVIGATION_TIMEOUT_MS, &v)?;
        }
        if let Some(v) = lookup(env::WORKERS) {
            self.workers = parse_num(env::WORKERS, &v)?;
        }
        if let Some(v) = lookup(env::VARIANTS) {
            self.variants = parse_variants(&v)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Set the wait policy
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitPolicy) -> Self {
        self.wait = wait;
        self
    }

    /// Set the worker count
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Restrict to the given variants
    #[must_use]
    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        self.variants = variants;
        self
    }

    /// Reject configurations that cannot run
    pub fn validate(&self) -> TodoResult<()> {
        if self.workers == 0 {
            return Err(TodoError::config("workers must be at least 1"));
        }
        if self.wait.poll_interval_ms == 0 {
            return Err(TodoError::config("poll interval must be greater than 0"));
        }
        if self.variants.is_empty() {
            return Err(TodoError::config("at least one variant is required"));
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> TodoResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(TodoError::config(format!(
            "{key}: expected a boolean, got '{other}'"
        ))),
    }
}

fn parse_num<T: std::str::FromStr>(key: &str, value: &str) -> TodoResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| TodoError::config(format!("{key}: expected a number, got '{value}'")))
}

/// Parse a comma-separated list of variant keys
pub fn parse_variants(value: &str) -> TodoResult<Vec<Variant>> {
    let mut variants = Vec::new();
    for key in value.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        let variant: Variant = key.parse()?;
        if !variants.contains(&variant) {
            variants.push(variant);
        }
    }
    Ok(variants)
}
