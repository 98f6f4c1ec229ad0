//! Driver - Abstract Browser Automation Trait
//!
//! The page adapter talks to the browser only through [`Driver`], so the
//! same scenarios run against real Chromium ([`crate::ChromiumDriver`]) or
//! the in-memory [`crate::FakeTodoApp`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────────────────┐
//! │  Scenario    │───►│  TodoPage    │───►│  Driver                  │
//! │              │    │  (adapter)   │    │  ├─ ChromiumDriver (CDP) │
//! │              │    │              │    │  └─ FakeTodoApp          │
//! └──────────────┘    └──────────────┘    └──────────────────────────┘
//! ```
//!
//! Actions resolve their locator to exactly one element and fail fast
//! otherwise; waiting for actionability is the adapter's job.

use async_trait::async_trait;

use crate::locator::Locator;
use crate::result::{TodoError, TodoResult};

/// Key names understood by [`Driver::press`]
pub mod keys {
    /// Submit / confirm gesture
    pub const ENTER: &str = "Enter";
    /// Cancel an edit
    pub const ESCAPE: &str = "Escape";
}

/// Browser capability consumed by the page adapter
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate to `url` and wait for the load event
    async fn goto(&mut self, url: &str) -> TodoResult<()>;

    /// Number of elements currently matching
    async fn count(&self, locator: &Locator) -> TodoResult<usize>;

    /// Rendered text of the single matching element
    async fn text(&self, locator: &Locator) -> TodoResult<String>;

    /// Attribute value of the single matching element
    async fn attribute(&self, locator: &Locator, name: &str) -> TodoResult<Option<String>>;

    /// Whether the single matching element is rendered and visible
    async fn is_visible(&self, locator: &Locator) -> TodoResult<bool>;

    /// Whether the single matching element accepts text input
    async fn is_editable(&self, locator: &Locator) -> TodoResult<bool>;

    /// Replace the value of an input
    async fn fill(&mut self, locator: &Locator, text: &str) -> TodoResult<()>;

    /// Press a key while the element has focus
    async fn press(&mut self, locator: &Locator, key: &str) -> TodoResult<()>;

    /// Click the element
    async fn click(&mut self, locator: &Locator) -> TodoResult<()>;

    /// Move the pointer over the element
    async fn hover(&mut self, locator: &Locator) -> TodoResult<()>;

    /// Ensure a checkbox is checked
    async fn check(&mut self, locator: &Locator) -> TodoResult<()>;

    /// Current URL
    async fn current_url(&self) -> TodoResult<String>;

    /// Release browser resources
    async fn close(&mut self) -> TodoResult<()> {
        Ok(())
    }
}

/// Enforce the single-match rule for actions and single-element reads
pub fn ensure_single(locator: &Locator, count: usize) -> TodoResult<()> {
    match count {
        0 => Err(TodoError::ElementNotFound {
            locator: locator.to_string(),
        }),
        1 => Ok(()),
        n => Err(TodoError::StrictModeViolation {
            locator: locator.to_string(),
            count: n,
        }),
    }
}

/// Whether a whitespace-separated class attribute contains `token`
#[must_use]
pub fn has_class(class_attr: Option<&str>, token: &str) -> bool {
    class_attr.is_some_and(|c| c.split_whitespace().any(|t| t == token))
}
