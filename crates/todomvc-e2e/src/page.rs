//! Page Object for the TodoMVC application.
//!
//! [`TodoPage`] turns intentions ("add a todo", "toggle item N") into driver
//! calls using the selector table of the variant it was built for. It does
//! no validation of its own: blank input is sent to the page as-is, and an
//! out-of-range index surfaces as the driver failing to find the element.

use tracing::{debug, info};

use crate::driver::{keys, Driver};
use crate::expect::Expect;
use crate::locator::Locator;
use crate::registry::{Filter, Selectors, Variant};
use crate::result::{TodoError, TodoResult};
use crate::wait::{poll_until, PollOutcome, Sample, WaitPolicy, DEFAULT_NAVIGATION_TIMEOUT_MS};

/// A page or component reachable at a fixed URL
pub trait PageObject {
    /// URL the page is loaded from
    fn url(&self) -> &str;

    /// Time allowed for the page to become interactive
    fn load_timeout_ms(&self) -> u64 {
        DEFAULT_NAVIGATION_TIMEOUT_MS
    }

    /// Name for logging
    fn page_name(&self) -> String;
}

/// Variant-aware adapter over a [`Driver`]
#[derive(Debug)]
pub struct TodoPage<D: Driver> {
    driver: D,
    variant: Variant,
    policy: WaitPolicy,
    load_timeout_ms: u64,
}

impl<D: Driver> PageObject for TodoPage<D> {
    fn url(&self) -> &str {
        self.variant.base_url()
    }

    fn load_timeout_ms(&self) -> u64 {
        self.load_timeout_ms
    }

    fn page_name(&self) -> String {
        format!("TodoMVC ({})", self.variant)
    }
}

impl<D: Driver> TodoPage<D> {
    /// Bind a driver to a variant with an explicit polling policy
    #[must_use]
    pub fn new(driver: D, variant: Variant, policy: WaitPolicy) -> Self {
        Self {
            driver,
            variant,
            policy,
            load_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
        }
    }

    /// Set how long `navigate` waits for the input to appear
    #[must_use]
    pub const fn with_load_timeout(mut self, timeout_ms: u64) -> Self {
        self.load_timeout_ms = timeout_ms;
        self
    }

    /// Variant this page is bound to
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Polling policy for waits and expectations
    #[must_use]
    pub const fn policy(&self) -> WaitPolicy {
        self.policy
    }

    /// Underlying driver
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Give the driver back
    pub fn into_driver(self) -> D {
        self.driver
    }

    fn selectors(&self) -> &'static Selectors {
        self.variant.selectors()
    }

    // ---------------------------------------------------------------------
    // Locators
    // ---------------------------------------------------------------------

    /// Input used to add items
    #[must_use]
    pub fn new_todo_input(&self) -> Locator {
        Locator::css(self.selectors().new_todo_input)
    }

    /// Alternate read locator for the input, where the variant has one
    #[must_use]
    pub fn read_todo_input(&self) -> Option<Locator> {
        self.selectors().read_todo_input.map(Locator::css)
    }

    /// Every rendered list item
    #[must_use]
    pub fn todo_items(&self) -> Locator {
        Locator::css(self.selectors().todo_list_item)
    }

    /// Remaining-count display
    #[must_use]
    pub fn todo_count(&self) -> Locator {
        Locator::css(self.selectors().todo_count)
    }

    /// Clear-completed control
    #[must_use]
    pub fn clear_completed_button(&self) -> Locator {
        Locator::css(self.selectors().clear_completed)
    }

    /// Mark-all control, where the variant has one
    #[must_use]
    pub fn toggle_all_checkbox(&self) -> Option<Locator> {
        self.selectors().toggle_all.map(Locator::css)
    }

    /// Footer region
    #[must_use]
    pub fn footer(&self) -> Locator {
        Locator::css(self.selectors().footer)
    }

    /// Page heading
    #[must_use]
    pub fn title(&self) -> Locator {
        Locator::css(self.selectors().title)
    }

    /// Filter link by its href
    #[must_use]
    pub fn filter(&self, filter: Filter) -> Locator {
        Locator::css(self.selectors().filters.get(filter))
    }

    /// Filter link by its visible label
    #[must_use]
    pub fn filter_by_label(&self, filter: Filter) -> Locator {
        Locator::css(self.selectors().filter_links).has_text(filter.label())
    }

    /// Completion toggle of the `index`-th rendered item
    #[must_use]
    pub fn item_toggle(&self, index: usize) -> Locator {
        self.todo_items()
            .nth(index)
            .locator(self.selectors().toggle_checkbox)
    }

    /// Destroy control of the `index`-th rendered item
    #[must_use]
    pub fn item_destroy(&self, index: usize) -> Locator {
        self.todo_items()
            .nth(index)
            .locator(self.selectors().destroy_button)
    }

    /// Expectations on `locator` using this page's policy
    #[must_use]
    pub fn expect(&self, locator: Locator) -> Expect<'_, D> {
        Expect::new(&self.driver, locator, self.policy)
    }

    // ---------------------------------------------------------------------
    // Actions
    // ---------------------------------------------------------------------

    /// Wait until `locator` resolves to one visible element
    pub async fn wait_actionable(&self, locator: &Locator) -> TodoResult<()> {
        self.wait_actionable_within(locator, self.policy).await
    }

    async fn wait_actionable_within(&self, locator: &Locator, policy: WaitPolicy) -> TodoResult<()> {
        let driver = &self.driver;
        let outcome = poll_until(&policy, || async move {
            let count = driver.count(locator).await?;
            if count != 1 {
                return Ok(Sample::Pending(format!("{count} matching elements")));
            }
            Ok(if driver.is_visible(locator).await? {
                Sample::Ready(())
            } else {
                Sample::Pending("element is hidden".to_string())
            })
        })
        .await?;

        match outcome {
            PollOutcome::Ready(()) => Ok(()),
            PollOutcome::TimedOut { last } => Err(TodoError::Timeout {
                ms: policy.timeout_ms,
                what: format!("{locator} to be actionable ({last})"),
            }),
        }
    }

    /// Load the variant's URL and wait for the new-item input
    pub async fn navigate(&mut self) -> TodoResult<()> {
        let url = self.url().to_string();
        info!(variant = %self.variant, %url, "navigating");
        self.driver.goto(&url).await?;
        let load = self.policy.with_timeout(self.load_timeout_ms);
        self.wait_actionable_within(&self.new_todo_input(), load)
            .await
    }

    /// Type `text` into the input and confirm with Enter
    pub async fn add_item(&mut self, text: &str) -> TodoResult<()> {
        debug!(variant = %self.variant, chars = text.chars().count(), "add item");
        let input = self.new_todo_input();
        self.wait_actionable(&input).await?;
        self.driver.fill(&input, text).await?;
        self.driver.press(&input, keys::ENTER).await
    }

    /// Add several items in order
    pub async fn add_items<S: AsRef<str>>(&mut self, texts: &[S]) -> TodoResult<()> {
        for text in texts {
            self.add_item(text.as_ref()).await?;
        }
        Ok(())
    }

    /// Check the completion toggle of the `index`-th rendered item
    pub async fn toggle_item(&mut self, index: usize) -> TodoResult<()> {
        debug!(variant = %self.variant, index, "toggle item");
        let toggle = self.item_toggle(index);
        self.wait_actionable(&toggle).await?;
        self.driver.check(&toggle).await
    }

    /// Hover the `index`-th item to reveal its destroy control, then click it
    pub async fn delete_item(&mut self, index: usize) -> TodoResult<()> {
        debug!(variant = %self.variant, index, "delete item");
        let item = self.todo_items().nth(index);
        self.wait_actionable(&item).await?;
        self.driver.hover(&item).await?;
        let destroy = self.item_destroy(index);
        self.wait_actionable(&destroy).await?;
        self.driver.click(&destroy).await
    }

    /// Click the clear-completed control
    pub async fn clear_completed(&mut self) -> TodoResult<()> {
        debug!(variant = %self.variant, "clear completed");
        let button = self.clear_completed_button();
        self.wait_actionable(&button).await?;
        self.driver.click(&button).await
    }

    /// Click a filter link
    pub async fn select_filter(&mut self, filter: Filter) -> TodoResult<()> {
        debug!(variant = %self.variant, filter = filter.label(), "select filter");
        let link = self.filter(filter);
        self.wait_actionable(&link).await?;
        self.driver.click(&link).await
    }

    /// Click the mark-all control; unsupported on variants without one
    pub async fn toggle_all(&mut self) -> TodoResult<()> {
        let selector =
            Selectors::require(self.variant, self.selectors().toggle_all, "toggle_all")?;
        let toggle = Locator::css(selector);
        self.wait_actionable(&toggle).await?;
        self.driver.click(&toggle).await
    }

    /// Press Enter in the input without typing anything
    pub async fn submit_empty(&mut self) -> TodoResult<()> {
        let input = self.new_todo_input();
        self.wait_actionable(&input).await?;
        self.driver.press(&input, keys::ENTER).await
    }

    /// Click an arbitrary locator after waiting for it
    pub async fn click(&mut self, locator: &Locator) -> TodoResult<()> {
        self.wait_actionable(locator).await?;
        self.driver.click(locator).await
    }

    /// Check an arbitrary checkbox after waiting for it
    pub async fn check(&mut self, locator: &Locator) -> TodoResult<()> {
        self.wait_actionable(locator).await?;
        self.driver.check(locator).await
    }

    /// Texts of every rendered item, top to bottom
    pub async fn item_texts(&self) -> TodoResult<Vec<String>> {
        let items = self.todo_items();
        let count = self.driver.count(&items).await?;
        let mut texts = Vec::with_capacity(count);
        for i in 0..count {
            texts.push(self.driver.text(&items.nth(i)).await?.trim().to_string());
        }
        Ok(texts)
    }

    /// Close the underlying driver
    pub async fn close(&mut self) -> TodoResult<()> {
        self.driver.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeTodoApp;

    async fn page(variant: Variant) -> TodoPage<FakeTodoApp> {
        let mut page = TodoPage::new(FakeTodoApp::new(variant), variant, WaitPolicy::fast());
        page.navigate().await.unwrap();
        page
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_toggle_is_scoped_to_item() {
            let page = TodoPage::new(
                FakeTodoApp::new(Variant::TypescriptReact),
                Variant::TypescriptReact,
                WaitPolicy::default(),
            );
            assert_eq!(
                page.item_toggle(1).to_string(),
                r#".todo-list li >> nth=1 >> input[type="checkbox"]"#
            );
        }

        #[test]
        fn test_optional_locators() {
            let classic = TodoPage::new(
                FakeTodoApp::new(Variant::Classic),
                Variant::Classic,
                WaitPolicy::default(),
            );
            assert!(classic.read_todo_input().is_some());
            assert!(classic.toggle_all_checkbox().is_some());
            let ts = TodoPage::new(
                FakeTodoApp::new(Variant::TypescriptReact),
                Variant::TypescriptReact,
                WaitPolicy::default(),
            );
            assert!(ts.read_todo_input().is_none());
            assert!(ts.toggle_all_checkbox().is_none());
        }

        #[test]
        fn test_page_object_metadata() {
            let page = TodoPage::new(
                FakeTodoApp::new(Variant::Classic),
                Variant::Classic,
                WaitPolicy::default(),
            )
            .with_load_timeout(1_000);
            assert_eq!(page.url(), Variant::Classic.base_url());
            assert_eq!(page.load_timeout_ms(), 1_000);
            assert_eq!(page.page_name(), "TodoMVC (classic)");
        }
    }

    mod action_tests {
        use super::*;

        #[tokio::test]
        async fn test_navigate_starts_empty() {
            let mut page = page(Variant::Classic).await;
            page.add_item("leftover").await.unwrap();
            page.navigate().await.unwrap();
            page.expect(page.todo_items()).to_have_count(0).await.unwrap();
            assert!(page.driver().was_called("goto:"));
        }

        #[tokio::test]
        async fn test_delete_hovers_first() {
            let mut page = page(Variant::TypescriptReact).await;
            page.add_items(&["a", "b", "c"]).await.unwrap();
            page.delete_item(1).await.unwrap();
            assert_eq!(page.item_texts().await.unwrap(), vec!["a", "c"]);
            let history = page.driver().history();
            let hover = history.iter().position(|c| c.starts_with("hover:")).unwrap();
            let click = history.iter().position(|c| c.starts_with("click:")).unwrap();
            assert!(hover < click);
        }

        #[tokio::test]
        async fn test_out_of_range_index_times_out() {
            let mut page = page(Variant::Classic).await;
            page.add_item("only").await.unwrap();
            let err = page.toggle_item(5).await.unwrap_err();
            assert!(matches!(err, TodoError::Timeout { .. }));
            assert!(err.to_string().contains("nth=5"));
        }

        #[tokio::test]
        async fn test_toggle_all_unsupported_on_typescript_react() {
            let mut page = page(Variant::TypescriptReact).await;
            page.add_item("x").await.unwrap();
            let err = page.toggle_all().await.unwrap_err();
            assert!(err.is_config());
        }

        #[tokio::test]
        async fn test_toggle_all_on_classic() {
            let mut page = page(Variant::Classic).await;
            page.add_items(&["x", "y"]).await.unwrap();
            page.toggle_all().await.unwrap();
            page.expect(page.todo_count())
                .to_have_text("0 items left!")
                .await
                .unwrap();
        }
    }
}
