//! Retrying expectations on locators.
//!
//! Every check polls the driver under the bound [`WaitPolicy`] until it
//! holds or the budget runs out, then fails with the expected and the last
//! observed state side by side.

use crate::driver::{has_class, Driver};
use crate::locator::Locator;
use crate::result::{TodoError, TodoResult};
use crate::wait::{poll_until, PollOutcome, Sample, WaitPolicy};

/// Normalize rendered text the way the browser reports it for matching
#[must_use]
pub fn normalize_text(s: &str) -> &str {
    s.trim()
}

/// Expectations about one locator
#[derive(Debug)]
pub struct Expect<'a, D: Driver> {
    driver: &'a D,
    locator: Locator,
    policy: WaitPolicy,
}

impl<'a, D: Driver> Expect<'a, D> {
    /// Bind a locator to a driver and polling policy
    #[must_use]
    pub fn new(driver: &'a D, locator: Locator, policy: WaitPolicy) -> Self {
        Self {
            driver,
            locator,
            policy,
        }
    }

    /// Override the polling policy for this expectation
    #[must_use]
    pub const fn with_policy(mut self, policy: WaitPolicy) -> Self {
        self.policy = policy;
        self
    }

    async fn check<F, Fut>(&self, expected: String, mut sample: F) -> TodoResult<()>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = TodoResult<Sample<()>>>,
    {
        match poll_until(&self.policy, &mut sample).await? {
            PollOutcome::Ready(()) => Ok(()),
            PollOutcome::TimedOut { last } => Err(TodoError::AssertionFailed {
                locator: self.locator.to_string(),
                expected,
                actual: last,
            }),
        }
    }

    /// Exactly `n` elements match
    pub async fn to_have_count(&self, n: usize) -> TodoResult<()> {
        self.check(format!("count {n}"), || async move {
            let actual = self.driver.count(&self.locator).await?;
            Ok(if actual == n {
                Sample::Ready(())
            } else {
                Sample::Pending(format!("count {actual}"))
            })
        })
        .await
    }

    /// Rendered text equals `text` (outer whitespace ignored)
    pub async fn to_have_text(&self, text: &str) -> TodoResult<()> {
        let want = normalize_text(text);
        self.check(format!("text {want:?}"), || async move {
            let actual = self.driver.text(&self.locator).await?;
            Ok(if normalize_text(&actual) == want {
                Sample::Ready(())
            } else {
                Sample::Pending(format!("text {:?}", normalize_text(&actual)))
            })
        })
        .await
    }

    /// Rendered text contains `text`
    pub async fn to_contain_text(&self, text: &str) -> TodoResult<()> {
        self.check(format!("text containing {text:?}"), || async move {
            let actual = self.driver.text(&self.locator).await?;
            Ok(if actual.contains(text) {
                Sample::Ready(())
            } else {
                Sample::Pending(format!("text {actual:?}"))
            })
        })
        .await
    }

    /// Class list contains `token`
    pub async fn to_have_class(&self, token: &str) -> TodoResult<()> {
        self.class_check(token, true).await
    }

    /// Class list does not contain `token`
    pub async fn not_to_have_class(&self, token: &str) -> TodoResult<()> {
        self.class_check(token, false).await
    }

    async fn class_check(&self, token: &str, present: bool) -> TodoResult<()> {
        let expected = if present {
            format!("class containing {token:?}")
        } else {
            format!("class without {token:?}")
        };
        self.check(expected, || async move {
            let class = self.driver.attribute(&self.locator, "class").await?;
            Ok(if has_class(class.as_deref(), token) == present {
                Sample::Ready(())
            } else {
                Sample::Pending(format!("class {:?}", class.unwrap_or_default()))
            })
        })
        .await
    }

    /// Element is visible
    pub async fn to_be_visible(&self) -> TodoResult<()> {
        self.check("visible".to_string(), || async move {
            Ok(if self.driver.is_visible(&self.locator).await? {
                Sample::Ready(())
            } else {
                Sample::Pending("hidden".to_string())
            })
        })
        .await
    }

    /// Element accepts input
    pub async fn to_be_editable(&self) -> TodoResult<()> {
        self.check("editable".to_string(), || async move {
            Ok(if self.driver.is_editable(&self.locator).await? {
                Sample::Ready(())
            } else {
                Sample::Pending("not editable".to_string())
            })
        })
        .await
    }

    /// Attribute `name` equals `value`
    pub async fn to_have_attribute(&self, name: &str, value: &str) -> TodoResult<()> {
        self.check(format!("{name}={value:?}"), || async move {
            let actual = self.driver.attribute(&self.locator, name).await?;
            Ok(if actual.as_deref() == Some(value) {
                Sample::Ready(())
            } else {
                Sample::Pending(match actual {
                    Some(v) => format!("{name}={v:?}"),
                    None => format!("no {name} attribute"),
                })
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::keys;
    use crate::fake::FakeTodoApp;
    use crate::registry::Variant;

    async fn app_with(items: &[&str]) -> FakeTodoApp {
        let mut app = FakeTodoApp::new(Variant::Classic);
        app.goto(Variant::Classic.base_url()).await.unwrap();
        let input = Locator::css("#todo-input");
        for item in items {
            app.fill(&input, item).await.unwrap();
            app.press(&input, keys::ENTER).await.unwrap();
        }
        app
    }

    fn fast() -> WaitPolicy {
        WaitPolicy::new(30).with_poll_interval(5)
    }

    #[tokio::test]
    async fn test_count_passes_and_fails() {
        let app = app_with(&["a", "b"]).await;
        let items = Locator::css(".todo-list li");
        Expect::new(&app, items.clone(), fast())
            .to_have_count(2)
            .await
            .unwrap();
        let err = Expect::new(&app, items, fast())
            .to_have_count(3)
            .await
            .unwrap_err();
        match err {
            TodoError::AssertionFailed {
                expected, actual, ..
            } => {
                assert_eq!(expected, "count 3");
                assert_eq!(actual, "count 2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_text_exact_not_substring() {
        let app = app_with(&["Buy groceries2"]).await;
        let first = Locator::css(".todo-list li").first();
        Expect::new(&app, first.clone(), fast())
            .to_have_text("Buy groceries2")
            .await
            .unwrap();
        assert!(Expect::new(&app, first.clone(), fast())
            .to_have_text("Buy groceries")
            .await
            .is_err());
        Expect::new(&app, first, fast())
            .to_contain_text("groceries")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_class_and_attribute() {
        let mut app = app_with(&["a"]).await;
        let item = Locator::css(".todo-list li").first();
        Expect::new(&app, item.clone(), fast())
            .not_to_have_class("completed")
            .await
            .unwrap();
        app.check(&item.locator(".toggle")).await.unwrap();
        Expect::new(&app, item, fast())
            .to_have_class("completed")
            .await
            .unwrap();
        Expect::new(&app, Locator::css("#todo-input"), fast())
            .to_have_attribute("placeholder", "What needs to be done?")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_missing_element_reports_last_error() {
        let app = app_with(&[]).await;
        let err = Expect::new(&app, Locator::css(".todo-count"), fast())
            .to_be_visible()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No element matches .todo-count"));
    }
}
