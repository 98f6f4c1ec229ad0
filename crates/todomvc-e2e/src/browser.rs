//! Browser control for live runs.
//!
//! With the `browser` feature this module drives real Chromium over the
//! Chrome `DevTools` Protocol via chromiumoxide. Each [`ChromiumDriver`] owns
//! one page inside its own browser context, so scenarios running in
//! parallel never share storage or cookies.

use serde::{Deserialize, Serialize};

/// Browser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// User agent string
    pub user_agent: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            user_agent: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Set user agent
    #[must_use]
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

// ============================================================================
// Real CDP Implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::BrowserConfig;
    use crate::driver::{ensure_single, Driver};
    use crate::locator::{js_string, Locator};
    use crate::result::{TodoError, TodoResult};
    use crate::wait::DEFAULT_NAVIGATION_TIMEOUT_MS;

    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::input::InsertTextParams;
    use chromiumoxide::cdp::browser_protocol::target::{
        CreateBrowserContextParams, CreateTargetParams,
    };
    use chromiumoxide::element::Element;
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use serde::de::DeserializeOwned;
    use serde::Deserialize;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;
    use tracing::{debug, warn};

    const TARGET_ATTR: &str = "data-e2e-target";

    /// Running Chromium instance
    #[derive(Debug)]
    pub struct ChromiumBrowser {
        config: BrowserConfig,
        inner: Arc<Mutex<CdpBrowser>>,
        handle: tokio::task::JoinHandle<()>,
    }

    impl ChromiumBrowser {
        /// Launch a new browser instance
        ///
        /// # Errors
        ///
        /// Returns error if browser cannot be launched
        pub async fn launch(config: BrowserConfig) -> TodoResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            if let Some(ref ua) = config.user_agent {
                builder = builder.arg(format!("--user-agent={ua}"));
            }

            let cdp_config = builder
                .build()
                .map_err(|message| TodoError::BrowserLaunch { message })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| TodoError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            // Spawn handler task
            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            debug!(headless = config.headless, "browser launched");
            Ok(Self {
                config,
                inner: Arc::new(Mutex::new(browser)),
                handle,
            })
        }

        /// Open a page in a fresh browser context
        ///
        /// # Errors
        ///
        /// Returns error if the context or page cannot be created
        pub async fn new_driver(&self) -> TodoResult<ChromiumDriver> {
            let mut browser = self.inner.lock().await;
            let context_id = browser
                .create_browser_context(CreateBrowserContextParams::default())
                .await
                .map_err(|e| TodoError::Page {
                    message: e.to_string(),
                })?;

            let mut target = CreateTargetParams::new("about:blank");
            target.browser_context_id = Some(context_id);

            let page = browser
                .new_page(target)
                .await
                .map_err(|e| TodoError::Page {
                    message: e.to_string(),
                })?;

            Ok(ChromiumDriver {
                page,
                navigation_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
                closed: false,
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser
        ///
        /// # Errors
        ///
        /// Returns error if the browser does not shut down cleanly
        pub async fn close(self) -> TodoResult<()> {
            {
                let mut browser = self.inner.lock().await;
                browser
                    .close()
                    .await
                    .map_err(|e| TodoError::BrowserLaunch {
                        message: e.to_string(),
                    })?;
                let _ = browser.wait().await;
            }
            self.handle.abort();
            Ok(())
        }
    }

    /// Single-element query result returned from the page
    #[derive(Debug, Deserialize)]
    struct Single<T> {
        count: usize,
        value: Option<T>,
    }

    /// One page driven over CDP
    #[derive(Debug)]
    pub struct ChromiumDriver {
        page: CdpPage,
        navigation_timeout_ms: u64,
        closed: bool,
    }

    impl ChromiumDriver {
        /// Set the navigation timeout
        #[must_use]
        pub const fn with_navigation_timeout(mut self, timeout_ms: u64) -> Self {
            self.navigation_timeout_ms = timeout_ms;
            self
        }

        async fn eval<T: DeserializeOwned>(&self, expr: String) -> TodoResult<T> {
            let result = self
                .page
                .evaluate(expr)
                .await
                .map_err(|e| TodoError::Page {
                    message: e.to_string(),
                })?;
            result.into_value().map_err(|e| TodoError::Page {
                message: e.to_string(),
            })
        }

        /// Evaluate `body` against the single element matched by `locator`
        /// (bound as `el`), enforcing the single-match rule
        async fn on_single<T: DeserializeOwned>(
            &self,
            locator: &Locator,
            body: &str,
        ) -> TodoResult<Option<T>> {
            let expr = format!(
                "(() => {{ const els = {}; if (els.length !== 1) return {{ count: els.length, value: null }}; \
                 const el = els[0]; return {{ count: 1, value: ({body}) }}; }})()",
                locator.to_js()
            );
            let single: Single<T> = self.eval(expr).await?;
            ensure_single(locator, single.count)?;
            Ok(single.value)
        }

        /// Tag the matched element and hand back a CDP element handle to it
        async fn element(&self, action: &'static str, locator: &Locator) -> TodoResult<Element> {
            let token = uuid::Uuid::new_v4().to_string();
            let _: Option<bool> = self
                .on_single(
                    locator,
                    &format!("(el.setAttribute({}, {}), true)", js_string(TARGET_ATTR), js_string(&token)),
                )
                .await?;
            self.page
                .find_element(format!("[{TARGET_ATTR}=\"{token}\"]"))
                .await
                .map_err(|e| Self::action_error(action, locator, &e))
        }

        fn action_error(
            action: &'static str,
            locator: &Locator,
            err: &impl std::fmt::Display,
        ) -> TodoError {
            TodoError::Action {
                action,
                locator: locator.to_string(),
                message: err.to_string(),
            }
        }
    }

    #[async_trait]
    impl Driver for ChromiumDriver {
        async fn goto(&mut self, url: &str) -> TodoResult<()> {
            let nav = async {
                self.page.goto(url).await?;
                self.page.wait_for_navigation().await?;
                Ok::<_, chromiumoxide::error::CdpError>(())
            };
            match tokio::time::timeout(Duration::from_millis(self.navigation_timeout_ms), nav).await
            {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(TodoError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                }),
                Err(_) => Err(TodoError::Timeout {
                    ms: self.navigation_timeout_ms,
                    what: format!("navigation to {url}"),
                }),
            }
        }

        async fn count(&self, locator: &Locator) -> TodoResult<usize> {
            self.eval(format!("{}.length", locator.to_js())).await
        }

        async fn text(&self, locator: &Locator) -> TodoResult<String> {
            Ok(self
                .on_single::<String>(locator, "el.textContent || ''")
                .await?
                .unwrap_or_default())
        }

        async fn attribute(&self, locator: &Locator, name: &str) -> TodoResult<Option<String>> {
            self.on_single(locator, &format!("el.getAttribute({})", js_string(name)))
                .await
        }

        async fn is_visible(&self, locator: &Locator) -> TodoResult<bool> {
            let body = "(() => { const r = el.getBoundingClientRect(); const s = getComputedStyle(el); \
                        return r.width > 0 && r.height > 0 && s.visibility !== 'hidden' && s.display !== 'none'; })()";
            Ok(self.on_single(locator, body).await?.unwrap_or(false))
        }

        async fn is_editable(&self, locator: &Locator) -> TodoResult<bool> {
            let body = "!el.disabled && !el.readOnly && \
                        (el.tagName === 'INPUT' || el.tagName === 'TEXTAREA' || el.isContentEditable)";
            Ok(self.on_single(locator, body).await?.unwrap_or(false))
        }

        async fn fill(&mut self, locator: &Locator, text: &str) -> TodoResult<()> {
            // Clear through the native setter so framework-controlled inputs see the change
            let clear = "(() => { el.focus(); \
                         const proto = el.tagName === 'TEXTAREA' ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype; \
                         Object.getOwnPropertyDescriptor(proto, 'value').set.call(el, ''); \
                         el.dispatchEvent(new Event('input', { bubbles: true })); return true; })()";
            let _: Option<bool> = self.on_single(locator, clear).await?;
            if text.is_empty() {
                return Ok(());
            }
            let element = self.element("fill", locator).await?;
            element
                .focus()
                .await
                .map_err(|e| Self::action_error("fill", locator, &e))?;
            self.page
                .execute(InsertTextParams::new(text))
                .await
                .map_err(|e| Self::action_error("fill", locator, &e))?;
            Ok(())
        }

        async fn press(&mut self, locator: &Locator, key: &str) -> TodoResult<()> {
            let element = self.element("press", locator).await?;
            element
                .focus()
                .await
                .map_err(|e| Self::action_error("press", locator, &e))?;
            element
                .press_key(key)
                .await
                .map_err(|e| Self::action_error("press", locator, &e))?;
            Ok(())
        }

        async fn click(&mut self, locator: &Locator) -> TodoResult<()> {
            let element = self.element("click", locator).await?;
            element
                .click()
                .await
                .map_err(|e| Self::action_error("click", locator, &e))?;
            Ok(())
        }

        async fn hover(&mut self, locator: &Locator) -> TodoResult<()> {
            let element = self.element("hover", locator).await?;
            element
                .hover()
                .await
                .map_err(|e| Self::action_error("hover", locator, &e))?;
            Ok(())
        }

        async fn check(&mut self, locator: &Locator) -> TodoResult<()> {
            let checked: Option<bool> = self.on_single(locator, "!!el.checked").await?;
            if checked == Some(true) {
                return Ok(());
            }
            self.click(locator).await?;
            let now: Option<bool> = self.on_single(locator, "!!el.checked").await?;
            if now == Some(true) {
                Ok(())
            } else {
                Err(TodoError::Action {
                    action: "check",
                    locator: locator.to_string(),
                    message: "clicking did not check the element".to_string(),
                })
            }
        }

        async fn current_url(&self) -> TodoResult<String> {
            let url = self.page.url().await.map_err(|e| TodoError::Page {
                message: e.to_string(),
            })?;
            Ok(url.unwrap_or_else(|| "about:blank".to_string()))
        }

        async fn close(&mut self) -> TodoResult<()> {
            if self.closed {
                return Ok(());
            }
            self.closed = true;
            if let Err(e) = self.page.clone().close().await {
                warn!(error = %e, "page did not close cleanly");
            }
            Ok(())
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::{ChromiumBrowser, ChromiumDriver};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert!(config.sandbox);
        assert!(config.chromium_path.is_none());
    }

    #[test]
    fn test_config_builders() {
        let config = BrowserConfig::default()
            .with_headless(false)
            .with_viewport(800, 600)
            .with_chromium_path("/usr/bin/chromium")
            .with_user_agent("todomvc-e2e")
            .with_no_sandbox();
        assert!(!config.headless);
        assert_eq!((config.viewport_width, config.viewport_height), (800, 600));
        assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
        assert_eq!(config.user_agent.as_deref(), Some("todomvc-e2e"));
        assert!(!config.sandbox);
    }
}
