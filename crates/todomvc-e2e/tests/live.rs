//! Live runs against todomvc.com in headless Chromium.
//!
//! Needs a Chromium binary and network access:
//! `cargo test -p todomvc-e2e --test live -- --ignored`

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use todomvc_e2e::scenarios::{self, TODOS};
use todomvc_e2e::{
    logging, run_all, BrowserConfig, ChromiumBrowser, Filter, SuiteConfig, TodoPage, Variant,
};

async fn browser() -> ChromiumBrowser {
    let config = SuiteConfig::from_env().unwrap();
    ChromiumBrowser::launch(config.browser).await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires chromium and network"]
async fn live_catalog_passes() {
    logging::init_for_tests();
    let config = SuiteConfig::from_env().unwrap();
    let browser = Arc::new(ChromiumBrowser::launch(config.browser.clone()).await.unwrap());
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
    let report = run_all(scenarios::catalog(), config.workers, &config, factory)
        .await
        .unwrap();

    if let Ok(browser) = Arc::try_unwrap(browser) {
        browser.close().await.unwrap();
    }
    assert!(report.all_passed(), "{:#?}", report.failures());
}

#[tokio::test]
#[ignore = "requires chromium and network"]
async fn live_toggle_then_completed_filter() {
    let browser = browser().await;
    for variant in Variant::ALL {
        let driver = browser.new_driver().await.unwrap();
        let mut page = TodoPage::new(driver, variant, SuiteConfig::default().wait);
        page.navigate().await.unwrap();
        page.add_items(&TODOS).await.unwrap();
        page.toggle_item(1).await.unwrap();
        page.select_filter(Filter::Completed).await.unwrap();
        page.expect(page.todo_items()).to_have_count(1).await.unwrap();
        page.expect(page.todo_items().first())
            .to_have_class("completed")
            .await
            .unwrap();
        page.close().await.unwrap();
    }
    browser.close().await.unwrap();
}

#[tokio::test]
#[ignore = "requires chromium"]
async fn live_launch_with_custom_viewport() {
    let config = BrowserConfig::default().with_viewport(800, 600);
    let browser = ChromiumBrowser::launch(config).await.unwrap();
    assert_eq!(browser.config().viewport_width, 800);
    browser.close().await.unwrap();
}
