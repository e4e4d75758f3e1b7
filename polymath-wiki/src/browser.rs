//! Browser collaborator seen by the lookup.
//!
//! A [`BrowserLauncher`] opens a fresh [`BrowserSession`] at a URL; the
//! session exposes just what a search-and-read lookup needs. The production
//! launcher is backed by `polymath-drivers` (Fantoccini/WebDriver).

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use polymath_config::BrowserConfig;
use polymath_drivers::polymath_browser::driver::{DriverOptions, PolymathDriver};
use polymath_drivers::polymath_browser::page::PolymathPage;
use tracing::warn;
use url::Url;

#[async_trait]
pub trait BrowserSession: Send {
    /// Type `text` into the input whose id is `element_id`.
    async fn input_text(&mut self, element_id: &str, text: &str) -> Result<()>;

    async fn submit_form(&mut self, form_id: &str) -> Result<()>;

    /// Wait until `selector` matches; `false` if `timeout` ran out first.
    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<bool>;

    /// Current rendered markup.
    async fn page_source(&mut self) -> Result<String>;

    async fn close(self: Box<Self>) -> Result<()>;
}

#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Open a new session showing `url`.
    async fn launch(&self, url: &Url) -> Result<Box<dyn BrowserSession>>;
}

/// Launcher that starts one WebDriver session per lookup.
pub struct FantocciniLauncher {
    options: DriverOptions,
}

impl FantocciniLauncher {
    pub fn new(options: DriverOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &BrowserConfig) -> Self {
        Self::new(DriverOptions {
            webdriver_url: config.webdriver_url.clone(),
            headless: config.headless,
        })
    }
}

#[async_trait]
impl BrowserLauncher for FantocciniLauncher {
    async fn launch(&self, url: &Url) -> Result<Box<dyn BrowserSession>> {
        let driver = PolymathDriver::connect(&self.options).await?;
        match driver.goto(url.as_str()).await {
            Ok(page) => Ok(Box::new(FantocciniSession { driver, page })),
            Err(e) => {
                if let Err(close_err) = driver.close().await {
                    warn!(target: "browser.session", error = %close_err, "failed to close session after navigation error");
                }
                Err(e)
            }
        }
    }
}

struct FantocciniSession {
    driver: PolymathDriver,
    page: PolymathPage,
}

#[async_trait]
impl BrowserSession for FantocciniSession {
    async fn input_text(&mut self, element_id: &str, text: &str) -> Result<()> {
        self.page.find_by_id(element_id).await?.type_str(text).await
    }

    async fn submit_form(&mut self, form_id: &str) -> Result<()> {
        self.page.submit_form(form_id).await
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<bool> {
        self.page.wait_for(selector, timeout).await
    }

    async fn page_source(&mut self) -> Result<String> {
        self.page.get_content().await
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.driver.close().await
    }
}
