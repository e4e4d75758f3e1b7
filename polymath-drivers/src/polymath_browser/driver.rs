use crate::polymath_browser::{chrome::build_chrome_arguments, page::PolymathPage};
use anyhow::{Context, Result};
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use tracing::{debug, info};
use webdriver::capabilities::Capabilities;

/// Where and how to start a WebDriver session.
#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// Endpoint of a running WebDriver service (Chromedriver by default).
    pub webdriver_url: String,
    pub headless: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
        }
    }
}

impl DriverOptions {
    /// WebDriver capabilities carrying the Chrome arguments for these options.
    pub fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::new();
        let args = build_chrome_arguments(self.headless);
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({ "args": args }),
        );
        caps
    }
}

/// Thin wrapper around one `fantoccini` WebDriver session.
pub struct PolymathDriver {
    client: Client,
}

impl PolymathDriver {
    /// Open a new browser session against `options.webdriver_url`.
    pub async fn connect(options: &DriverOptions) -> Result<Self> {
        debug!(
            target: "browser.session",
            url = %options.webdriver_url,
            headless = options.headless,
            "connecting to webdriver"
        );
        let client = ClientBuilder::native()
            .capabilities(options.capabilities())
            .connect(&options.webdriver_url)
            .await
            .with_context(|| format!("failed to connect to webdriver at {}", options.webdriver_url))?;
        info!(target: "browser.session", "browser session opened");

        Ok(Self { client })
    }

    /// Navigate to `url` and return a [`PolymathPage`] bound to this session.
    pub async fn goto(&self, url: &str) -> Result<PolymathPage> {
        let page = PolymathPage::new(self.client.clone());
        page.goto(url).await?;
        Ok(page)
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        info!(target: "browser.session", "browser session closed");
        Ok(())
    }
}
