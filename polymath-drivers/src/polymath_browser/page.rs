use anyhow::{Context, Result};
use fantoccini::{elements::Element, error::CmdError, Client, Locator};
use std::time::Duration;
use tracing::debug;

/// Page wrapper providing navigation, form submission and element queries.
pub struct PolymathPage {
    pub(crate) client: Client,
}

impl PolymathPage {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        self.client
            .goto(url)
            .await
            .with_context(|| format!("navigation to {url} failed"))
    }

    /// Return the full page HTML source.
    pub async fn get_content(&self) -> Result<String> {
        self.client.source().await.map_err(anyhow::Error::from)
    }

    /// Find a single element by its `id` attribute, waiting for it to exist.
    pub async fn find_by_id(&self, id: &str) -> Result<PolymathElement> {
        let element = self
            .client
            .wait()
            .for_element(Locator::Id(id))
            .await
            .with_context(|| format!("no element with id `{id}`"))?;
        Ok(PolymathElement::new(element))
    }

    /// Submit the form whose `id` attribute is `form_id`.
    pub async fn submit_form(&self, form_id: &str) -> Result<()> {
        let form = self
            .client
            .form(Locator::Id(form_id))
            .await
            .with_context(|| format!("no form with id `{form_id}`"))?;
        form.submit().await?;
        Ok(())
    }

    /// Poll until `selector` matches or `timeout` elapses.
    ///
    /// Returns `false` on timeout; only WebDriver failures are errors.
    pub async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<bool> {
        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
        {
            Ok(_) => Ok(true),
            Err(CmdError::WaitTimeout) => {
                debug!(target: "browser.page", %selector, ?timeout, "element did not appear");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

// =========================
// PolymathElement Definition
// =========================

#[derive(Clone)]
/// Wrapper for a located DOM element.
pub struct PolymathElement {
    pub element: Element,
}

impl PolymathElement {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    /// Clear the element, then type `text` into it.
    pub async fn type_str(&self, text: &str) -> Result<()> {
        self.element.clear().await?;
        self.element.send_keys(text).await?;
        Ok(())
    }
}
