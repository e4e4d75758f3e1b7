use std::fmt;
use std::time::Duration;

use polymath_common::PolymathError;
use polymath_config::PolymathConfig;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::browser::{BrowserLauncher, BrowserSession};
use crate::error::{LookupError, ScanError};
use crate::scanner::BiographyPageScanner;
use crate::subjects::Subject;

/// Site and timing parameters for a lookup.
#[derive(Debug, Clone)]
pub struct LookupSettings {
    pub site_url: Url,
    pub search_input_id: String,
    pub search_form_id: String,
    pub infobox_selector: String,
    /// Fixed pause after submitting the search.
    pub render_delay: Duration,
    /// Bound on the infobox readiness poll that follows the pause.
    pub ready_timeout: Duration,
}

impl LookupSettings {
    pub fn from_config(config: &PolymathConfig) -> polymath_common::Result<Self> {
        let site_url = Url::parse(&config.site.url)
            .map_err(|e| PolymathError::Config(format!("site.url `{}`: {e}", config.site.url)))?;
        Ok(Self {
            site_url,
            search_input_id: config.site.search_input_id.clone(),
            search_form_id: config.site.search_form_id.clone(),
            infobox_selector: config.site.infobox_selector.clone(),
            render_delay: Duration::from_millis(config.browser.render_delay_ms),
            ready_timeout: Duration::from_millis(config.browser.ready_timeout_ms),
        })
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiographySummary {
    pub subject: String,
    pub age: u32,
    pub introduction: String,
}

impl fmt::Display for BiographySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.subject;
        writeln!(
            f,
            "I have finished gathering the age and introduction for {name}.\n"
        )?;
        writeln!(f, "{name} was {} years old.\n", self.age)?;
        writeln!(f, "Here's a short intro into who {name} was,\n")?;
        writeln!(f, "{}\n", self.introduction)
    }
}

/// Drives one lookup at a time: search, wait, read, release.
pub struct LookupOrchestrator<L> {
    launcher: L,
    settings: LookupSettings,
    scanner: BiographyPageScanner,
}

impl<L: BrowserLauncher> LookupOrchestrator<L> {
    pub fn new(launcher: L, settings: LookupSettings) -> Result<Self, ScanError> {
        let scanner = BiographyPageScanner::new(&settings.infobox_selector)?;
        Ok(Self {
            launcher,
            settings,
            scanner,
        })
    }

    /// Look `subject` up in a fresh browser session.
    ///
    /// The session is closed before this returns, whatever the outcome. A
    /// failure to close is logged and does not replace the lookup result.
    #[instrument(target = "wiki.lookup", skip_all, fields(subject = %subject.name))]
    pub async fn lookup(&mut self, subject: &Subject) -> Result<BiographySummary, LookupError> {
        let mut session = self.launcher.launch(&self.settings.site_url).await?;

        let outcome = self.read_biography(session.as_mut(), subject).await;

        if let Err(e) = session.close().await {
            warn!(target: "wiki.lookup", error = %e, "failed to release browser session");
        }

        match &outcome {
            Ok(summary) => info!(target: "wiki.lookup", age = summary.age, "lookup finished"),
            Err(e) => warn!(target: "wiki.lookup", error = %e, "lookup failed"),
        }
        outcome
    }

    async fn read_biography(
        &self,
        session: &mut dyn BrowserSession,
        subject: &Subject,
    ) -> Result<BiographySummary, LookupError> {
        session
            .input_text(&self.settings.search_input_id, &subject.name)
            .await?;
        session.submit_form(&self.settings.search_form_id).await?;

        if !self.settings.render_delay.is_zero() {
            sleep(self.settings.render_delay).await;
        }
        let ready = session
            .wait_for(self.scanner.infobox_selector(), self.settings.ready_timeout)
            .await?;
        if !ready {
            debug!(
                target: "wiki.lookup",
                selector = self.scanner.infobox_selector(),
                "infobox still absent after readiness timeout"
            );
        }

        let html = session.page_source().await?;
        let scanned = self.scanner.scan(&html)?;

        Ok(BiographySummary {
            subject: subject.name.clone(),
            age: scanned.age,
            introduction: scanned.introduction,
        })
    }
}
