use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::bail;
use async_trait::async_trait;
use polymath_wiki::browser::{BrowserLauncher, BrowserSession};
use polymath_wiki::{
    DateRole, LookupError, LookupOrchestrator, LookupSettings, ScanError, Subject, SubjectId,
};
use url::Url;

const EINSTEIN: &str = include_str!("fixtures/einstein.html");
const SEARCH_RESULTS: &str = include_str!("fixtures/search_results.html");
const BORN_ONLY: &str = include_str!("fixtures/born_only.html");

#[derive(Debug, Default)]
struct Journal {
    launched: Vec<String>,
    typed: Vec<(String, String)>,
    submitted: Vec<String>,
    waited_for: Vec<String>,
    closed: usize,
}

/// Serves a canned page; `None` simulates an unreachable WebDriver.
struct FakeLauncher {
    page: Option<&'static str>,
    fail_typing: bool,
    fail_close: bool,
    journal: Arc<Mutex<Journal>>,
}

impl FakeLauncher {
    fn serving(page: &'static str) -> (Self, Arc<Mutex<Journal>>) {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let launcher = Self {
            page: Some(page),
            fail_typing: false,
            fail_close: false,
            journal: journal.clone(),
        };
        (launcher, journal)
    }
}

struct FakeSession {
    page: &'static str,
    fail_typing: bool,
    fail_close: bool,
    journal: Arc<Mutex<Journal>>,
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    async fn launch(&self, url: &Url) -> anyhow::Result<Box<dyn BrowserSession>> {
        self.journal.lock().unwrap().launched.push(url.to_string());
        let Some(page) = self.page else {
            bail!("webdriver unreachable");
        };
        Ok(Box::new(FakeSession {
            page,
            fail_typing: self.fail_typing,
            fail_close: self.fail_close,
            journal: self.journal.clone(),
        }))
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn input_text(&mut self, element_id: &str, text: &str) -> anyhow::Result<()> {
        if self.fail_typing {
            bail!("no element with id `{element_id}`");
        }
        self.journal
            .lock()
            .unwrap()
            .typed
            .push((element_id.to_string(), text.to_string()));
        Ok(())
    }

    async fn submit_form(&mut self, form_id: &str) -> anyhow::Result<()> {
        self.journal
            .lock()
            .unwrap()
            .submitted
            .push(form_id.to_string());
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str, _timeout: Duration) -> anyhow::Result<bool> {
        self.journal
            .lock()
            .unwrap()
            .waited_for
            .push(selector.to_string());
        Ok(self.page.contains("infobox biography vcard"))
    }

    async fn page_source(&mut self) -> anyhow::Result<String> {
        Ok(self.page.to_string())
    }

    async fn close(self: Box<Self>) -> anyhow::Result<()> {
        self.journal.lock().unwrap().closed += 1;
        if self.fail_close {
            bail!("session already gone");
        }
        Ok(())
    }
}

fn settings() -> LookupSettings {
    LookupSettings {
        site_url: Url::parse("https://www.wikipedia.org/").unwrap(),
        search_input_id: "searchInput".into(),
        search_form_id: "search-form".into(),
        infobox_selector: "table.infobox.biography.vcard".into(),
        render_delay: Duration::ZERO,
        ready_timeout: Duration::from_millis(10),
    }
}

fn subject(name: &str) -> Subject {
    Subject {
        id: SubjectId(1),
        name: name.to_string(),
    }
}

#[tokio::test]
async fn einstein_lookup_reports_verified_age() {
    let (launcher, journal) = FakeLauncher::serving(EINSTEIN);
    let mut orchestrator = LookupOrchestrator::new(launcher, settings()).unwrap();

    let summary = orchestrator
        .lookup(&subject("Albert Einstein"))
        .await
        .expect("lookup succeeds");

    assert_eq!(summary.subject, "Albert Einstein");
    assert_eq!(summary.age, 76);
    assert!(summary
        .introduction
        .starts_with("Albert Einstein (14 March 1879 – 18 April 1955) was a German-born"));

    let journal = journal.lock().unwrap();
    assert_eq!(journal.launched, ["https://www.wikipedia.org/"]);
    assert_eq!(
        journal.typed,
        [("searchInput".to_string(), "Albert Einstein".to_string())]
    );
    assert_eq!(journal.submitted, ["search-form"]);
    assert_eq!(journal.waited_for, ["table.infobox.biography.vcard"]);
    assert_eq!(journal.closed, 1);
}

#[tokio::test]
async fn missing_infobox_still_releases_session() {
    let (launcher, journal) = FakeLauncher::serving(SEARCH_RESULTS);
    let mut orchestrator = LookupOrchestrator::new(launcher, settings()).unwrap();

    let err = orchestrator
        .lookup(&subject("Albert Einstien"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        LookupError::Scan(ScanError::InfoboxNotFound { .. })
    ));
    assert_eq!(journal.lock().unwrap().closed, 1);
}

#[tokio::test]
async fn born_without_died_emits_no_summary() {
    let (launcher, journal) = FakeLauncher::serving(BORN_ONLY);
    let mut orchestrator = LookupOrchestrator::new(launcher, settings()).unwrap();

    let err = orchestrator.lookup(&subject("Jane Goodall")).await.unwrap_err();

    assert!(matches!(
        err,
        LookupError::Scan(ScanError::MissingDate(DateRole::Death))
    ));
    assert_eq!(journal.lock().unwrap().closed, 1);
}

#[tokio::test]
async fn browser_failure_mid_lookup_releases_session() {
    let (mut launcher, journal) = FakeLauncher::serving(EINSTEIN);
    launcher.fail_typing = true;
    let mut orchestrator = LookupOrchestrator::new(launcher, settings()).unwrap();

    let err = orchestrator
        .lookup(&subject("Albert Einstein"))
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Browser(_)));
    assert!(err.to_string().contains("searchInput"));
    let journal = journal.lock().unwrap();
    assert!(journal.submitted.is_empty());
    assert_eq!(journal.closed, 1);
}

#[tokio::test]
async fn close_failure_does_not_mask_summary() {
    let (mut launcher, journal) = FakeLauncher::serving(EINSTEIN);
    launcher.fail_close = true;
    let mut orchestrator = LookupOrchestrator::new(launcher, settings()).unwrap();

    let summary = orchestrator
        .lookup(&subject("Albert Einstein"))
        .await
        .expect("close failure is only logged");

    assert_eq!(summary.age, 76);
    assert_eq!(journal.lock().unwrap().closed, 1);
}

#[tokio::test]
async fn close_failure_does_not_mask_scan_error() {
    let (mut launcher, journal) = FakeLauncher::serving(SEARCH_RESULTS);
    launcher.fail_close = true;
    let mut orchestrator = LookupOrchestrator::new(launcher, settings()).unwrap();

    let err = orchestrator
        .lookup(&subject("Albert Einstien"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        LookupError::Scan(ScanError::InfoboxNotFound { .. })
    ));
    assert_eq!(journal.lock().unwrap().closed, 1);
}

#[tokio::test]
async fn failed_launch_has_nothing_to_release() {
    let journal = Arc::new(Mutex::new(Journal::default()));
    let launcher = FakeLauncher {
        page: None,
        fail_typing: false,
        fail_close: false,
        journal: journal.clone(),
    };
    let mut orchestrator = LookupOrchestrator::new(launcher, settings()).unwrap();

    let err = orchestrator
        .lookup(&subject("Marie Curie"))
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Browser(_)));
    let journal = journal.lock().unwrap();
    assert_eq!(journal.launched.len(), 1);
    assert_eq!(journal.closed, 0);
}

#[tokio::test]
async fn sequential_lookups_each_get_a_fresh_session() {
    let (launcher, journal) = FakeLauncher::serving(EINSTEIN);
    let mut orchestrator = LookupOrchestrator::new(launcher, settings()).unwrap();

    for _ in 0..3 {
        orchestrator
            .lookup(&subject("Albert Einstein"))
            .await
            .unwrap();
    }

    let journal = journal.lock().unwrap();
    assert_eq!(journal.launched.len(), 3);
    assert_eq!(journal.closed, 3);
}
