use clap::Parser;
use polymath_config::PolymathConfig;
use std::path::PathBuf;

/// Look up famous scientists' ages and introductions.
#[derive(Debug, Parser)]
#[command(name = "polymath", version)]
pub struct Cli {
    /// YAML config file; defaults to ./polymath.yaml or the user config dir.
    #[arg(short, long, env = "POLYMATH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show the browser window instead of running headless.
    #[arg(long)]
    pub headed: bool,

    /// WebDriver endpoint, e.g. http://localhost:4444 for geckodriver.
    #[arg(long, env = "POLYMATH_WEBDRIVER_URL")]
    pub webdriver_url: Option<String>,

    /// Pause after submitting a search, in milliseconds.
    #[arg(long)]
    pub render_delay_ms: Option<u64>,
}

impl Cli {
    /// Flags win over file and `POLYMATH__*` settings.
    pub fn apply(&self, config: &mut PolymathConfig) {
        if self.headed {
            config.browser.headless = false;
        }
        if let Some(url) = &self.webdriver_url {
            config.browser.webdriver_url = url.clone();
        }
        if let Some(ms) = self.render_delay_ms {
            config.browser.render_delay_ms = ms;
        }
    }
}
