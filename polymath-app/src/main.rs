use anyhow::Result;
use clap::Parser;
use polymath_common::observability::{LogConfig, init_logging};
use polymath_config::{PolymathConfig, PolymathConfigLoader, default_config_path};
use polymath_wiki::browser::FantocciniLauncher;
use polymath_wiki::{LookupOrchestrator, LookupSettings, SubjectRegistry};
use tokio::io::BufReader;
use tracing::info;

mod cli;
mod menu;

use cli::Cli;
use menu::InteractionLoop;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // 1) Load config: file < POLYMATH__* env < flags
    let config_path = args.config.clone().or_else(default_config_path);
    let mut loader = PolymathConfigLoader::new();
    if let Some(path) = &config_path {
        loader = loader.with_file(path);
    }
    let mut cfg: PolymathConfig = loader.load()?;
    args.apply(&mut cfg);

    let log_path = init_logging(LogConfig {
        app_name: "polymath".to_string(),
        log_dir: cfg.logging.dir.clone(),
        emit_stderr: cfg.logging.stderr,
        format: cfg.logging.format,
        default_filter: cfg.logging.filter.clone(),
    })?;
    info!(
        log = %log_path.display(),
        config = ?config_path,
        webdriver = %cfg.browser.webdriver_url,
        "polymath starting"
    );

    let registry = SubjectRegistry::from_specs(&cfg.subjects)?;
    let settings = LookupSettings::from_config(&cfg)?;
    let launcher = FantocciniLauncher::from_config(&cfg.browser);
    let orchestrator = LookupOrchestrator::new(launcher, settings)?;

    InteractionLoop::new(
        cfg.robot_name.clone(),
        registry,
        orchestrator,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .run()
    .await?;

    info!("polymath finished");
    Ok(())
}
