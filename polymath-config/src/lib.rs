//! Loader for workspace configuration with YAML + environment overlays.
//!
//! Sources are merged in this order, later ones winning:
//!
//! 1. built-in defaults (every field is optional),
//! 2. YAML files / inline snippets, in the order they were attached,
//! 3. `POLYMATH__`-prefixed environment variables (`__` separates nesting,
//!    e.g. `POLYMATH__BROWSER__HEADLESS=false`).
//!
//! String values may reference `${VAR}` placeholders; they are expanded
//! after merging, recursively up to [`MAXIMUM_ENV_EXPANSION_DEPTH`] hops.
use config::{Config, ConfigError, Environment, File};
use polymath_common::observability::LogFormat;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// File name searched for when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "polymath.yaml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolymathConfig {
    pub version: Option<String>,
    /// Name the assistant introduces itself with.
    pub robot_name: String,
    pub site: SiteConfig,
    pub browser: BrowserConfig,
    pub logging: LoggingConfig,
    pub subjects: Vec<SubjectSpec>,
}

impl Default for PolymathConfig {
    fn default() -> Self {
        Self {
            version: None,
            robot_name: "Quandrinaut".into(),
            site: SiteConfig::default(),
            browser: BrowserConfig::default(),
            logging: LoggingConfig::default(),
            subjects: default_subjects(),
        }
    }
}

/// Where to search and how the result page is recognised.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub url: String,
    pub search_input_id: String,
    pub search_form_id: String,
    pub infobox_selector: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "https://www.wikipedia.org/".into(),
            search_input_id: "searchInput".into(),
            search_form_id: "search-form".into(),
            infobox_selector: "table.infobox.biography.vcard".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub webdriver_url: String,
    pub headless: bool,
    /// Fixed pause after submitting the search.
    pub render_delay_ms: u64,
    /// Upper bound on the infobox readiness poll that follows the pause.
    pub ready_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".into(),
            headless: true,
            render_delay_ms: 2_000,
            ready_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: Option<PathBuf>,
    pub format: LogFormat,
    pub stderr: bool,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            format: LogFormat::Text,
            stderr: false,
            filter: "info".into(),
        }
    }
}

/// One selectable entry of the subject menu.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubjectSpec {
    pub id: u32,
    pub name: String,
}

pub fn default_subjects() -> Vec<SubjectSpec> {
    ["Albert Einstein", "Isaac Newton", "Marie Curie", "Charles Darwin"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| SubjectSpec {
            id,
            name: name.to_string(),
        })
        .collect()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => break,
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Locate the config file used when the CLI names none: `./polymath.yaml`,
/// then `<config dir>/polymath/polymath.yaml`.
pub fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("polymath").join(DEFAULT_CONFIG_FILE))
        .filter(|p| p.is_file())
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct PolymathConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for PolymathConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PolymathConfigLoader {
    /// Start from the built-in defaults.
    ///
    /// ```
    /// use polymath_config::PolymathConfigLoader;
    ///
    /// let config = PolymathConfigLoader::new().load().expect("defaults are valid");
    ///
    /// assert_eq!(config.robot_name, "Quandrinaut");
    /// assert_eq!(config.subjects.len(), 4);
    /// assert!(config.browser.headless);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file that must exist; the format is inferred
    /// from the suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is silently skipped when absent.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use polymath_config::PolymathConfigLoader;
    ///
    /// let cfg = PolymathConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "test"
    /// subjects:
    ///   - id: 7
    ///     name: "Ada Lovelace"
    /// browser:
    ///   headless: false
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.version.as_deref(), Some("test"));
    /// assert_eq!(cfg.subjects.len(), 1);
    /// assert_eq!(cfg.subjects[0].name, "Ada Lovelace");
    /// assert!(!cfg.browser.headless);
    /// assert_eq!(cfg.browser.render_delay_ms, 2_000);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Merge the attached sources with the environment and deserialize.
    ///
    /// ```
    /// use polymath_config::PolymathConfigLoader;
    ///
    /// unsafe { std::env::set_var("POLYMATH_DOC_DRIVER", "http://grid:4444"); }
    ///
    /// let config = PolymathConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// browser:
    ///   webdriver_url: "${POLYMATH_DOC_DRIVER}"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.browser.webdriver_url, "http://grid:4444");
    ///
    /// unsafe { std::env::remove_var("POLYMATH_DOC_DRIVER"); }
    /// ```
    pub fn load(self) -> Result<PolymathConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("POLYMATH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: PolymathConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        typed.validate()?;
        Ok(typed)
    }
}

impl PolymathConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.site.url.trim().is_empty() {
            return Err(ConfigError::Message("site.url must not be empty".into()));
        }
        if self.site.infobox_selector.trim().is_empty() {
            return Err(ConfigError::Message(
                "site.infobox_selector must not be empty".into(),
            ));
        }
        Ok(())
    }
}
