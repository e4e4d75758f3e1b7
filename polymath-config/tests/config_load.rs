use polymath_common::observability::LogFormat;
use polymath_config::PolymathConfigLoader;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

const FILE_YAML: &str = r#"
version: "0.1"
robot_name: Quandrinaut
site:
  url: https://en.wikipedia.org/
browser:
  headless: false
  render_delay_ms: 1500
logging:
  format: json
  stderr: true
subjects:
  - id: 1
    name: Albert Einstein
  - id: 2
    name: "${POLYMATH_TEST_SUBJECT}"
"#;

#[test]
#[serial]
fn test_config_load() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "polymath.yaml", FILE_YAML);

    let config = temp_env::with_var("POLYMATH_TEST_SUBJECT", Some("Rosalind Franklin"), || {
        PolymathConfigLoader::new()
            .with_file(&p)
            .load()
            .expect("load system config")
    });

    assert_eq!(config.version.as_deref(), Some("0.1"));
    assert_eq!(config.site.url, "https://en.wikipedia.org/");
    assert_eq!(config.site.search_input_id, "searchInput");
    assert!(!config.browser.headless);
    assert_eq!(config.browser.render_delay_ms, 1500);
    assert_eq!(config.browser.ready_timeout_ms, 10_000);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.logging.stderr);
    assert_eq!(config.subjects[1].name, "Rosalind Franklin");
}

#[test]
#[serial]
fn environment_overrides_file() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "polymath.yaml", FILE_YAML);

    let config = temp_env::with_vars(
        [
            ("POLYMATH__BROWSER__HEADLESS", Some("true")),
            ("POLYMATH__BROWSER__RENDER_DELAY_MS", Some("250")),
            ("POLYMATH_TEST_SUBJECT", Some("Lise Meitner")),
        ],
        || PolymathConfigLoader::new().with_file(&p).load(),
    )
    .expect("load with env overrides");

    assert!(config.browser.headless);
    assert_eq!(config.browser.render_delay_ms, 250);
}

#[test]
#[serial]
fn missing_optional_file_falls_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = PolymathConfigLoader::new()
        .with_optional_file(tmp.path().join("absent.yaml"))
        .load()
        .expect("defaults");

    assert_eq!(config.subjects.len(), 4);
    assert_eq!(config.site.infobox_selector, "table.infobox.biography.vcard");
}

#[test]
#[serial]
fn missing_required_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let result = PolymathConfigLoader::new()
        .with_file(tmp.path().join("absent.yaml"))
        .load();
    assert!(result.is_err());
}
