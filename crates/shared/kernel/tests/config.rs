use fhub_kernel::config::{ConfigError, load_config, load_hub_config};
use std::fs;
use tempfile::tempdir;

#[test]
fn hub_config_reads_sections_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fhub.toml");
    fs::write(
        &path,
        r#"
[logger]
name = "embedded"
level = "debug"

[registry]
detect = true
"#,
    )
    .unwrap();

    let config = load_hub_config(Some(&path)).unwrap();
    assert_eq!(config.logger.name, "embedded");
    assert_eq!(config.logger.level, "debug");
    assert!(config.logger.console);
    assert!(config.registry.detect);
    assert!(config.registry.strict_probes);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let err = load_hub_config(Some(dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Config { .. }));
}

#[test]
fn load_config_deserializes_custom_types() {
    #[derive(serde::Deserialize)]
    struct Catalogues {
        paths: Vec<String>,
    }

    let dir = tempdir().unwrap();
    let path = dir.path().join("catalogues.json");
    fs::write(&path, r#"{ "paths": ["core.toml", "web.json"] }"#).unwrap();

    let config: Catalogues = load_config(Some(&path)).unwrap();
    assert_eq!(config.paths, vec!["core.toml", "web.json"]);
}
