use fhub_kernel::KernelError;
use fhub_kernel::domain::FeatureInfo;
use fhub_kernel::catalogue::{CatalogueFormat, parse_catalogue, read_catalogue};
use std::fs;
use tempfile::tempdir;

const JSON: &str = r#"{
    "NODE": { "check": "node", "engine": "Node.js" },
    "FILL": { "check": "fill", "attributes": { "since": "ES2015" } },
    "SERVER": { "includes": ["NODE", "FILL"] },
    "LEGACY": { "aliasFor": "SERVER" }
}"#;

const TOML: &str = r#"
[NODE]
check = "node"

[FILL]
check = "fill"
excludes = ["NODE"]

[SERVER]
includes = { NODE = true }
"#;

#[test]
fn json_catalogue_keeps_document_order() {
    let table = parse_catalogue(JSON, CatalogueFormat::Json).unwrap();
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["NODE", "FILL", "SERVER", "LEGACY"]);
    let Some(FeatureInfo::Alias(alias)) = table.get("LEGACY") else {
        panic!("LEGACY should be an alias");
    };
    assert_eq!(alias.alias_for, "SERVER");
}

#[test]
fn toml_catalogue_keeps_document_order() {
    let table = parse_catalogue(TOML, CatalogueFormat::Toml).unwrap();
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["NODE", "FILL", "SERVER"]);
}

#[test]
fn malformed_catalogues_are_reported() {
    let err = parse_catalogue("{ not json", CatalogueFormat::Json).unwrap_err();
    assert!(matches!(err, KernelError::Json { .. }));

    let err = parse_catalogue("[NODE]\nunknown = 1", CatalogueFormat::Toml).unwrap_err();
    assert!(matches!(err, KernelError::Toml { .. }));
}

#[test]
fn read_catalogue_picks_format_from_extension() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("features.json");
    let toml = dir.path().join("features.toml");
    fs::write(&json, JSON).unwrap();
    fs::write(&toml, TOML).unwrap();

    assert_eq!(read_catalogue(&json).unwrap().len(), 4);
    assert_eq!(read_catalogue(&toml).unwrap().len(), 3);
}

#[test]
fn read_catalogue_errors() {
    let dir = tempdir().unwrap();

    let yaml = dir.path().join("features.yaml");
    fs::write(&yaml, "NODE: {}").unwrap();
    assert!(matches!(read_catalogue(&yaml).unwrap_err(), KernelError::UnsupportedFormat { .. }));

    let missing = dir.path().join("missing.json");
    let err = read_catalogue(&missing).unwrap_err();
    assert!(matches!(err, KernelError::Io { .. }));
    assert!(err.to_string().contains("missing.json"));
}
