use fhub_domain::{AttributeValue, DescriptorTable, FeatureInfo, IncludeSpec};
use serde_json::json;

fn composite(table: &DescriptorTable, name: &str) -> fhub_domain::CompositeInfo {
    match table.get(name) {
        Some(FeatureInfo::Composite(info)) => info.clone(),
        other => panic!("expected composite descriptor for {name}, got {other:?}"),
    }
}

#[test]
fn json_table_keeps_document_order() {
    let raw = r#"{
        "ZETA": { "check": "zeta" },
        "ALPHA": { "check": "alpha", "excludes": ["ZETA"] },
        "MID": { "includes": ["ALPHA"] },
        "ALIAS": { "aliasFor": "MID", "description": "Another name" }
    }"#;

    let table: DescriptorTable = serde_json::from_str(raw).expect("table deserialize");
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["ZETA", "ALPHA", "MID", "ALIAS"]);

    let alpha = composite(&table, "ALPHA");
    assert_eq!(alpha.check.as_ref().and_then(|probe| probe.id()), Some("alpha"));
    assert_eq!(alpha.excludes, Some(vec!["ZETA".to_owned()]));

    match table.get("ALIAS") {
        Some(FeatureInfo::Alias(info)) => {
            assert_eq!(info.alias_for, "MID");
            assert_eq!(info.description.as_deref(), Some("Another name"));
        },
        other => panic!("expected alias, got {other:?}"),
    }
}

#[test]
fn include_diff_keeps_declaration_order() {
    let table: DescriptorTable = serde_json::from_value(json!({
        "BASE": { "includes": ["B", "A"] },
        "DERIVED": { "inherits": "BASE", "includes": { "B": false, "C": true, "A": false } }
    }))
    .expect("table deserialize");

    let derived = composite(&table, "DERIVED");
    assert_eq!(
        derived.includes,
        Some(IncludeSpec::Diff(vec![
            ("B".to_owned(), false),
            ("C".to_owned(), true),
            ("A".to_owned(), false),
        ]))
    );
    assert_eq!(composite(&table, "BASE").includes, Some(IncludeSpec::List(vec!["B".into(), "A".into()])));
}

#[test]
fn attribute_values_follow_overlay_rules() {
    let table: DescriptorTable = serde_json::from_value(json!({
        "F": { "attributes": { "text": "value", "nil": null, "gone": false, "other": 42 } }
    }))
    .expect("table deserialize");

    let attributes = composite(&table, "F").attributes.expect("attributes");
    assert_eq!(attributes["text"], AttributeValue::text("value"));
    assert_eq!(attributes["nil"], AttributeValue::Null);
    assert_eq!(attributes["gone"], AttributeValue::Absent);
    assert_eq!(attributes["other"], AttributeValue::Null);
}

#[test]
fn empty_excludes_is_distinct_from_absent() {
    let table: DescriptorTable = serde_json::from_value(json!({
        "DECLARED": { "excludes": [] },
        "PLAIN": {}
    }))
    .expect("table deserialize");

    assert_eq!(composite(&table, "DECLARED").excludes, Some(vec![]));
    assert_eq!(composite(&table, "PLAIN").excludes, None);
}

#[test]
fn unknown_descriptor_keys_are_rejected() {
    let result = serde_json::from_value::<DescriptorTable>(json!({ "F": { "checks": "typo" } }));
    assert!(result.is_err());

    let mixed = serde_json::from_value::<DescriptorTable>(json!({ "F": { "aliasFor": "A", "check": "x" } }));
    assert!(mixed.is_err());
}

#[test]
fn toml_table_deserializes_in_order() {
    let raw = r#"
        [NODE]
        check = "node"
        attributes = { "web-worker" = "node-only" }

        [BROWSER]
        check = "browser"
        excludes = ["NODE"]

        [NODE_20]
        engine = "Node.js 20"
        includes = ["NODE"]

        [SERVER]
        alias_for = "NODE_20"
    "#;

    let table: DescriptorTable = toml::from_str(raw).expect("toml deserialize");
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["NODE", "BROWSER", "NODE_20", "SERVER"]);
    assert_eq!(
        table.get("NODE_20").and_then(FeatureInfo::own_description).as_deref(),
        Some("Features available in Node.js 20.")
    );
    assert!(matches!(table.get("SERVER"), Some(FeatureInfo::Alias(_))));
}

#[test]
fn value_table_keeps_document_order() {
    let value = json!({
        "ZETA": { "check": "zeta" },
        "ALPHA": { "check": "alpha" },
        "MID": { "includes": { "ZETA": true, "ALPHA": true } }
    });

    let table: DescriptorTable = serde_json::from_value(value).expect("table deserialize");
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["ZETA", "ALPHA", "MID"]);
    assert_eq!(
        composite(&table, "MID").includes,
        Some(IncludeSpec::Diff(vec![("ZETA".to_owned(), true), ("ALPHA".to_owned(), true)]))
    );
}
