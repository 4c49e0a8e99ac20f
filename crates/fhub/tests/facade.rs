use fhub::layers;
use fhub::prelude::*;

#[test]
fn registry_layer_is_always_enabled() {
    assert!(layers::is_enabled("registry"));
    assert!(!layers::is_enabled("database"));
    assert_eq!(layers::is_enabled("kernel"), cfg!(feature = "kernel"));
}

#[test]
fn prelude_builds_a_registry() {
    let table = DescriptorTable::new()
        .with("FILL", CompositeInfo::checked(|| true))
        .with("ALL", CompositeInfo::new().includes(["FILL"]));
    let registry = Registry::builder().table(table).build().unwrap();

    let all = registry.construct(["ALL"]).unwrap();
    assert_eq!(registry.canonical_names(&all), vec!["FILL"]);
    assert_eq!(all.mask().count(), 1);
}

#[cfg(feature = "kernel")]
#[test]
fn prelude_exposes_kernel() {
    let table = parse_catalogue(r#"{ "NODE": { "check": "node" } }"#, CatalogueFormat::Json).unwrap();
    let probes = ProbeSet::new().with("node", || true);
    let hub = bootstrap(&fhub::domain::config::RegistrySettings::default(), table, &probes).unwrap();
    assert_eq!(hub.registry.names().collect::<Vec<_>>(), vec!["NODE"]);
}
