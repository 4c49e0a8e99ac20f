use fhub_kernel::catalogue::{CatalogueFormat, parse_catalogue};
use fhub_kernel::domain::{CompositeInfo, DescriptorTable};
use fhub_kernel::{KernelError, ProbeSet};

fn catalogue() -> DescriptorTable {
    parse_catalogue(
        r#"{ "NODE": { "check": "node" }, "WEB": { "check": "web" }, "ANY": { "includes": ["NODE"] } }"#,
        CatalogueFormat::Json,
    )
    .unwrap()
}

#[test]
fn bind_attaches_registered_probes() {
    let mut table = catalogue();
    let probes = ProbeSet::new().with("node", || true).with("web", || false);
    assert_eq!(probes.len(), 2);

    assert_eq!(probes.bind(&mut table, true).unwrap(), 2);
    for (_, info) in table.iter_mut() {
        if let Some(probe) = info.probe_mut() {
            assert!(probe.is_bound());
        }
    }
}

#[test]
fn strict_binding_rejects_unknown_ids() {
    let mut table = catalogue();
    let probes = ProbeSet::new().with("node", || true);

    let err = probes.bind(&mut table, true).unwrap_err();
    let KernelError::UnknownProbe { id, feature, .. } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!((id.as_str(), feature.as_str()), ("web", "WEB"));
    assert_eq!(err.to_string(), r#"Unknown probe "web" for feature "WEB""#);
}

#[test]
fn lenient_binding_leaves_unknown_ids_unbound() {
    let mut table = catalogue();
    let probes = ProbeSet::new().with("node", || true);

    assert_eq!(probes.bind(&mut table, false).unwrap(), 1);
    let mut web = table.iter_mut().find(|(name, _)| *name == "WEB").unwrap().1.clone();
    let probe = web.probe_mut().unwrap();
    assert!(!probe.is_bound());
    assert!(!probe.evaluate());
}

#[test]
fn closures_are_untouched() {
    let mut table = DescriptorTable::new().with("INLINE", CompositeInfo::checked(|| true));
    assert_eq!(ProbeSet::new().bind(&mut table, true).unwrap(), 0);
}

#[test]
fn debug_lists_sorted_ids() {
    let probes = ProbeSet::new().with("web", || true).with("node", || true);
    assert!(probes.contains("node"));
    assert!(!ProbeSet::new().contains("node"));
    assert!(ProbeSet::new().is_empty());
    assert_eq!(format!("{probes:?}"), r#"ProbeSet { ids: ["node", "web"] }"#);
}
