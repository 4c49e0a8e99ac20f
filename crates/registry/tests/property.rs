use fhub_domain::{CompositeInfo, DescriptorTable, FeatureInfo};
use fhub_registry::prelude::*;
use proptest::prelude::*;

/// Descriptor shapes; references only point at earlier entries so every table is acyclic.
#[derive(Debug, Clone)]
enum Shape {
    Checked { includes: Vec<usize>, excludes: Option<Vec<usize>> },
    Group { includes: Vec<usize>, excludes: Option<Vec<usize>> },
    Alias(usize),
    Inherit { base: usize, diff: Vec<(usize, bool)> },
}

fn name(index: usize) -> String {
    format!("F{index}")
}

fn refs(index: usize) -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(0..index, 0..3)
}

fn diff(index: usize) -> impl Strategy<Value = Vec<(usize, bool)>> {
    proptest::collection::vec((0..index, any::<bool>()), 0..4)
}

fn shape(index: usize) -> BoxedStrategy<Shape> {
    if index == 0 {
        return Just(Shape::Checked { includes: vec![], excludes: None }).boxed();
    }
    prop_oneof![
        3 => (refs(index), proptest::option::of(refs(index)))
            .prop_map(|(includes, excludes)| Shape::Checked { includes, excludes }),
        2 => (refs(index), proptest::option::of(refs(index)))
            .prop_map(|(includes, excludes)| Shape::Group { includes, excludes }),
        1 => (0..index).prop_map(Shape::Alias),
        2 => (0..index, diff(index)).prop_map(|(base, diff)| Shape::Inherit { base, diff }),
    ]
    .boxed()
}

fn shapes() -> impl Strategy<Value = Vec<Shape>> {
    (1usize..12).prop_flat_map(|count| (0..count).map(shape).collect::<Vec<_>>())
}

fn shapes_and_picks() -> impl Strategy<Value = (Vec<Shape>, Vec<usize>, Vec<usize>)> {
    shapes().prop_flat_map(|shapes| {
        let count = shapes.len();
        let picks = proptest::collection::vec(0..count, 0..4);
        (Just(shapes), picks.clone(), picks)
    })
}

fn composite(check: bool, includes: &[usize], excludes: Option<&Vec<usize>>) -> CompositeInfo {
    let mut info = if check { CompositeInfo::checked(|| true) } else { CompositeInfo::new() };
    info = info.includes(includes.iter().copied().map(name));
    if let Some(excludes) = excludes {
        info = info.excludes(excludes.iter().copied().map(name));
    }
    info
}

fn build(shapes: &[Shape]) -> Registry {
    let table: DescriptorTable = shapes
        .iter()
        .enumerate()
        .map(|(index, shape)| {
            let info: FeatureInfo = match shape {
                Shape::Checked { includes, excludes } => composite(true, includes, excludes.as_ref()).into(),
                Shape::Group { includes, excludes } => composite(false, includes, excludes.as_ref()).into(),
                Shape::Alias(target) => FeatureInfo::alias(name(*target)),
                Shape::Inherit { base, diff } => CompositeInfo::new()
                    .inherits(name(*base))
                    .include_diff(diff.iter().map(|&(member, add)| (name(member), add)))
                    .into(),
            };
            (name(index), info)
        })
        .collect();
    Registry::builder().table(table).build().expect("acyclic tables always build")
}

fn names(picks: &[usize]) -> Vec<String> {
    picks.iter().copied().map(name).collect()
}

proptest! {
    #[test]
    fn canonical_names_round_trip((shapes, picks, _) in shapes_and_picks()) {
        let registry = build(&shapes);
        let picked = names(&picks);
        let value = registry.construct(picked.iter().map(String::as_str));
        prop_assume!(value.is_ok());
        let value = value.unwrap();
        prop_assume!(registry.is_mask_compatible(value.mask()));

        let canonical = registry.canonical_names(&value);
        let rebuilt = registry.construct(canonical.iter().copied()).unwrap();
        prop_assert_eq!(rebuilt.mask(), value.mask());

        let mut sorted = canonical.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, canonical);
    }

    #[test]
    fn intersection_of_compatible_values_is_compatible((shapes, left, right) in shapes_and_picks()) {
        let registry = build(&shapes);
        let left = registry.construct(names(&left).iter().map(String::as_str));
        let right = registry.construct(names(&right).iter().map(String::as_str));
        prop_assume!(left.is_ok() && right.is_ok());
        let (left, right) = (left.unwrap(), right.unwrap());
        prop_assume!(registry.is_mask_compatible(left.mask()) && registry.is_mask_compatible(right.mask()));

        let common = registry.common_of([&left, &right]).unwrap().unwrap();
        prop_assert!(registry.is_mask_compatible(common.mask()));
        prop_assert!(registry.includes(&left, [&common]).unwrap());
        prop_assert!(registry.includes(&right, [&common]).unwrap());
    }

    #[test]
    fn union_includes_each_part((shapes, picks, _) in shapes_and_picks()) {
        let registry = build(&shapes);
        let picked = names(&picks);
        let value = registry.construct(picked.iter().map(String::as_str));
        prop_assume!(value.is_ok());
        let value = value.unwrap();

        prop_assert!(registry.includes(&value, [&value]).unwrap());
        for part in &picked {
            prop_assert!(registry.includes(&value, [part.as_str()]).unwrap());
        }
    }

    #[test]
    fn aliases_are_transparent(shapes in shapes()) {
        let registry = build(&shapes);
        for (index, shape) in shapes.iter().enumerate() {
            if let Shape::Alias(target) = shape {
                let (alias, target) = (name(index), name(*target));
                prop_assert!(registry.are_equal([alias.as_str(), target.as_str()]).unwrap());
                let alias_value = registry.feature(&alias).unwrap();
                let target_value = registry.feature(&target).unwrap();
                prop_assert_eq!(
                    registry.canonical_names(&alias_value),
                    registry.canonical_names(&target_value)
                );
            }
        }
    }

    #[test]
    fn removal_diffs_shrink_the_base(shapes in shapes()) {
        let registry = build(&shapes);
        for (index, shape) in shapes.iter().enumerate() {
            let Shape::Inherit { base, diff } = shape else {
                continue;
            };
            if diff.iter().any(|&(_, add)| add) {
                continue;
            }
            let derived = registry.feature(&name(index)).unwrap();
            let base = registry.feature(&name(*base)).unwrap();
            prop_assert!(registry.includes(&base, [&derived]).unwrap());
        }
    }

    #[test]
    fn restoring_diffs_include_the_members(shapes in shapes()) {
        let registry = build(&shapes);
        for (index, shape) in shapes.iter().enumerate() {
            let Shape::Inherit { diff, .. } = shape else {
                continue;
            };
            let derived = registry.feature(&name(index)).unwrap();
            for &(member, _) in diff {
                let last = diff.iter().rev().find(|&&(other, _)| other == member).map(|&(_, add)| add);
                if last == Some(true) {
                    prop_assert!(registry.includes(&derived, [name(member).as_str()]).unwrap());
                }
            }
        }
    }

    #[test]
    fn excluded_pairs_never_combine(shapes in shapes()) {
        let registry = build(&shapes);
        for (index, shape) in shapes.iter().enumerate() {
            let (Shape::Checked { excludes: Some(excludes), .. } | Shape::Group { excludes: Some(excludes), .. }) = shape else {
                continue;
            };
            for excluded in excludes {
                let pair = [name(index), name(*excluded)];
                prop_assert!(!registry.are_compatible(pair.iter()));
                let constructed = registry.construct(pair.iter());
                prop_assert!(
                    matches!(constructed, Err(FeatureError::IncompatibleFeatures { .. })),
                    "expected incompatible features"
                );
            }
        }
    }
}
