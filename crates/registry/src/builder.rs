use crate::error::FeatureError;
use crate::feature::{AttributeMap, Feature, PredefinedFeature};
use crate::registry::{FeatureMap, Registry, RegistryInner};
use fhub_domain::{CompositeInfo, DescriptorTable, FeatureInfo, FeatureTraits, IncludeSpec};
use fhub_mask::{Mask, MaskSet};
use fxhash::{FxHashMap, FxHashSet};
use private::Sealed;
use std::sync::Arc;
use tracing::{debug, info, trace};

#[derive(Debug, Default)]
pub struct NoTable;
#[derive(Debug)]
pub struct WithTable(DescriptorTable);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoTable {}
impl Sealed for WithTable {}

/// A builder for a frozen [`Registry`].
///
/// A descriptor table is mandatory before [`RegistryBuilder::build`] becomes available.
#[derive(Debug, Default)]
pub struct RegistryBuilder<T: Sealed = NoTable> {
    table: T,
}

impl RegistryBuilder<NoTable> {
    /// Sets the descriptor table the registry is resolved from.
    #[must_use = "The builder must be built to produce a registry."]
    pub fn table(self, table: DescriptorTable) -> RegistryBuilder<WithTable> {
        RegistryBuilder { table: WithTable(table) }
    }
}

impl RegistryBuilder<WithTable> {
    /// Resolves every descriptor and freezes the result.
    ///
    /// Features are resolved depth-first in table order; bits are allocated in the order
    /// probes are first reached.
    ///
    /// # Errors
    /// * [`FeatureError::UnknownFeature`] if a descriptor names an undeclared feature.
    /// * [`FeatureError::CyclicDefinition`] if a feature depends on itself.
    pub fn build(self) -> Result<Registry, FeatureError> {
        let WithTable(table) = self.table;
        let mut resolver = Resolver::new(&table);

        for name in table.names() {
            resolver.resolve(name)?;
        }

        let incompatible = resolver.exclusions()?;
        let Resolver { mut all, descriptions, pristine, allocated, .. } = resolver;
        let all: FeatureMap =
            table.names().filter_map(|name| all.remove_entry(name)).collect();

        let mut elementary = pristine.clone();
        elementary.sort_by(|a, b| a.name.cmp(&b.name));

        info!(
            features = table.len(),
            elementary = elementary.len(),
            incompatible = incompatible.len(),
            bits = allocated.count(),
            "Feature registry built"
        );

        Ok(Registry {
            inner: Arc::new(RegistryInner {
                all,
                descriptions,
                elementary,
                pristine,
                incompatible,
            }),
        })
    }
}

struct Resolver<'t> {
    table: &'t DescriptorTable,
    all: FxHashMap<String, Arc<PredefinedFeature>>,
    descriptions: FxHashMap<String, Option<String>>,
    include_sets: FxHashMap<String, Vec<String>>,
    resolving: FxHashSet<String>,
    pristine: Vec<Arc<PredefinedFeature>>,
    allocated: Mask,
}

impl<'t> Resolver<'t> {
    fn new(table: &'t DescriptorTable) -> Self {
        Self {
            table,
            all: FxHashMap::default(),
            descriptions: FxHashMap::default(),
            include_sets: FxHashMap::default(),
            resolving: FxHashSet::default(),
            pristine: Vec::new(),
            allocated: Mask::new(),
        }
    }

    fn resolve(&mut self, name: &str) -> Result<Mask, FeatureError> {
        if let Some(feature) = self.all.get(name) {
            return Ok(feature.mask().clone());
        }

        let table = self.table;
        let info = table.get(name).ok_or_else(|| FeatureError::unknown(name))?;
        if !self.resolving.insert(name.to_owned()) {
            return Err(FeatureError::CyclicDefinition { name: name.to_owned(), context: None });
        }

        let mut description = info.own_description();
        let entry = match info {
            FeatureInfo::Alias(alias) => {
                trace!(feature = name, target = %alias.alias_for, "Resolving alias");
                self.resolve(&alias.alias_for)?;
                if description.is_none() {
                    description = self.descriptions.get(&alias.alias_for).cloned().flatten();
                }
                self.entry(&alias.alias_for)?
            },
            FeatureInfo::Composite(composite) => self.composite(name, composite)?,
        };

        self.resolving.remove(name);
        let mask = entry.mask().clone();
        debug!(feature = name, mask = %mask, elementary = entry.is_elementary(), "Resolved feature");

        self.all.insert(name.to_owned(), entry);
        self.descriptions.insert(name.to_owned(), description);
        Ok(mask)
    }

    fn composite(
        &mut self,
        name: &str,
        info: &CompositeInfo,
    ) -> Result<Arc<PredefinedFeature>, FeatureError> {
        if let Some(base) = &info.inherits {
            self.resolve(base)?;
        }

        let mut traits = FeatureTraits::empty();
        let mut mask = Mask::new();
        if info.check.is_some() {
            mask = Mask::next(&self.allocated);
            self.allocated |= &mask;
            traits |= FeatureTraits::ELEMENTARY | FeatureTraits::CHECK;
        }
        if info.excludes.is_some() {
            traits |= FeatureTraits::ELEMENTARY;
        }

        let include_set = self.include_set(info);
        for include in &include_set {
            mask |= &self.resolve(include)?;
        }
        self.include_sets.insert(name.to_owned(), include_set);

        let feature = Arc::new(PredefinedFeature {
            name: name.to_owned(),
            feature: Feature::from_mask_unchecked(mask),
            attributes: self.attributes(info)?,
            engine: info.engine.clone(),
            check: info.check.clone(),
            traits,
        });

        if feature.is_elementary() {
            self.pristine.push(Arc::clone(&feature));
        }
        Ok(feature)
    }

    /// Effective include-set, in insertion order without duplicates.
    fn include_set(&self, info: &CompositeInfo) -> Vec<String> {
        fn add(set: &mut Vec<String>, name: &str) {
            if !set.iter().any(|existing| existing == name) {
                set.push(name.to_owned());
            }
        }

        let mut set = Vec::new();
        if let Some(IncludeSpec::List(names)) = &info.includes {
            for name in names {
                add(&mut set, name);
            }
            return set;
        }

        if let Some(inherited) = info.inherits.as_ref().and_then(|base| self.include_sets.get(base)) {
            set.clone_from(inherited);
        }
        if let Some(IncludeSpec::Diff(diff)) = &info.includes {
            for (name, included) in diff {
                if *included {
                    add(&mut set, name);
                } else {
                    set.retain(|existing| existing != name);
                }
            }
        }
        set
    }

    fn attributes(&self, info: &CompositeInfo) -> Result<AttributeMap, FeatureError> {
        let mut attributes = match &info.inherits {
            Some(base) => self.entry(base)?.attributes.clone(),
            None => AttributeMap::new(),
        };
        for (name, value) in info.attributes.iter().flatten() {
            match value.resolve() {
                Some(value) => attributes.insert(name.clone(), value),
                None => attributes.remove(name),
            };
        }
        Ok(attributes)
    }

    fn entry(&self, name: &str) -> Result<Arc<PredefinedFeature>, FeatureError> {
        self.all.get(name).cloned().ok_or_else(|| FeatureError::unknown(name))
    }

    /// Forbidden "both present" masks, deduplicated, in table order.
    fn exclusions(&mut self) -> Result<Vec<Mask>, FeatureError> {
        let table = self.table;
        let mut seen = MaskSet::new();
        let mut incompatible = Vec::new();

        for (name, info) in table.iter() {
            let FeatureInfo::Composite(CompositeInfo { excludes: Some(excludes), .. }) = info else {
                continue;
            };
            let mask = self.resolve(name)?;
            for exclude in excludes {
                let pair = mask.union(&self.resolve(exclude)?);
                if seen.add(pair.clone()) {
                    trace!(feature = name, exclude = %exclude, mask = %pair, "Registered exclusion");
                    incompatible.push(pair);
                }
            }
        }
        Ok(incompatible)
    }
}
