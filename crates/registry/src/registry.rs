use crate::builder::RegistryBuilder;
use crate::element::{FeatureElement, FeatureRef};
use crate::error::FeatureError;
use crate::feature::{Feature, PredefinedFeature};
use fhub_domain::DescriptorTable;
use fhub_mask::Mask;
use fxhash::{FxBuildHasher, FxHashMap};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Predefined entries keyed by registered name, in declaration order.
pub(crate) type FeatureMap = IndexMap<String, Arc<PredefinedFeature>, FxBuildHasher>;

#[derive(Debug)]
pub(crate) struct RegistryInner {
    pub(crate) all: FeatureMap,
    pub(crate) descriptions: FxHashMap<String, Option<String>>,
    pub(crate) elementary: Vec<Arc<PredefinedFeature>>,
    pub(crate) pristine: Vec<Arc<PredefinedFeature>>,
    pub(crate) incompatible: Vec<Mask>,
}

/// A frozen feature registry.
///
/// The registry owns every predefined feature and the list of forbidden combinations. It is
/// built once from a [`DescriptorTable`] and is read-only afterwards; clones share the same
/// state and can be handed to other threads.
///
/// ### Operands
/// Operations taking `elements` accept anything convertible into a [`FeatureElement`]: a
/// feature name, a [`Feature`] value, a predefined entry, or an array/`Vec` of those forming
/// a group. Groups with more than one member are checked for compatibility on their own.
///
/// ### Example
/// ```rust
/// use fhub_domain::{CompositeInfo, DescriptorTable};
/// use fhub_registry::{FeatureError, Registry};
///
/// # fn main() -> Result<(), FeatureError> {
/// let registry = Registry::builder()
///     .table(
///         DescriptorTable::new()
///             .with("NODE", CompositeInfo::checked(|| true))
///             .with("BROWSER", CompositeInfo::checked(|| false).excludes(["NODE"]))
///             .with("SERVER", CompositeInfo::new().includes(["NODE"])),
///     )
///     .build()?;
///
/// let server = registry.construct(["SERVER"])?;
/// assert_eq!(registry.canonical_names(&server), vec!["NODE"]);
/// assert!(registry.construct(["NODE", "BROWSER"]).is_err());
/// assert!(!registry.are_compatible(["NODE", "BROWSER"]));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    pub(crate) inner: Arc<RegistryInner>,
}

impl Registry {
    /// Returns a new [`RegistryBuilder`].
    #[must_use = "The builder must be given a table and built."]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Returns the predefined entry registered under `name`.
    ///
    /// # Errors
    /// [`FeatureError::UnknownFeature`] if no such feature exists.
    pub fn get(&self, name: &str) -> Result<&Arc<PredefinedFeature>, FeatureError> {
        self.inner.all.get(name).ok_or_else(|| FeatureError::unknown(name))
    }

    /// Names of all predefined features (aliases included) in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.all.keys().map(String::as_str)
    }

    /// Predefined entries in declaration order, paired with the name they are registered under.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<PredefinedFeature>)> {
        self.inner.all.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Elementary features sorted by name.
    #[must_use]
    pub fn elementary(&self) -> &[Arc<PredefinedFeature>] {
        &self.inner.elementary
    }

    /// Forbidden "both present" masks.
    #[must_use]
    pub fn incompatible_masks(&self) -> &[Mask] {
        &self.inner.incompatible
    }

    /// Combines `elements` into one feature value.
    ///
    /// The union is checked for compatibility when more than one element is given, or when
    /// any group has more than one member.
    ///
    /// # Errors
    /// * [`FeatureError::UnknownFeature`] for an undeclared name.
    /// * [`FeatureError::IncompatibleFeatures`] if the union contains a forbidden pair.
    pub fn construct<'a, I, E>(&self, elements: I) -> Result<Feature, FeatureError>
    where
        I: IntoIterator<Item = E>,
        E: Into<FeatureElement<'a>>,
    {
        let mut mask = Mask::new();
        let mut validate = false;
        let mut count = 0usize;

        for element in elements {
            match element.into() {
                FeatureElement::One(feature) => mask |= self.ref_mask(feature)?,
                FeatureElement::Group(group) => {
                    mask |= &self.group_mask(&group)?;
                    validate |= group.len() > 1;
                },
            }
            count += 1;
        }

        if validate || count > 1 {
            self.validate(&mask)?;
        }
        Ok(Feature::from_mask_unchecked(mask))
    }

    /// Returns the value of the predefined feature `name`.
    ///
    /// # Errors
    /// [`FeatureError::UnknownFeature`] if no such feature exists.
    pub fn feature(&self, name: &str) -> Result<Feature, FeatureError> {
        self.get(name).map(|entry| entry.feature().clone())
    }

    /// Returns `true` if `features` may be present together.
    ///
    /// Never fails: an undeclared name makes the answer `false`.
    pub fn are_compatible<'a, I, R>(&self, features: I) -> bool
    where
        I: IntoIterator<Item = R>,
        R: Into<FeatureRef<'a>>,
    {
        let mut mask = Mask::new();
        for feature in features {
            match self.ref_mask(feature.into()) {
                Ok(other) => mask |= other,
                Err(err) => {
                    debug!(error = %err, "Compatibility check on unknown feature");
                    return false;
                },
            }
        }
        self.is_mask_compatible(&mask)
    }

    /// Returns `true` if all elements denote the same feature; trivially `true` for fewer than
    /// two elements. Stops at the first mismatch.
    ///
    /// # Errors
    /// [`FeatureError::UnknownFeature`] or [`FeatureError::IncompatibleFeatures`] from resolving
    /// an element examined before the first mismatch.
    pub fn are_equal<'a, I, E>(&self, elements: I) -> Result<bool, FeatureError>
    where
        I: IntoIterator<Item = E>,
        E: Into<FeatureElement<'a>>,
    {
        let mut masks = elements.into_iter().map(|element| self.element_mask(&element.into()));
        let Some(first) = masks.next().transpose()? else {
            return Ok(true);
        };
        for mask in masks {
            if mask? != first {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Intersects the elements; `None` when no element is given.
    ///
    /// # Errors
    /// [`FeatureError::UnknownFeature`] or [`FeatureError::IncompatibleFeatures`] from resolving
    /// any element.
    pub fn common_of<'a, I, E>(&self, elements: I) -> Result<Option<Feature>, FeatureError>
    where
        I: IntoIterator<Item = E>,
        E: Into<FeatureElement<'a>>,
    {
        let mut common: Option<Mask> = None;
        for element in elements {
            let mask = self.element_mask(&element.into())?;
            common = Some(match common {
                Some(common) => common.intersection(&mask),
                None => mask,
            });
        }
        Ok(common.map(Feature::from_mask_unchecked))
    }

    /// Wraps `mask` into a value if it is compatible.
    #[must_use]
    pub fn from_mask(&self, mask: Mask) -> Option<Feature> {
        self.is_mask_compatible(&mask).then(|| Feature::from_mask_unchecked(mask))
    }

    /// Resolves one element with group validation; the empty mask when `element` is `None`.
    ///
    /// # Errors
    /// [`FeatureError::UnknownFeature`] or [`FeatureError::IncompatibleFeatures`].
    pub fn valid_feature_mask<'a, E>(&self, element: Option<E>) -> Result<Mask, FeatureError>
    where
        E: Into<FeatureElement<'a>>,
    {
        element.map_or_else(|| Ok(Mask::new()), |element| self.element_mask(&element.into()))
    }

    /// Returns `true` if no forbidden pair is contained in `mask`.
    #[must_use]
    pub fn is_mask_compatible(&self, mask: &Mask) -> bool {
        !self.inner.incompatible.iter().any(|forbidden| mask.includes(forbidden))
    }

    /// Returns the description of `name`, which may be absent.
    ///
    /// # Errors
    /// [`FeatureError::UnknownFeature`] if no such feature exists.
    pub fn description_for(&self, name: &str) -> Result<Option<&str>, FeatureError> {
        self.inner
            .descriptions
            .get(name)
            .map(Option::as_deref)
            .ok_or_else(|| FeatureError::unknown(name))
    }

    /// Returns `true` if `feature` includes every element. Stops at the first element not
    /// included.
    ///
    /// # Errors
    /// [`FeatureError::UnknownFeature`] or [`FeatureError::IncompatibleFeatures`] from resolving
    /// an examined element.
    pub fn includes<'a, I, E>(&self, feature: &Feature, elements: I) -> Result<bool, FeatureError>
    where
        I: IntoIterator<Item = E>,
        E: Into<FeatureElement<'a>>,
    {
        for element in elements {
            if !feature.mask().includes(&self.element_mask(&element.into())?) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// The smallest set of elementary feature names whose union is `feature`, sorted.
    ///
    /// Elementary features are tried from the most recently resolved one backwards; one is
    /// chosen when it is included in `feature` and adds bits not yet covered.
    #[must_use]
    pub fn canonical_names(&self, feature: &Feature) -> Vec<&str> {
        let mask = feature.mask();
        let mut covered = Mask::new();
        let mut names = Vec::new();

        for entry in self.inner.pristine.iter().rev() {
            let entry_mask = entry.mask();
            if mask.includes(entry_mask) && !covered.includes(entry_mask) {
                covered |= entry_mask;
                names.push(entry.name());
            }
        }
        names.sort_unstable();
        names
    }

    /// Names of every elementary feature included in `feature`, sorted.
    #[must_use]
    pub fn elementary_names(&self, feature: &Feature) -> Vec<&str> {
        self.inner
            .elementary
            .iter()
            .filter(|entry| feature.mask().includes(entry.mask()))
            .map(|entry| entry.name())
            .collect()
    }

    /// Runs every probe and returns the combination of the features reporting `true`.
    ///
    /// Returns `None` if the probes report a forbidden combination.
    #[must_use]
    pub fn detect(&self) -> Option<Feature> {
        let mut mask = Mask::new();
        for entry in self.inner.pristine.iter().filter(|entry| entry.check().is_some()) {
            let available = entry.probe();
            debug!(feature = entry.name(), available, "Probed feature");
            if available {
                mask |= entry.mask();
            }
        }

        let detected = self.from_mask(mask);
        if detected.is_none() {
            warn!("Probes reported an incompatible feature combination");
        }
        detected
    }

    fn ref_mask<'s>(&'s self, feature: FeatureRef<'s>) -> Result<&'s Mask, FeatureError> {
        match feature {
            FeatureRef::Name(name) => self.get(name).map(|entry| entry.mask()),
            FeatureRef::Value(value) => Ok(value.mask()),
        }
    }

    fn group_mask(&self, group: &[FeatureRef<'_>]) -> Result<Mask, FeatureError> {
        let mut mask = Mask::new();
        for feature in group {
            mask |= self.ref_mask(*feature)?;
        }
        Ok(mask)
    }

    fn element_mask(&self, element: &FeatureElement<'_>) -> Result<Mask, FeatureError> {
        match element {
            FeatureElement::One(feature) => self.ref_mask(*feature).cloned(),
            FeatureElement::Group(group) => {
                let mask = self.group_mask(group)?;
                if group.len() > 1 {
                    self.validate(&mask)?;
                }
                Ok(mask)
            },
        }
    }

    fn validate(&self, mask: &Mask) -> Result<(), FeatureError> {
        if self.is_mask_compatible(mask) { Ok(()) } else { Err(FeatureError::incompatible()) }
    }
}

impl TryFrom<DescriptorTable> for Registry {
    type Error = FeatureError;

    fn try_from(table: DescriptorTable) -> Result<Self, Self::Error> {
        Self::builder().table(table).build()
    }
}
