use fhub_domain::{FeatureTraits, Probe};
use fhub_mask::Mask;
use std::collections::BTreeMap;
use std::ops::Deref;

/// A feature value: a set of capabilities identified by its mask.
///
/// Values carry no name; two values with equal masks are interchangeable. Everything else
/// (canonical names, inclusion, formatting) is answered by the [`Registry`](crate::Registry)
/// that produced the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Feature {
    mask: Mask,
}

impl Feature {
    pub(crate) const fn from_mask_unchecked(mask: Mask) -> Self {
        Self { mask }
    }

    #[must_use]
    pub const fn mask(&self) -> &Mask {
        &self.mask
    }

    #[must_use]
    pub fn into_mask(self) -> Mask {
        self.mask
    }
}

impl AsRef<Mask> for Feature {
    fn as_ref(&self) -> &Mask {
        &self.mask
    }
}

/// Attribute map of a predefined feature; `None` stands for a null value.
pub type AttributeMap = BTreeMap<String, Option<String>>;

/// A named registry entry.
///
/// Aliases do not get entries of their own: looking up an alias yields the entry of the
/// feature it names, including that feature's name.
#[derive(Debug, Clone)]
pub struct PredefinedFeature {
    pub(crate) name: String,
    pub(crate) feature: Feature,
    pub(crate) attributes: AttributeMap,
    pub(crate) engine: Option<String>,
    pub(crate) check: Option<Probe>,
    pub(crate) traits: FeatureTraits,
}

impl PredefinedFeature {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn feature(&self) -> &Feature {
        &self.feature
    }

    #[must_use]
    pub const fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// Returns the attribute value, `Some(None)` for a null attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<Option<&str>> {
        self.attributes.get(name).map(Option::as_deref)
    }

    #[must_use]
    pub fn engine(&self) -> Option<&str> {
        self.engine.as_deref()
    }

    #[must_use]
    pub const fn check(&self) -> Option<&Probe> {
        self.check.as_ref()
    }

    #[must_use]
    pub const fn traits(&self) -> FeatureTraits {
        self.traits
    }

    /// `true` if the feature declares its own probe or exclusion list.
    #[must_use]
    pub const fn is_elementary(&self) -> bool {
        self.traits.contains(FeatureTraits::ELEMENTARY)
    }

    /// Runs the probe; features without one report `false`.
    #[must_use]
    pub fn probe(&self) -> bool {
        self.check.as_ref().is_some_and(Probe::evaluate)
    }
}

impl Deref for PredefinedFeature {
    type Target = Feature;

    fn deref(&self) -> &Feature {
        &self.feature
    }
}

impl AsRef<Mask> for PredefinedFeature {
    fn as_ref(&self) -> &Mask {
        self.feature.mask()
    }
}

/// Union of the masks of `features`.
#[must_use]
pub fn features_to_mask<'a, I>(features: I) -> Mask
where
    I: IntoIterator<Item = &'a Feature>,
{
    features.into_iter().fold(Mask::new(), |mut mask, feature| {
        mask |= feature.mask();
        mask
    })
}
