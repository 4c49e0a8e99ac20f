//! Feature descriptors: the externally supplied definitions a registry is built from.
//!
//! A descriptor is either an [`AliasInfo`] (another name for an existing feature) or a
//! [`CompositeInfo`] (a feature assembled from probes, includes, exclusions and attributes).
//! Both deserialize from the same untagged shape; an object with an `alias_for` key is an alias.

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A nullary capability probe.
pub type ProbeFn = dyn Fn() -> bool + Send + Sync;

/// Returns the description stored for a feature declaring `engine`.
#[must_use]
pub fn engine_description(engine: &str) -> String {
    format!("Features available in {engine}.")
}

/// A capability probe, optionally identified by a catalogue id.
///
/// Probes read from a catalogue carry only an id until something binds a function to them.
/// An unbound probe always evaluates to `false`.
#[derive(Clone)]
pub struct Probe {
    id: Option<String>,
    check: Option<Arc<ProbeFn>>,
}

impl Probe {
    /// Creates an anonymous probe bound to `check`.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self { id: None, check: Some(Arc::new(check)) }
    }

    /// Creates an unbound probe identified by `id`.
    pub fn named(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), check: None }
    }

    /// Binds (or rebinds) the probe function, keeping the id.
    pub fn bind(&mut self, check: Arc<ProbeFn>) {
        self.check = Some(check);
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.check.is_some()
    }

    /// Runs the probe.
    #[must_use]
    pub fn evaluate(&self) -> bool {
        self.check.as_ref().is_some_and(|check| check())
    }
}

impl fmt::Debug for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Probe").field("id", &self.id).field("bound", &self.is_bound()).finish()
    }
}

impl<'de> Deserialize<'de> for Probe {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::named)
    }
}

/// A value in a descriptor's attribute overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Sets the attribute to a string.
    Text(String),
    /// Sets the attribute to null.
    Null,
    /// Removes an inherited attribute.
    Absent,
}

impl AttributeValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// The value stored on the feature, or `None` for [`AttributeValue::Absent`].
    #[must_use]
    pub fn resolve(&self) -> Option<Option<String>> {
        match self {
            Self::Text(text) => Some(Some(text.clone())),
            Self::Null => Some(None),
            Self::Absent => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<Option<&str>> for AttributeValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Null, Self::text)
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AttributeValueVisitor)
    }
}

struct AttributeValueVisitor;

impl<'de> Visitor<'de> for AttributeValueVisitor {
    type Value = AttributeValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an attribute value")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(AttributeValue::text(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(AttributeValue::Text(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(if v { AttributeValue::Null } else { AttributeValue::Absent })
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(AttributeValue::Null)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(AttributeValue::Null)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(AttributeValue::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(AttributeValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(AttributeValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(AttributeValue::Null)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(AttributeValue::Null)
    }
}

/// The `includes` clause of a composite descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludeSpec {
    /// The complete include-set, replacing anything inherited.
    List(Vec<String>),
    /// Additions (`true`) and removals (`false`) against the inherited include-set, in
    /// declaration order.
    Diff(Vec<(String, bool)>),
}

impl<'de> Deserialize<'de> for IncludeSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IncludeSpecVisitor;

        impl<'de> Visitor<'de> for IncludeSpecVisitor {
            type Value = IncludeSpec;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of feature names or a map of feature names to booleans")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut names = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(name) = seq.next_element()? {
                    names.push(name);
                }
                Ok(IncludeSpec::List(names))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut diff = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    diff.push(entry);
                }
                Ok(IncludeSpec::Diff(diff))
            }
        }

        deserializer.deserialize_any(IncludeSpecVisitor)
    }
}

/// A descriptor naming another feature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasInfo {
    #[serde(alias = "aliasFor")]
    pub alias_for: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
}

impl AliasInfo {
    pub fn new(alias_for: impl Into<String>) -> Self {
        Self { alias_for: alias_for.into(), description: None, engine: None }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }
}

/// A descriptor assembling a feature from its parts.
///
/// `excludes` distinguishes an absent clause from an empty list: declaring one, even empty,
/// makes the feature elementary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompositeInfo {
    pub inherits: Option<String>,
    pub includes: Option<IncludeSpec>,
    pub excludes: Option<Vec<String>>,
    pub check: Option<Probe>,
    pub attributes: Option<BTreeMap<String, AttributeValue>>,
    pub description: Option<String>,
    pub engine: Option<String>,
}

impl CompositeInfo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A composite owning a probe bound to `check`.
    pub fn checked<F>(check: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self { check: Some(Probe::new(check)), ..Self::default() }
    }

    #[must_use]
    pub fn inherits(mut self, name: impl Into<String>) -> Self {
        self.inherits = Some(name.into());
        self
    }

    #[must_use]
    pub fn includes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes = Some(IncludeSpec::List(names.into_iter().map(Into::into).collect()));
        self
    }

    #[must_use]
    pub fn include_diff<I, S>(mut self, diff: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        self.includes =
            Some(IncludeSpec::Diff(diff.into_iter().map(|(name, add)| (name.into(), add)).collect()));
        self
    }

    #[must_use]
    pub fn excludes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes = Some(names.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn check(mut self, probe: Probe) -> Self {
        self.check = Some(probe);
        self
    }

    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.get_or_insert_with(BTreeMap::new).insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }
}

/// A feature descriptor.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FeatureInfo {
    Alias(AliasInfo),
    Composite(CompositeInfo),
}

impl FeatureInfo {
    /// Shorthand for an alias descriptor without a description of its own.
    pub fn alias(alias_for: impl Into<String>) -> Self {
        Self::Alias(AliasInfo::new(alias_for))
    }

    /// The description declared by this descriptor: engine-derived when an engine is
    /// present, the explicit description otherwise.
    #[must_use]
    pub fn own_description(&self) -> Option<String> {
        let (description, engine) = match self {
            Self::Alias(info) => (&info.description, &info.engine),
            Self::Composite(info) => (&info.description, &info.engine),
        };
        engine.as_deref().map(engine_description).or_else(|| description.clone())
    }

    /// The probe of a composite descriptor.
    pub fn probe_mut(&mut self) -> Option<&mut Probe> {
        match self {
            Self::Alias(_) => None,
            Self::Composite(info) => info.check.as_mut(),
        }
    }
}

impl From<AliasInfo> for FeatureInfo {
    fn from(info: AliasInfo) -> Self {
        Self::Alias(info)
    }
}

impl From<CompositeInfo> for FeatureInfo {
    fn from(info: CompositeInfo) -> Self {
        Self::Composite(info)
    }
}
