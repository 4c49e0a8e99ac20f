use crate::descriptor::FeatureInfo;
use indexmap::IndexMap;
use serde::Deserialize;

/// An ordered name → descriptor table.
///
/// Declaration order is significant: it drives bit allocation and the canonical decomposition
/// of feature values, so the table keeps it through construction and deserialization.
/// Inserting an existing name replaces its descriptor in place.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct DescriptorTable {
    entries: IndexMap<String, FeatureInfo>,
}

impl DescriptorTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a descriptor, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, info: impl Into<FeatureInfo>) -> Option<FeatureInfo> {
        self.entries.insert(name.into(), info.into())
    }

    /// Chaining form of [`DescriptorTable::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, info: impl Into<FeatureInfo>) -> Self {
        self.insert(name, info);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FeatureInfo> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureInfo)> {
        self.entries.iter().map(|(name, info)| (name.as_str(), info))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut FeatureInfo)> {
        self.entries.iter_mut().map(|(name, info)| (name.as_str(), info))
    }

    /// Names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for DescriptorTable
where
    K: Into<String>,
    V: Into<FeatureInfo>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let entries = iter.into_iter().map(|(name, info)| (name.into(), info.into())).collect();
        Self { entries }
    }
}
