use crate::feature::AttributeMap;
use crate::registry::Registry;
use fhub_domain::FeatureTraits;
use fhub_mask::Mask;
use serde::Serialize;

/// A serializable summary of a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySnapshot {
    pub features: Vec<FeatureSnapshot>,
    /// Names of elementary features, sorted.
    pub elementary: Vec<String>,
    pub incompatible: Vec<Mask>,
}

/// One registered name. Aliases report the entry they resolve to in `entry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSnapshot {
    pub name: String,
    pub entry: String,
    pub mask: Mask,
    pub traits: FeatureTraits,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    pub attributes: AttributeMap,
    pub description: Option<String>,
}

impl Registry {
    /// Exports every registered name in declaration order.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        let features = self
            .iter()
            .map(|(name, entry)| FeatureSnapshot {
                name: name.to_owned(),
                entry: entry.name().to_owned(),
                mask: entry.mask().clone(),
                traits: entry.traits(),
                engine: entry.engine().map(str::to_owned),
                attributes: entry.attributes().clone(),
                description: self.description_for(name).ok().flatten().map(str::to_owned),
            })
            .collect();

        RegistrySnapshot {
            features,
            elementary: self.elementary().iter().map(|entry| entry.name().to_owned()).collect(),
            incompatible: self.incompatible_masks().to_vec(),
        }
    }
}
