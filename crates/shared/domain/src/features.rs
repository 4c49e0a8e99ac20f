use crate::constants::{CHECK, ELEMENTARY};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Debug;

bitflags! {
    /// Flags describing how a predefined feature was declared.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct FeatureTraits: u8 {
        /// Declares a probe or an excludes list.
        const ELEMENTARY = 1 << 0;
        /// Owns a capability probe.
        const CHECK = 1 << 1;
    }
}

impl FeatureTraits {
    /// Markers rendered next to a feature name, in display order.
    pub fn markers(self) -> impl Iterator<Item = &'static str> {
        [(Self::ELEMENTARY, ELEMENTARY), (Self::CHECK, CHECK)]
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, marker)| marker)
    }
}

impl From<&str> for FeatureTraits {
    fn from(s: &str) -> Self {
        match s {
            ELEMENTARY => Self::ELEMENTARY,
            CHECK => Self::CHECK,
            _ => Self::empty(),
        }
    }
}

impl From<u8> for FeatureTraits {
    fn from(bits: u8) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl Serialize for FeatureTraits {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for FeatureTraits {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Self::from_bits_retain(bits))
    }
}
