use crate::Mask;
use fxhash::FxHashSet;

/// A set of masks compared by value.
///
/// Only supports insertion and membership; entries are never removed.
#[derive(Debug, Clone, Default)]
pub struct MaskSet {
    masks: FxHashSet<Mask>,
}

impl MaskSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a mask with the same bits is present.
    #[must_use]
    pub fn has(&self, mask: &Mask) -> bool {
        self.masks.contains(mask)
    }

    /// Inserts `mask`; returns `false` if an equal mask was already present.
    pub fn add(&mut self, mask: Mask) -> bool {
        self.masks.insert(mask)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }
}
