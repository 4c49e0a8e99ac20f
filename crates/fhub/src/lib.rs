//! Facade crate for the feature hub.
//! Re-exports the mask, descriptor, registry and kernel crates behind one dependency.
//! Keep this crate thin: it should compose other crates, not implement registry logic.
//!
//! ## Usage
//! - Add `fhub` with the desired feature flags (`kernel` is on by default, `logger` adds
//!   subscriber setup).
//! - Describe features with [`domain::DescriptorTable`] or a catalogue file and build a
//!   [`Registry`].

pub use fhub_domain as domain;
#[cfg(feature = "kernel")]
pub use fhub_kernel as kernel;
pub use fhub_mask as mask;
pub use fhub_registry as registry;

pub use fhub_mask::{Mask, MaskSet};
pub use fhub_registry::{Feature, FeatureError, PredefinedFeature, Registry};

/// Crate layers compiled into this build.
pub mod layers {
    /// Build-time enabled layers (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "registry",
        #[cfg(feature = "kernel")]
        "kernel",
        #[cfg(feature = "logger")]
        "logger",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

pub mod prelude {
    pub use fhub_domain::{AliasInfo, AttributeValue, CompositeInfo, DescriptorTable, FeatureInfo};
    #[cfg(feature = "kernel")]
    pub use fhub_kernel::prelude::*;
    pub use fhub_registry::prelude::*;
}
