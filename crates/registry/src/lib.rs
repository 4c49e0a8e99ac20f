//! # Feature Registry
//!
//! Resolves a [`DescriptorTable`](fhub_domain::DescriptorTable) into a frozen [`Registry`] and
//! implements the algebra of feature values on top of it.
//!
//! ## Model
//!
//! Every feature is a [`Mask`](fhub_mask::Mask). Features owning a probe get a bit of their
//! own; every other feature is the union of what it includes. Features declaring `excludes`
//! register forbidden "both present" combinations, and every combining operation that
//! validates rejects values containing one.
//!
//! * **Elementary** features (own probe or own exclusion list) are the independent axes.
//! * **Aliases** share the entry of the feature they name.
//! * **Values** ([`Feature`]) are plain masks; the registry answers every question about them.
//!
//! ## Example
//!
//! ```rust
//! use fhub_domain::{AliasInfo, CompositeInfo, DescriptorTable};
//! use fhub_registry::prelude::*;
//!
//! # fn main() -> Result<(), FeatureError> {
//! let table = DescriptorTable::new()
//!     .with("FILL", CompositeInfo::checked(|| true).description("Array.prototype.fill"))
//!     .with("FLAT", CompositeInfo::checked(|| true))
//!     .with("ES2019", CompositeInfo::new().includes(["FILL", "FLAT"]).engine("ES2019"))
//!     .with("MODERN", AliasInfo::new("ES2019"));
//!
//! let registry = Registry::builder().table(table).build()?;
//!
//! let modern = registry.construct(["MODERN"])?;
//! assert_eq!(registry.canonical_names(&modern), vec!["FILL", "FLAT"]);
//! assert!(registry.are_equal(["MODERN", "ES2019"])?);
//! assert_eq!(registry.description_for("MODERN")?, Some("Features available in ES2019."));
//! assert_eq!(registry.display(&modern).to_string(), "[Feature <FILL, FLAT>]");
//! # Ok(())
//! # }
//! ```

mod builder;
mod element;
mod error;
mod feature;
mod format;
mod registry;
mod snapshot;

pub use builder::{NoTable, RegistryBuilder, WithTable};
pub use element::{FeatureElement, FeatureRef};
pub use error::{FeatureError, FeatureErrorExt};
pub use feature::{AttributeMap, Feature, PredefinedFeature, features_to_mask};
pub use format::{DisplayFeature, InspectOptions};
pub use registry::Registry;
pub use snapshot::{FeatureSnapshot, RegistrySnapshot};

pub mod prelude {
    pub use crate::element::{FeatureElement, FeatureRef};
    pub use crate::error::{FeatureError, FeatureErrorExt};
    pub use crate::feature::{Feature, PredefinedFeature};
    pub use crate::format::InspectOptions;
    pub use crate::registry::Registry;
}
