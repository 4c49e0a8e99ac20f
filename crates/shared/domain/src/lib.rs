//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `bitflags`, `indexmap`).
//! Keep it lean: no I/O, no resolution logic. Just descriptors, configuration, and simple helpers.

pub mod config;
pub mod constants;
pub mod descriptor;
pub mod features;
pub mod table;

pub use descriptor::{AliasInfo, AttributeValue, CompositeInfo, FeatureInfo, IncludeSpec, Probe};
pub use features::FeatureTraits;
pub use table::DescriptorTable;
