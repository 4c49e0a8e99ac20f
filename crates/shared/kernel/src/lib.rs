//! Kernel utilities shared by applications embedding the feature hub.
//! Keep this crate lightweight; it wires configuration, descriptor catalogues, probe binding and
//! logging around [`fhub_registry::Registry`].
//!
//! ## Bootstrapping
//! ```rust
//! use fhub_domain::config::RegistrySettings;
//! use fhub_kernel::catalogue::{CatalogueFormat, parse_catalogue};
//! use fhub_kernel::{ProbeSet, bootstrap};
//!
//! # fn main() -> Result<(), fhub_kernel::KernelError> {
//! let table = parse_catalogue(
//!     r#"{ "NODE": { "check": "node" }, "SERVER": { "includes": ["NODE"] } }"#,
//!     CatalogueFormat::Json,
//! )?;
//! let probes = ProbeSet::new().with("node", || true);
//! let settings = RegistrySettings { detect: true, ..RegistrySettings::default() };
//!
//! let hub = bootstrap(&settings, table, &probes)?;
//! let detected = hub.detected.expect("probes are compatible");
//! assert_eq!(hub.registry.canonical_names(&detected), vec!["NODE"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use fhub_kernel::config::load_hub_config;
//! let cfg = load_hub_config(Some("config/fhub.toml")).unwrap();
//! ```

mod bootstrap;
pub mod catalogue;
pub mod config;
mod error;
#[cfg(feature = "logger")]
pub mod logging;
mod probes;

pub use bootstrap::{Hub, bootstrap};
pub use error::{KernelError, KernelErrorExt};
pub use fhub_domain as domain;
pub use probes::ProbeSet;

pub mod prelude {
    pub use crate::bootstrap::{Hub, bootstrap};
    pub use crate::catalogue::{CatalogueFormat, parse_catalogue, read_catalogue};
    pub use crate::config::{load_config, load_hub_config};
    pub use crate::error::{KernelError, KernelErrorExt};
    pub use crate::probes::ProbeSet;
}
