use crate::error::{KernelError, KernelErrorExt};
use crate::probes::ProbeSet;
use fhub_domain::DescriptorTable;
use fhub_domain::config::RegistrySettings;
use fhub_registry::{Feature, Registry};
use tracing::{info, warn};

/// A ready-to-use registry and, when detection ran, the features available in this process.
#[derive(Debug, Clone)]
pub struct Hub {
    pub registry: Registry,
    pub detected: Option<Feature>,
}

/// Binds probes, builds the registry and optionally runs detection.
///
/// # Errors
/// * [`KernelError::UnknownProbe`] if `settings.strict_probes` is set and a probe id is unbound.
/// * [`KernelError::Registry`] if the table does not resolve.
pub fn bootstrap(
    settings: &RegistrySettings,
    mut table: DescriptorTable,
    probes: &ProbeSet,
) -> Result<Hub, KernelError> {
    let bound = probes.bind(&mut table, settings.strict_probes)?;
    let registry = Registry::builder().table(table).build().context("Building feature registry")?;

    let detected = settings.detect.then(|| registry.detect()).flatten();
    match &detected {
        Some(feature) => {
            info!(probes = bound, features = %registry.display(feature), "Detected features");
        },
        None if settings.detect => warn!(probes = bound, "Feature detection produced no result"),
        None => info!(probes = bound, "Feature registry ready"),
    }

    Ok(Hub { registry, detected })
}
