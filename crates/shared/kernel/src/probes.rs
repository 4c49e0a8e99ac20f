use crate::error::KernelError;
use fhub_domain::DescriptorTable;
use fhub_domain::descriptor::ProbeFn;
use fxhash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Probe functions keyed by the ids catalogues refer to.
#[derive(Clone, Default)]
pub struct ProbeSet {
    probes: FxHashMap<String, Arc<ProbeFn>>,
}

impl ProbeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `check` under `id`, replacing any previous probe with that id.
    pub fn insert<F>(&mut self, id: impl Into<String>, check: F)
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.probes.insert(id.into(), Arc::new(check));
    }

    /// Chaining form of [`ProbeSet::insert`].
    #[must_use]
    pub fn with<F>(mut self, id: impl Into<String>, check: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.insert(id, check);
        self
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.probes.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.probes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    /// Binds every identified probe of `table` to the function registered under its id.
    ///
    /// Probes without an id are left untouched. An id with no registered function fails when
    /// `strict`; otherwise the probe stays unbound and always reports `false`.
    ///
    /// # Returns
    /// The number of probes bound.
    ///
    /// # Errors
    /// [`KernelError::UnknownProbe`] for an unregistered id when `strict` is set.
    pub fn bind(&self, table: &mut DescriptorTable, strict: bool) -> Result<usize, KernelError> {
        let mut bound = 0;
        for (feature, info) in table.iter_mut() {
            let Some(probe) = info.probe_mut() else {
                continue;
            };
            let Some(id) = probe.id().map(str::to_owned) else {
                continue;
            };

            match self.probes.get(&id) {
                Some(check) => {
                    probe.bind(Arc::clone(check));
                    bound += 1;
                    debug!(feature, probe = %id, "Bound probe");
                },
                None if strict => {
                    return Err(KernelError::UnknownProbe {
                        id,
                        feature: feature.to_owned(),
                        context: None,
                    });
                },
                None => warn!(feature, probe = %id, "Unknown probe, feature will never be detected"),
            }
        }
        Ok(bound)
    }
}

impl fmt::Debug for ProbeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.probes.keys().collect();
        ids.sort_unstable();
        f.debug_struct("ProbeSet").field("ids", &ids).finish()
    }
}
