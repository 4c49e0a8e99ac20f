use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration of an embedding application.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HubConfigInner {
    pub logger: LoggerSettings,
    pub registry: RegistrySettings,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct HubConfig {
    #[serde(flatten, default)]
    inner: Arc<HubConfigInner>,
}

impl Deref for HubConfig {
    type Target = HubConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for HubConfig {
    fn deref_mut(&mut self) -> &mut HubConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Logging output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    /// Prefix of rolling log files.
    pub name: String,
    /// Minimum level (`trace`, `debug`, `info`, `warn`, `error`, `off`).
    pub level: String,
    pub console: bool,
    /// Directory of rolling log files; no file output when absent.
    pub path: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
    /// Explicit filter directives overriding `level` (e.g., `fhub_registry=debug`).
    pub env_filter: Option<String>,
}

/// Registry construction settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    /// Fail when a catalogue names a probe that is not bound.
    pub strict_probes: bool,
    /// Run every probe once after construction and log the detected features.
    pub detect: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            name: "fhub".to_owned(),
            level: "info".to_owned(),
            console: true,
            path: None,
            json: false,
            max_files: 10,
            env_filter: None,
        }
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self { strict_probes: true, detect: false }
    }
}
