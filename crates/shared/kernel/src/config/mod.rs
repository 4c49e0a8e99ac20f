use config::{Config, Environment, File};
use fhub_domain::config::HubConfig;
use fhub_domain::constants::{DEFAULT_CONFIG_FILE, ENV_PREFIX};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Custom error type for config loading.
#[fhub_derive::fhub_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Base File**: Loads settings from a file (e.g., `fhub.toml`). If no path is provided, it defaults to `"fhub"`.
/// 2. **Environment Overrides**: Overlays values from environment variables prefixed with `FHUB__`.
///    Nested structures are accessed using double underscores (e.g., `FHUB__LOGGER__LEVEL` maps to `logger.level`).
///
/// # Type Parameters
/// * `T`: The target configuration structure. Must implement [`serde::Deserialize`].
///
/// # Errors
/// This function will return an error if:
/// * The specified (or default) configuration file cannot be found.
/// * The content of the file does not match the structure of type `T`.
///
/// # Example
/// ```rust
/// use fhub_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());
    load(&effective_path, true)
}

/// Loads the [`HubConfig`] of an embedding application.
///
/// Unlike [`load_config`], the default `fhub` file is optional: without it every section keeps its
/// defaults and only `FHUB__` environment variables apply. An explicit `path` must exist.
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing or any source fails to deserialize.
pub fn load_hub_config(path: Option<impl AsRef<Path>>) -> Result<HubConfig, ConfigError> {
    match path {
        Some(path) => load(path.as_ref(), true),
        None => load(Path::new(DEFAULT_CONFIG_FILE), false),
    }
}

fn load<T>(path: &Path, required: bool) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let builder = Config::builder().add_source(File::from(path).required(required)).add_source(
        Environment::with_prefix(ENV_PREFIX).separator("__").convert_case(config::Case::Snake), // Env var overrides (e.g., FHUB__REGISTRY__DETECT)
    );

    info!(path = %path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
