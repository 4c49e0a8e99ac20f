use crate::error::KernelError;
use fhub_domain::config::LoggerSettings;
use fhub_logger::{LevelFilter, Logger};

/// Installs the global subscriber described by `settings`.
///
/// # Errors
/// * [`KernelError::Internal`] if `settings.level` is not a level name.
/// * [`KernelError::Logger`] if the subscriber cannot be installed.
pub fn init_logger(settings: &LoggerSettings) -> Result<Logger, KernelError> {
    let level = settings
        .level
        .parse::<LevelFilter>()
        .map_err(|e| KernelError::from(format!("Invalid log level '{}': {e}", settings.level)))?;

    let mut builder = Logger::builder()
        .name(&settings.name)
        .level(level)
        .console(settings.console)
        .json(settings.json)
        .max_files(settings.max_files);

    if let Some(path) = &settings.path {
        builder = builder.path(path.clone());
    }
    if let Some(filter) = &settings.env_filter {
        builder = builder.env_filter(filter);
    }

    Ok(builder.init()?)
}
