use crate::config::ConfigError;
use fhub_registry::FeatureError;
use std::borrow::Cow;

/// Errors raised while assembling a registry from configuration and catalogues.
#[fhub_derive::fhub_error]
pub enum KernelError {
    #[error("Configuration error{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("Catalogue I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("JSON catalogue error{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("TOML catalogue error{}: {source}", format_context(.context))]
    Toml { source: toml::de::Error, context: Option<Cow<'static, str>> },

    #[error("Registry error{}: {source}", format_context(.context))]
    Registry { source: FeatureError, context: Option<Cow<'static, str>> },

    #[cfg(feature = "logger")]
    #[error("Logger error{}: {source}", format_context(.context))]
    Logger { source: fhub_logger::LoggerError, context: Option<Cow<'static, str>> },

    /// A catalogue names a probe id nothing was bound to.
    #[error("Unknown probe {id:?} for feature {feature:?}{}", format_context(.context))]
    UnknownProbe { id: String, feature: String, context: Option<Cow<'static, str>> },

    /// A catalogue file whose extension maps to no known format.
    #[error("Unsupported catalogue format{}: {path}", format_context(.context))]
    UnsupportedFormat { path: String, context: Option<Cow<'static, str>> },

    #[error("Internal kernel error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
