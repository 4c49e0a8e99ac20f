/// Marker of features that form an independent axis of the lattice.
pub const ELEMENTARY: &str = "elementary";
/// Marker of features that own a capability probe.
pub const CHECK: &str = "check";

/// Prefix of environment variables overriding configuration values.
pub const ENV_PREFIX: &str = "FHUB";
/// Configuration file looked up when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "fhub";
