// crates/suite-gate-config/src/config.rs
// ============================================================================
// Module: Suite Gate Configuration
// Description: Configuration snapshot loading and validation.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: suite-gate-core, toml, tracing
// ============================================================================

//! ## Overview
//! Configuration is a TOML file whose top-level tables are option groups.
//! Every group becomes part of an immutable [`ConfigSnapshot`]; the service
//! and extension registries are resolved from it once, before any test is
//! evaluated. Missing availability and extension options fall back to
//! defaults; malformed values are rejected instead of guessed at.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use suite_gate_core::ConfigSnapshot;
use suite_gate_core::ConfigValue;
use suite_gate_core::ExtensionRegistry;
use suite_gate_core::SERVICE_AVAILABLE_GROUP;
use suite_gate_core::ServiceCatalog;
use suite_gate_core::ServiceRegistry;
use suite_gate_core::WILDCARD_EXTENSION;
use suite_gate_core::standard_extension_sources;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "suite-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "SUITE_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum nesting depth of list values.
const MAX_VALUE_DEPTH: usize = 8;

/// Default `service_available` options.
const DEFAULT_SERVICE_AVAILABILITY: &[(&str, bool)] = &[
    ("ceilometer", true),
    ("cinder", true),
    ("glance", true),
    ("heat", false),
    ("horizon", true),
    ("ironic", false),
    ("neutron", false),
    ("nova", true),
    ("sahara", false),
    ("swift", true),
    ("trove", false),
];

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Loaded configuration with defaults applied.
///
/// # Invariants
/// - Every `service_available` option is a boolean.
/// - Every configured extension option is an array of strings.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteGateConfig {
    /// Option groups with defaults merged in.
    snapshot: ConfigSnapshot,
    /// Catalog used to resolve service availability.
    catalog: ServiceCatalog,
    /// File the configuration was read from, when loaded from disk.
    source: Option<PathBuf>,
}

impl SuiteGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// The path comes from `path`, then `SUITE_GATE_CONFIG`, then
    /// `suite-gate.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        let content = read_bounded(&resolved)?;
        let mut config = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %resolved.display(),
            groups = config.snapshot.groups().count(),
            "configuration loaded"
        );
        config.source = Some(resolved);
        Ok(config)
    }

    /// Parses configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        let mut snapshot = ConfigSnapshot::new();
        for (group, options) in &table {
            let toml::Value::Table(options) = options else {
                return Err(ConfigError::Invalid(format!(
                    "top-level entry {group} must be a table of options"
                )));
            };
            snapshot.ensure_group(group);
            for (option, value) in options {
                let value = config_value_from_toml(value, 0)
                    .map_err(|reason| ConfigError::Invalid(format!("{group}.{option} {reason}")))?;
                snapshot.set(group, option, value);
            }
        }
        Self::from_snapshot(snapshot)
    }

    /// Builds configuration from an in-memory snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when validation fails.
    pub fn from_snapshot(mut snapshot: ConfigSnapshot) -> Result<Self, ConfigError> {
        apply_defaults(&mut snapshot);
        let config = Self {
            snapshot,
            catalog: ServiceCatalog::standard(),
            source: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates option types the registries depend on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a value has the wrong type.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(group) = self.snapshot.group(SERVICE_AVAILABLE_GROUP) {
            for (option, value) in group {
                if !matches!(value, ConfigValue::Bool(_)) {
                    return Err(ConfigError::Invalid(format!(
                        "{SERVICE_AVAILABLE_GROUP}.{option} must be a boolean, found {}",
                        value.type_name()
                    )));
                }
            }
        }
        for source in standard_extension_sources() {
            let Some(value) = self.snapshot.get(&source.group, &source.option) else {
                continue;
            };
            if value.as_string_list().is_none() {
                return Err(ConfigError::Invalid(format!(
                    "{}.{} must be an array of strings",
                    source.group, source.option
                )));
            }
        }
        Ok(())
    }

    /// Returns the configuration snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &ConfigSnapshot {
        &self.snapshot
    }

    /// Returns the service catalog used for decoration and resolution.
    #[must_use]
    pub const fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Returns the file the configuration was loaded from.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Resolves service availability from the snapshot.
    #[must_use]
    pub fn service_registry(&self) -> ServiceRegistry {
        ServiceRegistry::resolve(&self.catalog, &self.snapshot)
    }

    /// Resolves enabled extensions from the snapshot.
    #[must_use]
    pub fn extension_registry(&self) -> ExtensionRegistry {
        ExtensionRegistry::standard(&self.snapshot)
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Fills in availability and extension options the file left out.
fn apply_defaults(snapshot: &mut ConfigSnapshot) {
    for (option, available) in DEFAULT_SERVICE_AVAILABILITY {
        snapshot.set_default(SERVICE_AVAILABLE_GROUP, option, *available);
    }
    for source in standard_extension_sources() {
        snapshot.set_default(&source.group, &source.option, vec![WILDCARD_EXTENSION]);
    }
}

// ============================================================================
// SECTION: Value Conversion
// ============================================================================

/// Converts a TOML value into a configuration value.
///
/// Datetimes are kept as their TOML text; tables are rejected.
pub(crate) fn config_value_from_toml(
    value: &toml::Value,
    depth: usize,
) -> Result<ConfigValue, String> {
    if depth > MAX_VALUE_DEPTH {
        return Err("nests lists too deeply".to_string());
    }
    match value {
        toml::Value::String(text) => Ok(ConfigValue::String(text.clone())),
        toml::Value::Integer(number) => Ok(ConfigValue::Integer(*number)),
        toml::Value::Float(number) => Ok(ConfigValue::Float(*number)),
        toml::Value::Boolean(flag) => Ok(ConfigValue::Bool(*flag)),
        toml::Value::Datetime(datetime) => Ok(ConfigValue::String(datetime.to_string())),
        toml::Value::Array(items) => items
            .iter()
            .map(|item| config_value_from_toml(item, depth + 1))
            .collect::<Result<Vec<_>, _>>()
            .map(ConfigValue::List),
        toml::Value::Table(_) => Err("must not be a table".to_string()),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates a path against length limits.
pub(crate) fn validate_path(path: &Path) -> Result<(), String> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err("path exceeds max length".to_string());
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err("path component too long".to_string());
        }
    }
    Ok(())
}

/// Reads a size-capped UTF-8 file.
fn read_bounded(path: &Path) -> Result<String, ConfigError> {
    validate_path(path).map_err(|reason| ConfigError::Invalid(format!("config {reason}")))?;
    let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
    if bytes.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
    }
    String::from_utf8(bytes)
        .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))
}
