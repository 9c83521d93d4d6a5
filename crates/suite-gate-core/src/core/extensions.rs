// crates/suite-gate-core/src/core/extensions.rs
// ============================================================================
// Module: Extension Registry
// Description: Enabled API extensions per service.
// Purpose: Answer `requires_ext` queries, honoring the `all` wildcard.
// Dependencies: crate::core::config
// ============================================================================

//! ## Overview
//! Each service that can report extensions reads one list option from its
//! `<service>-feature-enabled` group. A list whose first entry is `all` turns
//! every extension on. An empty or missing list turns every extension off.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::config::ConfigSnapshot;
use crate::core::config::ConfigValue;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Sentinel list entry enabling every extension.
pub const WILDCARD_EXTENSION: &str = "all";

/// Default extension option name.
pub const API_EXTENSIONS_OPTION: &str = "api_extensions";

/// Default sources: (service, group, option).
const STANDARD_SOURCES: &[(&str, &str, &str)] = &[
    ("compute", "compute-feature-enabled", API_EXTENSIONS_OPTION),
    ("identity", "identity-feature-enabled", API_EXTENSIONS_OPTION),
    ("network", "network-feature-enabled", API_EXTENSIONS_OPTION),
    ("object", "object-storage-feature-enabled", "discoverable_apis"),
    ("volume", "volume-feature-enabled", API_EXTENSIONS_OPTION),
];

// ============================================================================
// SECTION: Extension Sets
// ============================================================================

/// Enabled extensions of one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "extensions", rename_all = "snake_case")]
pub enum ExtensionSet {
    /// Every extension is enabled.
    All,
    /// Only the listed extensions are enabled.
    Listed(BTreeSet<String>),
}

impl ExtensionSet {
    /// Builds a set from a configured list.
    pub fn from_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        if items.first().is_some_and(|first| first == WILDCARD_EXTENSION) {
            return Self::All;
        }
        Self::Listed(items.into_iter().collect())
    }

    /// Returns whether `extension` is enabled.
    #[must_use]
    pub fn is_enabled(&self, extension: &str) -> bool {
        match self {
            Self::All => true,
            Self::Listed(extensions) => extensions.contains(extension),
        }
    }
}

/// Configuration location of a service's extension list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSource {
    /// Service key used by `requires_ext`.
    pub service: String,
    /// Configuration group.
    pub group: String,
    /// Option inside the group.
    pub option: String,
}

/// Returns the standard extension sources.
#[must_use]
pub fn standard_extension_sources() -> Vec<ExtensionSource> {
    STANDARD_SOURCES
        .iter()
        .map(|(service, group, option)| ExtensionSource {
            service: (*service).to_string(),
            group: (*group).to_string(),
            option: (*option).to_string(),
        })
        .collect()
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// The service has no extension list (call-time key error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownExtensionService(pub String);

/// Immutable per-service extension registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionRegistry {
    /// Extension sets keyed by service.
    services: BTreeMap<String, ExtensionSet>,
}

impl ExtensionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            services: BTreeMap::new(),
        }
    }

    /// Returns the registry with `service` mapped to `set`.
    #[must_use]
    pub fn with_service(mut self, service: &str, set: ExtensionSet) -> Self {
        self.services.insert(service.to_string(), set);
        self
    }

    /// Resolves every source against the snapshot.
    ///
    /// Missing options and non-list values resolve to an empty set. A bare
    /// string is read as a one-item list.
    #[must_use]
    pub fn resolve(sources: &[ExtensionSource], config: &ConfigSnapshot) -> Self {
        sources.iter().fold(Self::new(), |registry, source| {
            let items: Vec<&str> = match config.get(&source.group, &source.option) {
                Some(ConfigValue::List(values)) => {
                    values.iter().filter_map(ConfigValue::as_str).collect()
                }
                Some(ConfigValue::String(value)) => vec![value.as_str()],
                _ => Vec::new(),
            };
            registry.with_service(&source.service, ExtensionSet::from_list(items))
        })
    }

    /// Resolves the standard sources against the snapshot.
    #[must_use]
    pub fn standard(config: &ConfigSnapshot) -> Self {
        Self::resolve(&standard_extension_sources(), config)
    }

    /// Returns whether `extension` is enabled for `service`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownExtensionService`] when the service has no list.
    pub fn is_enabled(&self, extension: &str, service: &str) -> Result<bool, UnknownExtensionService> {
        self.services
            .get(service)
            .map(|set| set.is_enabled(extension))
            .ok_or_else(|| UnknownExtensionService(service.to_string()))
    }

    /// Returns the set for `service`.
    #[must_use]
    pub fn get(&self, service: &str) -> Option<&ExtensionSet> {
        self.services.get(service)
    }

    /// Iterates services in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtensionSet)> {
        self.services.iter().map(|(service, set)| (service.as_str(), set))
    }
}
