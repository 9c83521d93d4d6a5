// crates/suite-gate-core/src/core/services.rs
// ============================================================================
// Module: Service Catalog and Registry
// Description: Known service tags and their configured availability.
// Purpose: Validate `services(...)` arguments and answer availability at run time.
// Dependencies: crate::core::{config, identifiers}
// ============================================================================

//! ## Overview
//! The [`ServiceCatalog`] is the fixed list of service tags a test may depend
//! on, used at decoration time. The [`ServiceRegistry`] pairs each catalogued
//! tag with the availability read from the `service_available` group once at
//! start-up. A tag whose availability option is absent stays registered but
//! unresolved; gates report it as invalid rather than skipping.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::config::ConfigSnapshot;
use crate::core::config::ConfigValue;
use crate::core::identifiers::ServiceTag;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Configuration group holding per-service availability flags.
pub const SERVICE_AVAILABLE_GROUP: &str = "service_available";

/// Default catalog rows: (tag, human-readable group, availability option).
///
/// `None` means the service is always available.
const STANDARD_SERVICES: &[(&str, &str, Option<&str>)] = &[
    ("baremetal", "Bare Metal", Some("ironic")),
    ("compute", "Compute", Some("nova")),
    ("dashboard", "Dashboard", Some("horizon")),
    ("data_processing", "Data Processing", Some("sahara")),
    ("database", "Database", Some("trove")),
    ("identity", "Identity", None),
    ("image", "Image", Some("glance")),
    ("network", "Network", Some("neutron")),
    ("object_storage", "Object Storage", Some("swift")),
    ("orchestration", "Orchestration", Some("heat")),
    ("telemetry", "Telemetry", Some("ceilometer")),
    ("volume", "Volume", Some("cinder")),
];

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Where a service's availability comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "option", rename_all = "snake_case")]
pub enum AvailabilitySource {
    /// Always available; no configuration consulted.
    Always,
    /// Read from `service_available.<option>`.
    Config(String),
}

/// Catalog row for one service tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Human-readable service group.
    pub group: String,
    /// Availability source.
    pub availability: AvailabilitySource,
}

/// Fixed mapping of valid service tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceCatalog {
    /// Entries keyed by tag.
    entries: BTreeMap<ServiceTag, ServiceEntry>,
}

impl ServiceCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the standard catalog of API service tags.
    #[must_use]
    pub fn standard() -> Self {
        STANDARD_SERVICES.iter().fold(Self::new(), |catalog, (tag, group, option)| {
            let availability = option.map_or(AvailabilitySource::Always, |option| {
                AvailabilitySource::Config(option.to_string())
            });
            catalog.with_service(tag, group, availability)
        })
    }

    /// Returns the catalog with an additional service.
    #[must_use]
    pub fn with_service(
        mut self,
        tag: &str,
        group: &str,
        availability: AvailabilitySource,
    ) -> Self {
        self.entries.insert(
            ServiceTag::new(tag),
            ServiceEntry {
                group: group.to_string(),
                availability,
            },
        );
        self
    }

    /// Returns whether `tag` is a valid service tag.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(&ServiceTag::new(tag))
    }

    /// Returns the entry for `tag`.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&ServiceEntry> {
        self.entries.get(&ServiceTag::new(tag))
    }

    /// Iterates entries in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&ServiceTag, &ServiceEntry)> {
        self.entries.iter()
    }

    /// Returns the number of catalogued services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Resolved state of a registered service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// Human-readable service group.
    pub group: String,
    /// Configured availability; `None` when the option could not be resolved.
    pub available: Option<bool>,
}

/// Why an availability query could not be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceLookupError {
    /// The tag is not registered.
    NotRegistered,
    /// The tag is registered but has no resolvable availability.
    Unresolved,
}

/// Immutable availability registry built once from configuration.
///
/// # Invariants
/// - Contains exactly the tags of the catalog it was resolved from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceRegistry {
    /// Catalog used for decoration-time validation.
    catalog: ServiceCatalog,
    /// Status per tag.
    statuses: BTreeMap<ServiceTag, ServiceStatus>,
}

impl ServiceRegistry {
    /// Resolves availability for every catalogued service.
    #[must_use]
    pub fn resolve(catalog: &ServiceCatalog, config: &ConfigSnapshot) -> Self {
        let statuses = catalog
            .iter()
            .map(|(tag, entry)| {
                let available = match &entry.availability {
                    AvailabilitySource::Always => Some(true),
                    AvailabilitySource::Config(option) => config
                        .get(SERVICE_AVAILABLE_GROUP, option)
                        .map(ConfigValue::is_truthy),
                };
                let status = ServiceStatus {
                    group: entry.group.clone(),
                    available,
                };
                (tag.clone(), status)
            })
            .collect();
        Self {
            catalog: catalog.clone(),
            statuses,
        }
    }

    /// Returns the catalog the registry was resolved from.
    #[must_use]
    pub const fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Returns whether `tag` is available.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceLookupError`] when the tag is unknown or unresolved.
    pub fn availability(&self, tag: &str) -> Result<bool, ServiceLookupError> {
        let status =
            self.statuses.get(&ServiceTag::new(tag)).ok_or(ServiceLookupError::NotRegistered)?;
        status.available.ok_or(ServiceLookupError::Unresolved)
    }

    /// Iterates statuses in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&ServiceTag, &ServiceStatus)> {
        self.statuses.iter()
    }
}
