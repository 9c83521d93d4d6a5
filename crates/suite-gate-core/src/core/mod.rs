// crates/suite-gate-core/src/core/mod.rs
// ============================================================================
// Module: Suite Gate Core Types
// Description: Metadata, registries, gates, and verdicts.
// Purpose: Group the data model shared by the builder and the composer.
// Dependencies: crate::core::*
// ============================================================================

//! ## Overview
//! Data types only; evaluation lives in [`crate::runtime`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod error;
pub mod extensions;
pub mod gates;
pub mod identifiers;
pub mod metadata;
pub mod services;
pub mod verdict;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigGroup;
pub use config::ConfigLookup;
pub use config::ConfigSnapshot;
pub use config::ConfigValue;
pub use error::MetadataError;
pub use extensions::API_EXTENSIONS_OPTION;
pub use extensions::ExtensionRegistry;
pub use extensions::ExtensionSet;
pub use extensions::ExtensionSource;
pub use extensions::UnknownExtensionService;
pub use extensions::WILDCARD_EXTENSION;
pub use extensions::standard_extension_sources;
pub use gates::ConfigPredicate;
pub use gates::GateKind;
pub use gates::GateSpec;
pub use identifiers::IdempotentId;
pub use identifiers::ServiceTag;
pub use identifiers::TestId;
pub use metadata::AttrType;
pub use metadata::ClassSetupFrequency;
pub use metadata::IDEMPOTENT_ID_DOC_PREFIX;
pub use metadata::IDEMPOTENT_ID_TAG_PREFIX;
pub use metadata::STRESS_TAG;
pub use metadata::StressConfig;
pub use metadata::TestMetadata;
pub use services::AvailabilitySource;
pub use services::SERVICE_AVAILABLE_GROUP;
pub use services::ServiceCatalog;
pub use services::ServiceEntry;
pub use services::ServiceLookupError;
pub use services::ServiceRegistry;
pub use services::ServiceStatus;
pub use verdict::Verdict;
