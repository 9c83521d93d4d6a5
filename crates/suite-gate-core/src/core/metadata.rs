// crates/suite-gate-core/src/core/metadata.rs
// ============================================================================
// Module: Test Metadata
// Description: Attribute tags, idempotent id, service and stress metadata.
// Purpose: Hold the per-test record that decorators populate at definition time.
// Dependencies: crate::core::{config, error, identifiers}, serde
// ============================================================================

//! ## Overview
//! [`TestMetadata`] is populated only through the runtime builder and is
//! read-only once the definition is frozen. Mutators are crate-private so no
//! caller can change metadata after a test has been built.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::core::config::ConfigValue;
use crate::core::error::MetadataError;
use crate::core::identifiers::IdempotentId;
use crate::core::identifiers::ServiceTag;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Reserved tag attached by `stresstest`.
pub const STRESS_TAG: &str = "stress";

/// Prefix of the reserved tag attached by `idempotent_id`.
pub const IDEMPOTENT_ID_TAG_PREFIX: &str = "id-";

/// Prefix of the documentation line attached by `idempotent_id`.
pub const IDEMPOTENT_ID_DOC_PREFIX: &str = "Test idempotent id: ";

// ============================================================================
// SECTION: Stress Metadata
// ============================================================================

/// How often the stress harness runs class setup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassSetupFrequency {
    /// Once per worker process.
    #[default]
    Process,
    /// Once per stress application.
    Application,
}

impl ClassSetupFrequency {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Process => "process",
            Self::Application => "application",
        }
    }
}

impl fmt::Display for ClassSetupFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassSetupFrequency {
    type Err = MetadataError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "process" => Ok(Self::Process),
            "application" => Ok(Self::Application),
            other => Err(MetadataError::InvalidClassSetupFrequency {
                value: other.to_string(),
            }),
        }
    }
}

/// Scheduling hints for the external stress harness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressConfig {
    /// Class setup frequency.
    pub class_setup_per: ClassSetupFrequency,
    /// Whether subclasses inherit the stress marking.
    pub allow_inheritance: bool,
}

// ============================================================================
// SECTION: Attribute Types
// ============================================================================

/// Value of the reserved `type` argument of `attr`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrType {
    /// A single tag.
    Single(String),
    /// An ordered sequence of tags.
    Many(Vec<String>),
}

impl AttrType {
    /// Reads an attr type from a dynamically typed value.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::InvalidAttrType`] for anything other than a
    /// string or a list of strings.
    pub fn from_value(value: &ConfigValue) -> Result<Self, MetadataError> {
        if let Some(tag) = value.as_str() {
            return Ok(Self::Single(tag.to_string()));
        }
        value
            .as_string_list()
            .map(|tags| Self::Many(tags.into_iter().map(str::to_string).collect()))
            .ok_or(MetadataError::InvalidAttrType {
                found: value.type_name(),
            })
    }

    /// Iterates the tags in declaration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        let tags: &[String] = match self {
            Self::Single(tag) => std::slice::from_ref(tag),
            Self::Many(tags) => tags,
        };
        tags.iter().map(String::as_str)
    }
}

impl From<&str> for AttrType {
    fn from(tag: &str) -> Self {
        Self::Single(tag.to_string())
    }
}

impl From<Vec<&str>> for AttrType {
    fn from(tags: Vec<&str>) -> Self {
        Self::Many(tags.into_iter().map(str::to_string).collect())
    }
}

// ============================================================================
// SECTION: Test Metadata
// ============================================================================

/// Metadata attached to a single test.
///
/// # Invariants
/// - `tags` is a set; duplicates collapse.
/// - `idempotent_id` is set at most once and is always a valid UUID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestMetadata {
    /// Attribute tags consumed by selection tooling.
    tags: BTreeSet<String>,
    /// Stable identity across renames.
    idempotent_id: Option<IdempotentId>,
    /// Services declared through `services`.
    required_services: BTreeSet<ServiceTag>,
    /// Stress harness hints.
    stress: Option<StressConfig>,
    /// Inert `attr` keywords kept for compatibility.
    keywords: BTreeMap<String, ConfigValue>,
    /// Documentation text.
    doc: String,
}

impl TestMetadata {
    /// Creates metadata carrying the test's own documentation.
    pub(crate) fn with_doc(doc: impl Into<String>) -> Self {
        Self {
            doc: doc.into(),
            ..Self::default()
        }
    }

    /// Returns the attribute tags.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Returns whether `tag` is attached.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Returns the idempotent id, if set.
    #[must_use]
    pub const fn idempotent_id(&self) -> Option<&IdempotentId> {
        self.idempotent_id.as_ref()
    }

    /// Returns the declared services.
    #[must_use]
    pub const fn required_services(&self) -> &BTreeSet<ServiceTag> {
        &self.required_services
    }

    /// Returns the stress hints, if the test is a stress test.
    #[must_use]
    pub const fn stress(&self) -> Option<&StressConfig> {
        self.stress.as_ref()
    }

    /// Returns the inert `attr` keywords.
    #[must_use]
    pub const fn keywords(&self) -> &BTreeMap<String, ConfigValue> {
        &self.keywords
    }

    /// Returns the documentation text (empty when none).
    #[must_use]
    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// Adds an attribute tag.
    pub(crate) fn add_tag(&mut self, tag: &str) {
        self.tags.insert(tag.to_string());
    }

    /// Records an inert keyword.
    pub(crate) fn add_keyword(&mut self, key: &str, value: ConfigValue) {
        self.keywords.insert(key.to_string(), value);
    }

    /// Attaches the idempotent id, its tag, and its documentation line.
    pub(crate) fn set_idempotent_id(&mut self, id: IdempotentId) -> Result<(), MetadataError> {
        if let Some(existing) = &self.idempotent_id {
            return Err(MetadataError::IdempotentIdAlreadySet {
                existing: existing.to_string(),
            });
        }
        self.tags.insert(format!("{IDEMPOTENT_ID_TAG_PREFIX}{id}"));
        self.doc = if self.doc.is_empty() {
            format!("{IDEMPOTENT_ID_DOC_PREFIX}{id}")
        } else {
            format!("{IDEMPOTENT_ID_DOC_PREFIX}{id}\n{}", self.doc)
        };
        self.idempotent_id = Some(id);
        Ok(())
    }

    /// Records a required service and its tag.
    pub(crate) fn add_service(&mut self, service: ServiceTag) {
        self.tags.insert(service.as_str().to_string());
        self.required_services.insert(service);
    }

    /// Marks the test as a stress test.
    pub(crate) fn set_stress(&mut self, stress: StressConfig) {
        self.tags.insert(STRESS_TAG.to_string());
        self.stress = Some(stress);
    }
}
