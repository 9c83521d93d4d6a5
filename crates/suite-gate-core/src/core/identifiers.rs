// crates/suite-gate-core/src/core/identifiers.rs
// ============================================================================
// Module: Suite Gate Identifiers
// Description: Opaque identifiers for tests, services, and idempotent ids.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde, uuid
// ============================================================================

//! ## Overview
//! Identifiers used across the gating engine. [`TestId`] and [`ServiceTag`]
//! are opaque strings. [`IdempotentId`] is the only validated identifier: it
//! must parse as a UUID and keeps the spelling it was declared with, because
//! that spelling is what ends up in the `id-<uuid>` attribute tag.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::core::config::ConfigValue;
use crate::core::error::MetadataError;

// ============================================================================
// SECTION: Opaque Identifiers
// ============================================================================

/// Test identifier used as the side-table key for metadata.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestId(String);

impl TestId {
    /// Creates a new test identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TestId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TestId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Service tag naming a remote service a test depends on (`compute`, `image`, ...).
///
/// # Invariants
/// - Opaque UTF-8 string; membership in a catalog is checked by the builder, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceTag(String);

impl ServiceTag {
    /// Creates a new service tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ServiceTag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Idempotent Id
// ============================================================================

/// Number of hex digits in a UUID once separators are removed.
const UUID_HEX_LENGTH: usize = 32;

/// Stable UUID identifying a test across renames.
///
/// # Invariants
/// - `raw` always parses as a UUID and `uuid` is its parsed value.
/// - `raw` is kept verbatim; `urn:`/`uuid:` markers, braces, and hyphens are
///   ignored when parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdempotentId {
    /// Identifier exactly as declared.
    raw: String,
    /// Parsed UUID value used for equality across spellings.
    uuid: Uuid,
}

impl IdempotentId {
    /// Parses an idempotent id from a string.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::InvalidIdempotentId`] when the string is not a UUID.
    pub fn parse(raw: &str) -> Result<Self, MetadataError> {
        let invalid = |reason: String| MetadataError::InvalidIdempotentId {
            value: raw.to_string(),
            reason,
        };
        let hex = uuid_hex_digits(raw);
        if hex.len() != UUID_HEX_LENGTH {
            return Err(invalid(format!(
                "expected {UUID_HEX_LENGTH} hex digits, found {}",
                hex.len()
            )));
        }
        let uuid = Uuid::try_parse(&hex).map_err(|err| invalid(err.to_string()))?;
        Ok(Self {
            raw: raw.to_string(),
            uuid,
        })
    }

    /// Parses an idempotent id from a dynamically typed value.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::IdempotentIdNotString`] when the value is not a
    /// string and [`MetadataError::InvalidIdempotentId`] when it is not a UUID.
    pub fn from_value(value: &ConfigValue) -> Result<Self, MetadataError> {
        match value {
            ConfigValue::String(raw) => Self::parse(raw),
            other => Err(MetadataError::IdempotentIdNotString {
                found: other.type_name(),
            }),
        }
    }

    /// Returns the identifier as declared.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed UUID.
    #[must_use]
    pub const fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Returns the canonical lowercase hyphenated form.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.uuid.hyphenated().to_string()
    }
}

/// Strips `urn:` and `uuid:` markers, surrounding braces, and every hyphen.
fn uuid_hex_digits(raw: &str) -> String {
    raw.replace("urn:", "")
        .replace("uuid:", "")
        .trim_matches(|ch| ch == '{' || ch == '}')
        .replace('-', "")
}

impl fmt::Display for IdempotentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw.fmt(f)
    }
}

impl TryFrom<String> for IdempotentId {
    type Error = MetadataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<IdempotentId> for String {
    fn from(id: IdempotentId) -> Self {
        id.raw
    }
}
