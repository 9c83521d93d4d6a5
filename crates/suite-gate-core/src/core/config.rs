// crates/suite-gate-core/src/core/config.rs
// ============================================================================
// Module: Configuration Snapshot
// Description: Read-only grouped option values consumed by gates.
// Purpose: Resolve (group, option) pairs with distinct missing-group/option outcomes.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`ConfigSnapshot`] is the immutable view of process configuration that
//! gates read at evaluation time. It is built once by the configuration
//! loader and then only borrowed. Lookups keep "group missing" and "option
//! missing" apart because the config predicate gates treat them differently
//! from a present-but-false value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Values
// ============================================================================

/// Dynamically typed configuration (or decorator argument) value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered list of values.
    List(Vec<Self>),
}

impl ConfigValue {
    /// Returns whether the value counts as true.
    ///
    /// `false`, zero, the empty string and the empty list are false; every
    /// other value is true.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Integer(value) => *value != 0,
            Self::Float(value) => *value != 0.0,
            Self::String(value) => !value.is_empty(),
            Self::List(values) => !values.is_empty(),
        }
    }

    /// Returns a stable type label for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Integer(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "str",
            Self::List(_) => "list",
        }
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the items when this is a list made only of strings.
    #[must_use]
    pub fn as_string_list(&self) -> Option<Vec<&str>> {
        match self {
            Self::List(values) => values.iter().map(Self::as_str).collect(),
            _ => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// SECTION: Snapshot
// ============================================================================

/// Options of a single configuration group.
pub type ConfigGroup = BTreeMap<String, ConfigValue>;

/// Result of resolving a (group, option) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigLookup<'a> {
    /// The group does not exist.
    MissingGroup,
    /// The group exists but has no such option.
    MissingOption,
    /// The option is present.
    Value(&'a ConfigValue),
}

/// Immutable snapshot of grouped configuration options.
///
/// # Invariants
/// - Never mutated once handed to a composer; `with_option`/`set_default` are
///   construction helpers that consume or run before sharing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigSnapshot {
    /// Groups keyed by name.
    groups: BTreeMap<String, ConfigGroup>,
}

impl ConfigSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }

    /// Returns the snapshot with `group.option` set to `value`.
    #[must_use]
    pub fn with_option(
        mut self,
        group: &str,
        option: &str,
        value: impl Into<ConfigValue>,
    ) -> Self {
        self.set(group, option, value);
        self
    }

    /// Sets `group.option`, replacing any previous value.
    pub fn set(&mut self, group: &str, option: &str, value: impl Into<ConfigValue>) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(option.to_string(), value.into());
    }

    /// Sets `group.option` only when it is absent.
    pub fn set_default(&mut self, group: &str, option: &str, value: impl Into<ConfigValue>) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .entry(option.to_string())
            .or_insert_with(|| value.into());
    }

    /// Ensures `group` exists, even when it has no options.
    pub fn ensure_group(&mut self, group: &str) {
        self.groups.entry(group.to_string()).or_default();
    }

    /// Resolves a (group, option) pair.
    #[must_use]
    pub fn lookup(&self, group: &str, option: &str) -> ConfigLookup<'_> {
        let Some(options) = self.groups.get(group) else {
            return ConfigLookup::MissingGroup;
        };
        options.get(option).map_or(ConfigLookup::MissingOption, ConfigLookup::Value)
    }

    /// Returns the value of `group.option` when present.
    #[must_use]
    pub fn get(&self, group: &str, option: &str) -> Option<&ConfigValue> {
        match self.lookup(group, option) {
            ConfigLookup::Value(value) => Some(value),
            ConfigLookup::MissingGroup | ConfigLookup::MissingOption => None,
        }
    }

    /// Returns a group when present.
    #[must_use]
    pub fn group(&self, group: &str) -> Option<&ConfigGroup> {
        self.groups.get(group)
    }

    /// Iterates groups in name order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &ConfigGroup)> {
        self.groups.iter().map(|(name, options)| (name.as_str(), options))
    }
}
