// crates/suite-gate-core/src/core/gates.rs
// ============================================================================
// Module: Gate Specifications
// Description: Declarative gates attached to a test definition.
// Purpose: Describe each pre-execution check independently of evaluation.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A gate is data: the composer interprets it against the registries. Keeping
//! gates declarative lets a definition be serialized, compared, and evaluated
//! any number of times with the same result.

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ServiceTag;

/// A (group, option) pair with an optional custom skip message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigPredicate {
    /// Configuration group.
    pub group: String,
    /// Option inside the group.
    pub option: String,
    /// Exact skip reason to use instead of the default message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConfigPredicate {
    /// Creates a predicate over `group.option`.
    #[must_use]
    pub fn new(group: impl Into<String>, option: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            option: option.into(),
            message: None,
        }
    }

    /// Sets the custom skip message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// A pre-execution check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GateSpec {
    /// Every listed service must be available.
    Services {
        /// Services in declaration order.
        services: Vec<ServiceTag>,
    },
    /// `extension` must be enabled for `service`.
    RequiresExt {
        /// Extension name.
        extension: String,
        /// Service key in the extension registry.
        service: String,
    },
    /// Skip unless the option is true.
    SkipUnlessConfig(ConfigPredicate),
    /// Skip if the option is true.
    SkipIfConfig(ConfigPredicate),
}

impl GateSpec {
    /// Returns the gate kind.
    #[must_use]
    pub const fn kind(&self) -> GateKind {
        match self {
            Self::Services {
                ..
            } => GateKind::Services,
            Self::RequiresExt {
                ..
            } => GateKind::RequiresExt,
            Self::SkipUnlessConfig(_) => GateKind::SkipUnlessConfig,
            Self::SkipIfConfig(_) => GateKind::SkipIfConfig,
        }
    }
}

/// Gate kind label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    /// `services`.
    Services,
    /// `requires_ext`.
    RequiresExt,
    /// `skip_unless_config`.
    SkipUnlessConfig,
    /// `skip_if_config`.
    SkipIfConfig,
}

impl GateKind {
    /// Returns the decorator name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::RequiresExt => "requires_ext",
            Self::SkipUnlessConfig => "skip_unless_config",
            Self::SkipIfConfig => "skip_if_config",
        }
    }
}
