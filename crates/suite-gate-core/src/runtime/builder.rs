// crates/suite-gate-core/src/runtime/builder.rs
// ============================================================================
// Module: Test Definition Builder
// Description: Decorator-style builder producing frozen test definitions.
// Purpose: Validate and attach metadata and gates at definition time.
// Dependencies: crate::core, tracing
// ============================================================================

//! ## Overview
//! Each builder call is one decorator application. Calls are made in
//! *application order*: the first call is the decorator closest to the test
//! body, the last call is the outermost one. Gates are evaluated in the
//! reverse order, so the last applied gate is checked first.
//!
//! Written as stacked decorators:
//!
//! ```text
//! @services('compute')            <- applied last, checked first
//! @skip_unless_config('a', 'b')   <- applied first, checked last
//! def test(): ...
//! ```
//!
//! is built as `.skip_unless_config(..).services(..)`. Reordering the calls
//! changes which skip message wins when both gates would fire.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::AttrType;
use crate::core::ConfigPredicate;
use crate::core::ConfigValue;
use crate::core::GateSpec;
use crate::core::IdempotentId;
use crate::core::MetadataError;
use crate::core::ServiceCatalog;
use crate::core::ServiceTag;
use crate::core::StressConfig;
use crate::core::TestId;
use crate::core::TestMetadata;

// ============================================================================
// SECTION: Frozen Definition
// ============================================================================

/// A test with its frozen metadata and gate stack.
///
/// # Invariants
/// - Immutable; produced only by [`TestBuilder::build`].
/// - `gates` is in application order (innermost first).
#[derive(Debug, Clone, PartialEq)]
pub struct TestDefinition {
    /// Side-table key.
    test_id: TestId,
    /// Attached metadata.
    metadata: TestMetadata,
    /// Gates in application order.
    gates: Vec<GateSpec>,
}

impl TestDefinition {
    /// Returns the test identifier.
    #[must_use]
    pub const fn test_id(&self) -> &TestId {
        &self.test_id
    }

    /// Returns the metadata.
    #[must_use]
    pub const fn metadata(&self) -> &TestMetadata {
        &self.metadata
    }

    /// Returns the gates in application order (innermost first).
    #[must_use]
    pub fn gates(&self) -> &[GateSpec] {
        &self.gates
    }

    /// Iterates the gates in evaluation order (outermost first).
    pub fn gates_in_evaluation_order(&self) -> impl Iterator<Item = &GateSpec> {
        self.gates.iter().rev()
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Decorator-style builder for a [`TestDefinition`].
#[derive(Debug, Clone)]
pub struct TestBuilder {
    /// Side-table key.
    test_id: TestId,
    /// Metadata under construction.
    metadata: TestMetadata,
    /// Gates in application order.
    gates: Vec<GateSpec>,
}

impl TestBuilder {
    /// Starts a definition for an undocumented test.
    pub fn new(test_id: impl Into<TestId>) -> Self {
        Self::with_doc(test_id, "")
    }

    /// Starts a definition for a test with its own documentation text.
    pub fn with_doc(test_id: impl Into<TestId>, doc: impl Into<String>) -> Self {
        Self {
            test_id: test_id.into(),
            metadata: TestMetadata::with_doc(doc),
            gates: Vec::new(),
        }
    }

    /// Returns the identifier of the test being built.
    #[must_use]
    pub const fn test_id(&self) -> &TestId {
        &self.test_id
    }

    /// Applies `idempotent_id` with a string identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::InvalidIdempotentId`] for non-UUID strings and
    /// [`MetadataError::IdempotentIdAlreadySet`] when an id is already attached.
    pub fn idempotent_id(self, id: &str) -> Result<Self, MetadataError> {
        let id = IdempotentId::parse(id)?;
        self.attach_idempotent_id(id)
    }

    /// Applies `idempotent_id` with a dynamically typed identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::IdempotentIdNotString`] for non-string values,
    /// plus the errors of [`TestBuilder::idempotent_id`].
    pub fn idempotent_id_value(self, value: &ConfigValue) -> Result<Self, MetadataError> {
        let id = IdempotentId::from_value(value)?;
        self.attach_idempotent_id(id)
    }

    /// Attaches a parsed idempotent id.
    fn attach_idempotent_id(mut self, id: IdempotentId) -> Result<Self, MetadataError> {
        self.metadata.set_idempotent_id(id)?;
        Ok(self)
    }

    /// Applies `attr(type=...)`.
    #[must_use]
    pub fn attr(mut self, attr: impl Into<AttrType>) -> Self {
        for tag in attr.into().tags() {
            self.metadata.add_tag(tag);
        }
        self
    }

    /// Applies `attr(<key>=<value>)` for a keyword other than `type`.
    ///
    /// Recorded for compatibility only; never becomes an attribute tag.
    #[must_use]
    pub fn attr_keyword(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.metadata.add_keyword(key, value.into());
        self
    }

    /// Applies `services(...)`.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::InvalidServiceTag`] for the first name missing
    /// from `catalog`; nothing is attached in that case.
    pub fn services<I, S>(mut self, catalog: &ServiceCatalog, services: I) -> Result<Self, MetadataError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut declared = Vec::new();
        for service in services {
            let service = service.as_ref();
            if !catalog.contains(service) {
                tracing::warn!(test = %self.test_id, service, "invalid service tag");
                return Err(MetadataError::InvalidServiceTag {
                    tag: service.to_string(),
                });
            }
            declared.push(ServiceTag::new(service));
        }
        for service in &declared {
            self.metadata.add_service(service.clone());
        }
        self.gates.push(GateSpec::Services {
            services: declared,
        });
        Ok(self)
    }

    /// Applies `requires_ext(extension=..., service=...)`.
    ///
    /// The service key is checked at evaluation time, not here.
    #[must_use]
    pub fn requires_ext(mut self, extension: &str, service: &str) -> Self {
        self.gates.push(GateSpec::RequiresExt {
            extension: extension.to_string(),
            service: service.to_string(),
        });
        self
    }

    /// Applies `skip_unless_config(group, option[, message])`.
    #[must_use]
    pub fn skip_unless_config(mut self, predicate: ConfigPredicate) -> Self {
        self.gates.push(GateSpec::SkipUnlessConfig(predicate));
        self
    }

    /// Applies `skip_if_config(group, option[, message])`.
    #[must_use]
    pub fn skip_if_config(mut self, predicate: ConfigPredicate) -> Self {
        self.gates.push(GateSpec::SkipIfConfig(predicate));
        self
    }

    /// Applies `stresstest(...)`.
    #[must_use]
    pub fn stresstest(mut self, stress: StressConfig) -> Self {
        self.metadata.set_stress(stress);
        self
    }

    /// Freezes the definition.
    #[must_use]
    pub fn build(self) -> TestDefinition {
        TestDefinition {
            test_id: self.test_id,
            metadata: self.metadata,
            gates: self.gates,
        }
    }
}
